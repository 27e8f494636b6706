//! Utility functions and helper macros used throughout the crate.
//!
//! - [`stats`]: descriptive statistics with explicit undefined values, tied
//!   ranking, Pearson and Spearman correlation, significance tests.
//! - [`text`]: the tokenizer shared by every level of the corpus hierarchy.
//! - Macros generating getters and builder-style `with_*` setters.
//! - The global rayon thread pool used by the batch driver.

pub mod stats;
pub mod text;

use once_cell::sync::Lazy;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};
pub use stats::*;
pub use text::{
    token_length,
    tokenize,
};

/// Environment variable overriding the number of worker threads.
pub const THREADS_ENV: &str = "CORPUS_NUM_THREADS";

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var(THREADS_ENV)
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize {
    THREAD_POOL.current_num_threads()
}

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}
pub use getter_fn;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}
pub use with_field_fn;
