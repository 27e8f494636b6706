//! Token and character frequency statistics over parallel Bible
//! translations stored as `cesDoc` XML documents.
//!
//! A document is parsed into a [`Bible`](data_structs::Bible), a fixed
//! 66-slot collection of books, chapters and verses. Frequencies are merged
//! bottom-up through that hierarchy and
//! [`CorpusStatistics`](tools::CorpusStatistics) derives the length and
//! frequency cross-tabulations once per corpus. Many corpora are combined in
//! a [`CorpusGroup`](tools::CorpusGroup) and exported as CSV tables.
//!
//! ```no_run
//! use bible_corpus::prelude::*;
//!
//! let report = BatchConfig::default().process_dir("corpora/")?;
//! report.group.export("output/")?;
//! # Ok::<(), CorpusError>(())
//! ```

pub mod data_structs;
pub mod error;
pub mod exports;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;
