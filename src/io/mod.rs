//! Input and output.
//!
//! - [`xml`]: reading and writing of `cesDoc` translation documents.
//! - [`table`]: CSV export and re-import of metric tables via polars.

pub mod table;
pub mod xml;

pub use xml::{
    parse_str,
    read_bible,
    write_bible,
    write_new_bible,
};
