//! Reading and writing of CES-style `cesDoc` documents.

mod read;
mod write;

pub use read::{
    parse_str,
    read_bible,
    CesReader,
};
pub use write::{
    to_xml_string,
    write_bible,
    write_new_bible,
    CesWriter,
};
