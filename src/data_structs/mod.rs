//! Core data structures of the crate.
//!
//! - [`canon`]: the immutable table of the 66 canonical book codes and their
//!   partition into [`Testament`]s.
//! - [`corpus`]: the verse/chapter/book hierarchy of one translation
//!   ([`Bible`]), its [`CorpusMetadata`] and the fixed-slot
//!   [`BookCollection`].
//! - [`FrequencyMap`]: occurrence counts merged bottom-up through the
//!   hierarchy.
//! - [`typedef`]: type aliases for counts, lengths and metric values.

pub mod canon;
pub mod corpus;
mod frequency;
pub mod typedef;

#[cfg(test)]
mod tests;

pub use canon::{
    CanonicalBook,
    Testament,
};
pub use corpus::{
    Bible,
    Book,
    BookCollection,
    Chapter,
    CorpusMetadata,
    FrequencySource,
    Verse,
};
pub use frequency::FrequencyMap;
