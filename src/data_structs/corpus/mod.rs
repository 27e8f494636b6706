//! The book/chapter/verse hierarchy of one translation.
//!
//! Every level implements [`FrequencySource`]. Frequencies are computed on
//! request by merging the frequencies of the children; no level caches or
//! mutates the maps of its children.

mod book;
mod chapter;
mod collection;
mod verse;

use std::fmt::Display;

pub use book::Book;
pub use chapter::Chapter;
pub use collection::BookCollection;
use indexmap::IndexSet;
use log::debug;
use serde::{
    Deserialize,
    Serialize,
};
pub use verse::Verse;

use super::canon::{
    testament_codes,
    Testament,
};
use super::frequency::FrequencyMap;
use super::typedef::CountType;
use crate::error::CorpusResult;

/// Token and character frequencies of a text unit.
pub trait FrequencySource {
    fn token_frequency(&self) -> FrequencyMap<String>;

    /// Case-sensitive counts of every character of the raw text.
    fn char_frequency(&self) -> FrequencyMap<char>;

    fn token_count(&self) -> CountType {
        self.token_frequency().total()
    }

    fn char_count(&self) -> CountType {
        self.char_frequency().total()
    }

    fn unique_tokens(&self) -> IndexSet<String> {
        self.token_frequency().key_set()
    }

    fn unique_chars(&self) -> IndexSet<char> {
        self.char_frequency().key_set()
    }
}

/// Header information of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusMetadata {
    /// Declared language name.
    pub language:            String,
    /// ISO 639 code.
    pub iso639:              String,
    /// Internal language identifier.
    pub lang_id:             String,
    /// Script or writing-system identifier.
    pub script:              String,
    /// Where the document was read from.
    pub source:              String,
    pub reported_word_count: CountType,
    pub reported_byte_count: Option<CountType>,
}

impl CorpusMetadata {
    /// Metadata of a derived document: the language name gets `suffix`
    /// appended and both codes get `marker` appended.
    pub fn derived(
        &self,
        suffix: &str,
        marker: &str,
    ) -> CorpusMetadata {
        CorpusMetadata {
            language: format!("{}{}", self.language, suffix),
            iso639: format!("{}{}", self.iso639, marker),
            lang_id: format!("{}{}", self.lang_id, marker),
            ..self.clone()
        }
    }
}

/// One complete translation: metadata plus its books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bible {
    metadata: CorpusMetadata,
    books:    BookCollection,
}

impl Bible {
    pub fn new(
        metadata: CorpusMetadata,
        books: BookCollection,
    ) -> Self {
        Self { metadata, books }
    }

    pub fn metadata(&self) -> &CorpusMetadata {
        &self.metadata
    }

    pub fn language(&self) -> &str {
        &self.metadata.language
    }

    pub fn books(&self) -> &BookCollection {
        &self.books
    }

    /// Number of books present.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn book(
        &self,
        code: &str,
    ) -> CorpusResult<Option<&Book>> {
        self.books.get(code)
    }

    pub fn chapter_count(&self) -> usize {
        self.books.iter().map(Book::len).sum()
    }

    pub fn verses(&self) -> impl Iterator<Item = &Verse> {
        self.books.iter().flat_map(Book::verses)
    }

    pub fn verse_count(&self) -> usize {
        self.verses().count()
    }

    /// New corpus with copies of the selected books and the same metadata.
    pub fn subset<S: AsRef<str>>(
        &self,
        codes: &[S],
    ) -> CorpusResult<Bible> {
        let books = self.books.subset(codes)?;
        debug!(
            "Created subset of {} with {} of {} books",
            self.language(),
            books.len(),
            self.books.len()
        );
        Ok(Bible {
            metadata: self.metadata.clone(),
            books,
        })
    }

    pub fn testament(
        &self,
        testament: Testament,
    ) -> CorpusResult<Bible> {
        let codes = testament_codes(testament).collect::<Vec<_>>();
        self.subset(&codes)
    }

    pub fn old_testament(&self) -> CorpusResult<Bible> {
        self.testament(Testament::Old)
    }

    pub fn new_testament(&self) -> CorpusResult<Bible> {
        self.testament(Testament::New)
    }

    /// New corpus with the same layout, `metadata`, and every verse text
    /// replaced by `f`.
    pub fn map_text<F>(
        &self,
        metadata: CorpusMetadata,
        mut f: F,
    ) -> CorpusResult<Bible>
    where
        F: FnMut(&Verse) -> String, {
        let mut books = BookCollection::new();
        for book in self.books.iter() {
            books.insert(book.map_text(&mut f))?;
        }
        Ok(Bible { metadata, books })
    }
}

impl FrequencySource for Bible {
    fn token_frequency(&self) -> FrequencyMap<String> {
        FrequencyMap::merged(self.books.iter().map(Book::token_frequency))
    }

    fn char_frequency(&self) -> FrequencyMap<char> {
        FrequencyMap::merged(self.books.iter().map(Book::char_frequency))
    }
}

impl Display for Bible {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} (iso639={}, {})",
            self.metadata.language, self.metadata.iso639, self.metadata.script
        )
    }
}
