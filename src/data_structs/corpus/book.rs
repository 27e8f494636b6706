use std::fmt::Display;

use super::{
    Chapter,
    FrequencySource,
    Verse,
};
use crate::data_structs::canon::{
    canonical_book,
    CanonicalBook,
};
use crate::data_structs::frequency::FrequencyMap;

/// An ordered sequence of chapters, identified by a canonical book code.
///
/// The code is not validated here; [`super::BookCollection`] rejects
/// unknown codes on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id:       String,
    chapters: Vec<Chapter>,
}

impl Book {
    pub fn new<I: Into<String>>(
        id: I,
        chapters: Vec<Chapter>,
    ) -> Self {
        Self {
            id: id.into(),
            chapters,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn canonical(&self) -> Option<&'static CanonicalBook> {
        canonical_book(&self.id)
    }

    pub fn verses(&self) -> impl Iterator<Item = &Verse> {
        self.chapters
            .iter()
            .flat_map(|chapter| chapter.verses().iter())
    }

    pub(crate) fn map_text<F>(
        &self,
        f: &mut F,
    ) -> Book
    where
        F: FnMut(&Verse) -> String, {
        Book {
            id:       self.id.clone(),
            chapters: self
                .chapters
                .iter()
                .map(|chapter| chapter.map_text(&mut *f))
                .collect(),
        }
    }
}

impl FrequencySource for Book {
    fn token_frequency(&self) -> FrequencyMap<String> {
        FrequencyMap::merged(self.chapters.iter().map(Chapter::token_frequency))
    }

    fn char_frequency(&self) -> FrequencyMap<char> {
        FrequencyMap::merged(self.chapters.iter().map(Chapter::char_frequency))
    }
}

impl Display for Book {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let name = self.canonical().map_or("Unknown", |book| book.name);
        write!(
            f,
            "Book {} ({}) with {} chapters",
            name,
            self.id,
            self.chapters.len()
        )
    }
}
