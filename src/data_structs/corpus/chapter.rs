use super::{
    FrequencySource,
    Verse,
};
use crate::data_structs::frequency::FrequencyMap;

/// An ordered sequence of verses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    id:     String,
    verses: Vec<Verse>,
}

impl Chapter {
    pub fn new<I: Into<String>>(
        id: I,
        verses: Vec<Verse>,
    ) -> Self {
        Self {
            id: id.into(),
            verses,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// New chapter with the same layout and the text of every verse
    /// replaced by `f`.
    pub(crate) fn map_text<F>(
        &self,
        f: &mut F,
    ) -> Chapter
    where
        F: FnMut(&Verse) -> String, {
        Chapter {
            id:     self.id.clone(),
            verses: self
                .verses
                .iter()
                .map(|verse| Verse::new(verse.id(), f(verse)))
                .collect(),
        }
    }
}

impl FrequencySource for Chapter {
    fn token_frequency(&self) -> FrequencyMap<String> {
        FrequencyMap::merged(self.verses.iter().map(Verse::token_frequency))
    }

    fn char_frequency(&self) -> FrequencyMap<char> {
        FrequencyMap::merged(self.verses.iter().map(Verse::char_frequency))
    }
}
