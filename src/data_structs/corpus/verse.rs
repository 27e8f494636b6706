use std::fmt::Display;

use super::FrequencySource;
use crate::data_structs::frequency::FrequencyMap;
use crate::utils::text::tokenize;

/// A single verse: the atomic unit of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    id:   String,
    text: String,
}

impl Verse {
    /// Creates a verse. Surrounding whitespace of `text` is trimmed.
    pub fn new<I: Into<String>, T: AsRef<str>>(
        id: I,
        text: T,
    ) -> Self {
        Self {
            id:   id.into(),
            text: text.as_ref().trim().to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> Vec<String> {
        tokenize(&self.text)
    }
}

impl FrequencySource for Verse {
    fn token_frequency(&self) -> FrequencyMap<String> {
        self.tokens().into_iter().collect()
    }

    fn char_frequency(&self) -> FrequencyMap<char> {
        self.text.chars().collect()
    }
}

impl Display for Verse {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
