use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a letter, a number, an underscore or whitespace.
/// Combining marks are removed; every numeric category is kept.
static NON_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\s]").expect("Failed to compile tokenizer pattern")
});

/// Splits verse text into tokens.
///
/// Punctuation is removed, the text is lowercased and then split on single
/// spaces. Empty segments are dropped. Other whitespace (tabs, newlines) is
/// kept inside tokens, so that results stay comparable across languages.
pub fn tokenize(text: &str) -> Vec<String> {
    let stripped = NON_WORD.replace_all(text, "");
    stripped
        .to_lowercase()
        .split(' ')
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

/// Token length in characters.
pub fn token_length(token: &str) -> usize {
    token.chars().count()
}
