use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use indexmap::IndexSet;
use itertools::Itertools;
use log::{
    debug,
    info,
};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_distr::Geometric;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::{
    Bible,
    FrequencyMap,
    FrequencySource,
    Verse,
};
use crate::error::{
    CorpusError,
    CorpusResult,
};
use crate::io::write_new_bible;
use crate::utils::text::token_length;
use crate::with_field_fn;

/// Null model used to build a control corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlModel {
    /// Keeps the verse layout and every character position; each word
    /// character is replaced by a uniformly drawn member of the corpus
    /// alphabet. Case is preserved.
    #[default]
    Scramble,
    /// Keeps the number of tokens of every verse; token lengths are drawn
    /// from a geometric distribution with the corpus mean token length and
    /// filled with characters drawn from the observed character frequencies.
    GeometricLength,
}

impl ControlModel {
    fn language_suffix(&self) -> &'static str {
        match self {
            ControlModel::Scramble => " random",
            ControlModel::GeometricLength => " random(geometric length)",
        }
    }
}

/// Marker appended to the language codes of a control corpus.
pub const CONTROL_MARKER: &str = "_rdm";

const RESERVED_FILE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlConfig {
    pub model:         ControlModel,
    /// Fixed seed for reproducible output.
    pub seed:          Option<u64>,
    /// Treat the space as a member of the alphabet. Scramble only.
    pub space_as_char: bool,
}

impl ControlConfig {
    with_field_fn!(model, ControlModel);

    with_field_fn!(seed, Option<u64>);

    with_field_fn!(space_as_char, bool);

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn language_suffix(&self) -> String {
        let mut suffix = self.model.language_suffix().to_string();
        if self.space_as_char && self.model == ControlModel::Scramble {
            suffix.push_str("(space as character)");
        }
        suffix
    }

    /// Language name of the control corpus built from `bible`.
    pub fn control_language(
        &self,
        bible: &Bible,
    ) -> String {
        format!("{}{}", bible.language(), self.language_suffix())
    }

    /// Builds the control corpus of `bible`.
    pub fn generate(
        &self,
        bible: &Bible,
    ) -> CorpusResult<Bible> {
        let metadata = bible
            .metadata()
            .derived(&self.language_suffix(), CONTROL_MARKER);
        let mut rng = self.rng();

        let control = match self.model {
            ControlModel::Scramble => {
                let alphabet = alphabet(bible, self.space_as_char);
                if alphabet.is_empty() {
                    return Err(CorpusError::Statistics(format!(
                        "{} has no word characters to scramble",
                        bible.language()
                    )));
                }
                bible.map_text(metadata, |verse| {
                    scramble_text(verse.text(), &alphabet, &mut rng)
                })?
            },
            ControlModel::GeometricLength => {
                let sampler = GeometricSampler::try_new(bible)?;
                bible.map_text(metadata, |verse| sampler.sample_verse(verse, &mut rng))?
            },
        };
        debug!(
            "Generated {} from {} with {:?}",
            control.language(),
            bible.language(),
            self.model
        );
        Ok(control)
    }

    /// File name of the control document of `bible`: the control language
    /// with path separators and reserved characters replaced by `_`.
    pub fn file_name(
        &self,
        bible: &Bible,
    ) -> String {
        let stem = self
            .control_language(bible)
            .chars()
            .map(|c| {
                if c.is_control() || RESERVED_FILE_CHARS.contains(&c) {
                    '_'
                }
                else {
                    c
                }
            })
            .collect::<String>();
        format!("{stem}.xml")
    }

    /// Generates the control corpus and writes it to `<dir>/<file name>`.
    ///
    /// An existing file is never replaced; the call fails instead.
    pub fn write<P: AsRef<Path>>(
        &self,
        bible: &Bible,
        dir: P,
    ) -> CorpusResult<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| CorpusError::io(dir, e))?;
        let control = self.generate(bible)?;
        let path = dir.join(self.file_name(bible));
        write_new_bible(&control, &path)?;
        info!("Wrote control corpus {}", path.display());
        Ok(path)
    }
}

/// Distinct characters of the tokens of `bible`, in first-occurrence order.
fn alphabet(
    bible: &Bible,
    space_as_char: bool,
) -> Vec<char> {
    let mut chars = bible
        .unique_tokens()
        .iter()
        .flat_map(|token| token.chars())
        .collect::<IndexSet<char>>();
    if space_as_char {
        chars.insert(' ');
    }
    chars.into_iter().collect()
}

fn scramble_text<R: Rng>(
    text: &str,
    alphabet: &[char],
    rng: &mut R,
) -> String {
    let mut scrambled = String::with_capacity(text.len());
    for c in text.chars() {
        let mut lower = c.to_lowercase();
        let replaceable = match (lower.next(), lower.next()) {
            (Some(l), None) => alphabet.contains(&l),
            _ => false,
        };
        let replacement = if replaceable {
            alphabet.choose(rng).copied()
        }
        else {
            None
        };
        match replacement {
            Some(new) if c.is_uppercase() => scrambled.extend(new.to_uppercase()),
            Some(new) => scrambled.push(new),
            None => scrambled.push(c),
        }
    }
    scrambled
}

struct GeometricSampler {
    length:  Geometric,
    chars:   Vec<char>,
    weights: WeightedIndex<u64>,
}

impl GeometricSampler {
    fn try_new(bible: &Bible) -> CorpusResult<Self> {
        let tokens = bible.token_frequency();
        if tokens.is_empty() {
            return Err(CorpusError::Statistics(format!(
                "{} contains no tokens",
                bible.language()
            )));
        }
        let total_length = tokens
            .iter()
            .map(|(token, &count)| token_length(token) as f64 * count as f64)
            .sum::<f64>();
        let mean_length = total_length / tokens.total() as f64;

        // Failures before the first success, shifted by one: mean 1/p.
        let length = Geometric::new(1.0 / mean_length)
            .map_err(|e| CorpusError::Statistics(format!("token length model: {e}")))?;

        let char_frequency = FrequencyMap::from_counts(
            tokens
                .iter()
                .flat_map(|(token, &count)| token.chars().map(move |c| (c, count))),
        );
        let (chars, counts): (Vec<char>, Vec<u64>) = char_frequency.into_iter().unzip();
        let weights = WeightedIndex::new(counts)
            .map_err(|e| CorpusError::Statistics(format!("character model: {e}")))?;

        debug!(
            "Geometric model for {}: mean length {:.3}, {} characters",
            bible.language(),
            mean_length,
            chars.len()
        );
        Ok(Self {
            length,
            chars,
            weights,
        })
    }

    fn sample_verse<R: Rng>(
        &self,
        verse: &Verse,
        rng: &mut R,
    ) -> String {
        (0..verse.tokens().len())
            .map(|_| {
                let length = 1 + self.length.sample(rng) as usize;
                (0..length)
                    .map(|_| self.chars[self.weights.sample(rng)])
                    .collect::<String>()
            })
            .join(" ")
    }
}
