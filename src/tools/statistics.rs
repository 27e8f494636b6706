use std::collections::BTreeMap;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use indexmap::IndexMap;
use itertools::Itertools;
use log::{
    debug,
    trace,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::{
    CountType,
    LengthType,
    MetricRow,
    MetricValue,
};
use crate::data_structs::{
    Bible,
    CorpusMetadata,
    FrequencyMap,
    FrequencySource,
};
use crate::error::{
    CorpusError,
    CorpusResult,
};
use crate::getter_fn;
use crate::utils::stats::{
    mean,
    sample_variance,
    spearman,
    spearman_rho,
    steiger_test,
    Correlation,
    MissingPolicy,
    SteigerTest,
};
use crate::utils::text::token_length;

/// Name of a derived metric column.
///
/// The derived ordering is the export order: token count first, then the
/// length counts, the variances by length and the variances by frequency,
/// each ascending.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum MetricColumn {
    /// `QtyOfTokens`
    TokenCount,
    /// `StrLen_<L>`: token occurrences of length L.
    LengthCount(LengthType),
    /// `VarFreq_StrLen_<L>`: variance of the counts of tokens of length L.
    LengthVariance(LengthType),
    /// `VarStrLen_Freq_<F>`: variance of the lengths of tokens seen F times.
    FrequencyVariance(CountType),
}

impl MetricColumn {
    const TOKEN_COUNT: &'static str = "QtyOfTokens";
    const LENGTH_COUNT: &'static str = "StrLen_";
    const LENGTH_VARIANCE: &'static str = "VarFreq_StrLen_";
    const FREQUENCY_VARIANCE: &'static str = "VarStrLen_Freq_";
}

impl Display for MetricColumn {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            MetricColumn::TokenCount => write!(f, "{}", Self::TOKEN_COUNT),
            MetricColumn::LengthCount(l) => write!(f, "{}{}", Self::LENGTH_COUNT, l),
            MetricColumn::LengthVariance(l) => write!(f, "{}{}", Self::LENGTH_VARIANCE, l),
            MetricColumn::FrequencyVariance(c) => {
                write!(f, "{}{}", Self::FREQUENCY_VARIANCE, c)
            },
        }
    }
}

impl FromStr for MetricColumn {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CorpusError::SchemaViolation(format!("unknown metric column '{s}'"));
        if s == Self::TOKEN_COUNT {
            return Ok(MetricColumn::TokenCount);
        }
        if let Some(value) = s.strip_prefix(Self::LENGTH_VARIANCE) {
            return value
                .parse()
                .map(MetricColumn::LengthVariance)
                .map_err(|_| invalid());
        }
        if let Some(value) = s.strip_prefix(Self::FREQUENCY_VARIANCE) {
            return value
                .parse()
                .map(MetricColumn::FrequencyVariance)
                .map_err(|_| invalid());
        }
        if let Some(value) = s.strip_prefix(Self::LENGTH_COUNT) {
            return value
                .parse()
                .map(MetricColumn::LengthCount)
                .map_err(|_| invalid());
        }
        Err(invalid())
    }
}

/// Mean, sample variance, standard deviation and z-scores of the counts of a
/// frequency distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary<K: Hash + Eq> {
    mean:     f64,
    variance: MetricValue,
    std:      MetricValue,
    z_scores: Option<IndexMap<K, f64>>,
}

impl<K: Hash + Eq + Clone> DistributionSummary<K> {
    /// Fails on an empty distribution.
    pub fn from_frequency(frequency: &FrequencyMap<K>) -> CorpusResult<Self> {
        let counts = frequency.values().map(|c| c as f64).collect_vec();
        let mean = mean(&counts).ok_or_else(|| {
            CorpusError::Statistics("mean of an empty distribution".to_string())
        })?;
        let variance = sample_variance(&counts);
        let std = variance.map(f64::sqrt);

        let z_scores = match std {
            Some(std) if std > 0.0 => {
                Some(
                    frequency
                        .iter()
                        .map(|(key, &count)| (key.clone(), (count as f64 - mean) / std))
                        .collect(),
                )
            },
            _ => None,
        };

        Ok(Self {
            mean,
            variance,
            std,
            z_scores,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> MetricValue {
        self.variance
    }

    pub fn std(&self) -> MetricValue {
        self.std
    }

    /// Z-score of every key, in the order of the source distribution.
    ///
    /// Fails when the standard deviation is undefined or zero.
    pub fn z_scores(&self) -> CorpusResult<&IndexMap<K, f64>> {
        self.z_scores.as_ref().ok_or_else(|| {
            CorpusError::Statistics(match self.std {
                None => "z-scores need at least two distinct keys".to_string(),
                Some(_) => "z-scores of a distribution with zero variance".to_string(),
            })
        })
    }

    pub fn z_score(
        &self,
        key: &K,
    ) -> CorpusResult<Option<f64>> {
        Ok(self.z_scores()?.get(key).copied())
    }
}

/// Spearman correlations computed within one corpus.
///
/// Length buckets run from 1 to the longest observed token. The pairwise
/// coefficients use their own alignment under the missing policy; the Steiger
/// test uses the rows where all three bucket columns are kept.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorpusCorrelations {
    /// Token length against token count, over distinct tokens.
    pub length_frequency:     Option<Correlation>,
    /// Length against occurrences of that length.
    pub length_occurrences:   Option<Correlation>,
    /// Length against the count variance of that length.
    pub length_variance:      Option<Correlation>,
    pub occurrences_variance: Option<Correlation>,
    /// Compares `length_occurrences` with `length_variance`.
    pub steiger:              Option<SteigerTest>,
}

impl CorpusCorrelations {
    const PAIRS: [&'static str; 4] = ["len_tokfreq", "len_lenfreq", "len_lenvar", "lenfreq_lenvar"];

    /// Export column names, aligned with [`CorpusCorrelations::values`].
    pub fn column_names() -> Vec<String> {
        Self::PAIRS
            .iter()
            .flat_map(|pair| [format!("rho_{pair}"), format!("p_{pair}")])
            .chain(["steiger_z".to_string(), "steiger_p".to_string()])
            .collect()
    }

    pub fn values(&self) -> Vec<MetricValue> {
        [
            self.length_frequency,
            self.length_occurrences,
            self.length_variance,
            self.occurrences_variance,
        ]
        .into_iter()
        .flat_map(|corr| {
            [
                corr.map(|c| c.coefficient),
                corr.and_then(|c| c.p_value),
            ]
        })
        .chain([
            self.steiger.map(|s| s.z),
            self.steiger.map(|s| s.p_value),
        ])
        .collect()
    }
}

/// Flat description of one corpus for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub language:             String,
    pub iso639:               String,
    pub script:               String,
    pub books:                usize,
    pub chapters:             usize,
    pub verses:               usize,
    pub total_tokens:         CountType,
    pub unique_tokens:        usize,
    pub total_chars:          CountType,
    pub unique_chars:         usize,
    pub reported_word_count:  CountType,
    pub max_token_length:     LengthType,
    /// Token length averaged over occurrences.
    pub mean_token_length:    f64,
    pub mean_token_frequency: f64,
    pub token_frequency_std:  MetricValue,
    pub type_token_ratio:     f64,
}

/// Immutable statistics snapshot of one corpus, computed once at
/// construction.
#[derive(Debug, Clone)]
pub struct CorpusStatistics {
    metadata:              CorpusMetadata,
    /// Descending by count.
    token_frequency:       FrequencyMap<String>,
    /// Descending by count.
    char_frequency:        FrequencyMap<char>,
    /// Token occurrences by token length, descending by count.
    freq_by_length:        FrequencyMap<LengthType>,
    tokens_by_length:      BTreeMap<LengthType, FrequencyMap<String>>,
    tokens_by_frequency:   BTreeMap<CountType, Vec<String>>,
    /// Buckets 0 to the maximum observed length.
    variance_by_length:    BTreeMap<LengthType, MetricValue>,
    variance_by_frequency: BTreeMap<CountType, MetricValue>,
    token_summary:         DistributionSummary<String>,
    char_summary:          DistributionSummary<char>,
    length_summary:        DistributionSummary<LengthType>,
    max_length:            LengthType,
    summary:               CorpusSummary,
}

impl CorpusStatistics {
    getter_fn!(metadata, CorpusMetadata);

    getter_fn!(token_frequency, FrequencyMap<String>);

    getter_fn!(char_frequency, FrequencyMap<char>);

    getter_fn!(freq_by_length, FrequencyMap<LengthType>);

    getter_fn!(tokens_by_length, BTreeMap<LengthType, FrequencyMap<String>>);

    getter_fn!(tokens_by_frequency, BTreeMap<CountType, Vec<String>>);

    getter_fn!(variance_by_length, BTreeMap<LengthType, MetricValue>);

    getter_fn!(variance_by_frequency, BTreeMap<CountType, MetricValue>);

    getter_fn!(token_summary, DistributionSummary<String>);

    getter_fn!(char_summary, DistributionSummary<char>);

    getter_fn!(length_summary, DistributionSummary<LengthType>);

    getter_fn!(summary, CorpusSummary);

    /// Computes every derived table of `bible`.
    ///
    /// Fails if the corpus contains no tokens.
    pub fn try_new(bible: &Bible) -> CorpusResult<Self> {
        let token_frequency = bible.token_frequency().sorted();
        let total_tokens = token_frequency.total();
        if total_tokens == 0 {
            return Err(CorpusError::Statistics(format!(
                "{} contains no tokens",
                bible.language()
            )));
        }
        let char_frequency = bible.char_frequency().sorted();

        let mut tokens_by_length: BTreeMap<LengthType, FrequencyMap<String>> = BTreeMap::new();
        let mut tokens_by_frequency: BTreeMap<CountType, Vec<String>> = BTreeMap::new();
        for (token, &count) in token_frequency.iter() {
            tokens_by_length
                .entry(token_length(token))
                .or_default()
                .add(token.clone(), count);
            tokens_by_frequency
                .entry(count)
                .or_default()
                .push(token.clone());
        }

        let freq_by_length = FrequencyMap::from_counts(
            tokens_by_length
                .iter()
                .map(|(&length, tokens)| (length, tokens.total())),
        )
        .sorted();
        let max_length = tokens_by_length
            .keys()
            .next_back()
            .copied()
            .unwrap_or_default();

        let variance_by_length = (0..=max_length)
            .map(|length| {
                let counts = tokens_by_length
                    .get(&length)
                    .map(|tokens| tokens.values().map(|c| c as f64).collect_vec())
                    .unwrap_or_default();
                (length, sample_variance(&counts))
            })
            .collect::<BTreeMap<_, _>>();

        let variance_by_frequency = tokens_by_frequency
            .iter()
            .map(|(&count, tokens)| {
                let lengths = tokens
                    .iter()
                    .map(|token| token_length(token) as f64)
                    .collect_vec();
                (count, sample_variance(&lengths))
            })
            .collect::<BTreeMap<_, _>>();
        trace!(
            "{}: {} length buckets, {} frequency buckets",
            bible.language(),
            variance_by_length.len(),
            variance_by_frequency.len()
        );

        let token_summary = DistributionSummary::from_frequency(&token_frequency)?;
        let char_summary = DistributionSummary::from_frequency(&char_frequency)?;
        let length_summary = DistributionSummary::from_frequency(&freq_by_length)?;

        let metadata = bible.metadata().clone();
        let weighted_length = freq_by_length
            .iter()
            .map(|(&length, &count)| (length as CountType * count) as f64)
            .sum::<f64>();
        let summary = CorpusSummary {
            language:             metadata.language.clone(),
            iso639:               metadata.iso639.clone(),
            script:               metadata.script.clone(),
            books:                bible.len(),
            chapters:             bible.chapter_count(),
            verses:               bible.verse_count(),
            total_tokens,
            unique_tokens:        token_frequency.len(),
            total_chars:          char_frequency.total(),
            unique_chars:         char_frequency.len(),
            reported_word_count:  metadata.reported_word_count,
            max_token_length:     max_length,
            mean_token_length:    weighted_length / total_tokens as f64,
            mean_token_frequency: token_summary.mean(),
            token_frequency_std:  token_summary.std(),
            type_token_ratio:     token_frequency.len() as f64 / total_tokens as f64,
        };

        debug!(
            "Computed statistics for {}: {} tokens, {} distinct, max length {}",
            metadata.language,
            total_tokens,
            token_frequency.len(),
            max_length
        );

        Ok(Self {
            metadata,
            token_frequency,
            char_frequency,
            freq_by_length,
            tokens_by_length,
            tokens_by_frequency,
            variance_by_length,
            variance_by_frequency,
            token_summary,
            char_summary,
            length_summary,
            max_length,
            summary,
        })
    }

    /// Declared language name, used as the row label of group tables.
    pub fn language(&self) -> &str {
        &self.metadata.language
    }

    pub fn total_tokens(&self) -> CountType {
        self.token_frequency.total()
    }

    pub fn max_length(&self) -> LengthType {
        self.max_length
    }

    /// Share of token occurrences whose length is at most `length`.
    pub fn cdf(
        &self,
        length: LengthType,
    ) -> f64 {
        let covered = self
            .freq_by_length
            .iter()
            .filter(|&(&l, _)| l <= length)
            .map(|(_, &count)| count)
            .sum::<CountType>();
        covered as f64 / self.total_tokens() as f64
    }

    /// [`CorpusStatistics::cdf`] evaluated at every length from 0 to `up_to`.
    pub fn cdf_series(
        &self,
        up_to: LengthType,
    ) -> Vec<f64> {
        let mut cumulative = 0;
        (0..=up_to)
            .map(|length| {
                cumulative += self.freq_by_length.get(&length);
                cumulative as f64 / self.total_tokens() as f64
            })
            .collect()
    }

    pub fn mean_variance_by_length(
        &self,
        policy: MissingPolicy,
    ) -> MetricValue {
        mean(&policy.apply(&self.variance_by_length.values().copied().collect_vec()))
    }

    pub fn mean_variance_by_frequency(
        &self,
        policy: MissingPolicy,
    ) -> MetricValue {
        mean(&policy.apply(
            &self
                .variance_by_frequency
                .values()
                .copied()
                .collect_vec(),
        ))
    }

    /// The snapshot flattened into named metric values.
    pub fn metrics(&self) -> MetricRow<MetricColumn> {
        let mut row = MetricRow::new();
        row.insert(MetricColumn::TokenCount, Some(self.total_tokens() as f64));
        for (&length, &count) in self.freq_by_length.iter() {
            row.insert(MetricColumn::LengthCount(length), Some(count as f64));
        }
        for (&length, &variance) in self.variance_by_length.iter() {
            row.insert(MetricColumn::LengthVariance(length), variance);
        }
        for (&count, &variance) in self.variance_by_frequency.iter() {
            row.insert(MetricColumn::FrequencyVariance(count), variance);
        }
        row
    }

    /// Within-corpus Spearman correlations and the Steiger comparison of the
    /// two correlations that share the length variable.
    pub fn correlations(
        &self,
        policy: MissingPolicy,
    ) -> CorpusCorrelations {
        let (token_lengths, token_counts): (Vec<MetricValue>, Vec<MetricValue>) = self
            .token_frequency
            .iter()
            .map(|(token, &count)| (Some(token_length(token) as f64), Some(count as f64)))
            .unzip();

        let lengths = (1..=self.max_length).collect_vec();
        let length_col = lengths.iter().map(|&l| Some(l as f64)).collect_vec();
        let occurrence_col = lengths
            .iter()
            .map(|l| Some(self.freq_by_length.get(l) as f64))
            .collect_vec();
        let variance_col = lengths
            .iter()
            .map(|l| self.variance_by_length.get(l).copied().flatten())
            .collect_vec();

        let length_occurrences = spearman(&length_col, &occurrence_col, policy);
        let length_variance = spearman(&length_col, &variance_col, policy);

        let steiger = {
            let aligned = policy.align_many(&[
                length_col.as_slice(),
                occurrence_col.as_slice(),
                variance_col.as_slice(),
            ]);
            let rho = |a: usize, b: usize| spearman_rho(&aligned[a], &aligned[b]);
            match (rho(0, 1), rho(0, 2), rho(1, 2)) {
                (Some(r12), Some(r13), Some(r23)) => {
                    steiger_test(r12, r13, r23, aligned[0].len())
                },
                _ => None,
            }
        };

        CorpusCorrelations {
            length_frequency: spearman(&token_lengths, &token_counts, policy),
            length_occurrences,
            length_variance,
            occurrences_variance: spearman(&occurrence_col, &variance_col, policy),
            steiger,
        }
    }
}

impl Display for CorpusStatistics {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}: {} tokens ({} distinct), {} characters",
            self.language(),
            self.total_tokens(),
            self.token_frequency.len(),
            self.char_frequency.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rstest::{
        fixture,
        rstest,
    };

    use super::*;
    use crate::data_structs::{
        Book,
        BookCollection,
        Chapter,
        Verse,
    };

    fn bible_of(verses: &[&str]) -> Bible {
        let verses = verses
            .iter()
            .enumerate()
            .map(|(i, text)| Verse::new(format!("b.GEN.1.{}", i + 1), text))
            .collect();
        let mut books = BookCollection::new();
        books
            .insert(Book::new("b.GEN", vec![Chapter::new("b.GEN.1", verses)]))
            .unwrap();
        Bible::new(
            CorpusMetadata {
                language:            "Test".to_string(),
                iso639:              "tst".to_string(),
                lang_id:             "Test".to_string(),
                script:              "Latin".to_string(),
                source:              "memory".to_string(),
                reported_word_count: 0,
                reported_byte_count: None,
            },
            books,
        )
    }

    #[fixture]
    fn animals() -> CorpusStatistics {
        CorpusStatistics::try_new(&bible_of(&["The cat sat.", "The dog ran.", "A cat ran!"]))
            .unwrap()
    }

    #[rstest]
    fn test_frequency_tables(animals: CorpusStatistics) {
        assert_eq!(animals.total_tokens(), 9);
        assert_eq!(
            animals.freq_by_length().iter().collect_vec(),
            vec![(&3, &8), (&1, &1)]
        );
        assert_eq!(
            animals.token_frequency().keys().cloned().collect_vec(),
            vec!["the", "cat", "ran", "sat", "dog", "a"]
        );
        assert_eq!(animals.tokens_by_frequency()[&2], vec!["the", "cat", "ran"]);
        assert_eq!(animals.tokens_by_length()[&3].len(), 5);
        assert_eq!(animals.max_length(), 3);
    }

    #[rstest]
    fn test_variance_buckets(animals: CorpusStatistics) {
        let by_length = animals.variance_by_length();
        assert_eq!(by_length.keys().copied().collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(by_length[&0], None);
        // A single token of length 1.
        assert_eq!(by_length[&1], None);
        assert_eq!(by_length[&2], None);
        // Counts 2, 2, 2, 1, 1.
        assert_approx_eq!(by_length[&3].unwrap(), 0.3);

        let by_frequency = animals.variance_by_frequency();
        assert_approx_eq!(by_frequency[&2].unwrap(), 0.0);
        // Lengths 3, 3, 1.
        assert_approx_eq!(by_frequency[&1].unwrap(), 4.0 / 3.0);
    }

    #[rstest]
    fn test_cdf(animals: CorpusStatistics) {
        assert_approx_eq!(animals.cdf(0), 0.0);
        assert_approx_eq!(animals.cdf(1), 1.0 / 9.0);
        assert_approx_eq!(animals.cdf(2), 1.0 / 9.0);
        assert_approx_eq!(animals.cdf(3), 1.0);
        assert_approx_eq!(animals.cdf(10), 1.0);

        let series = animals.cdf_series(5);
        assert_eq!(series.len(), 6);
        assert!(series.windows(2).all(|w| w[0] <= w[1]));
        assert_approx_eq!(series[3], 1.0);
    }

    #[rstest]
    fn test_missing_policies(animals: CorpusStatistics) {
        assert_approx_eq!(
            animals
                .mean_variance_by_length(MissingPolicy::Omit)
                .unwrap(),
            0.3
        );
        assert_approx_eq!(
            animals
                .mean_variance_by_length(MissingPolicy::Zero)
                .unwrap(),
            0.075
        );
    }

    #[rstest]
    fn test_metrics_row(animals: CorpusStatistics) {
        let row = animals.metrics();
        assert_eq!(row[&MetricColumn::TokenCount], Some(9.0));
        assert_eq!(row[&MetricColumn::LengthCount(3)], Some(8.0));
        assert!(!row.contains_key(&MetricColumn::LengthCount(2)));
        assert_eq!(row[&MetricColumn::LengthVariance(0)], None);
        assert!(row.contains_key(&MetricColumn::FrequencyVariance(1)));
        assert_eq!(row.keys().next(), Some(&MetricColumn::TokenCount));
    }

    #[rstest]
    fn test_z_scores(animals: CorpusStatistics) {
        let tokens = animals.token_summary();
        assert_approx_eq!(tokens.mean(), 1.5);
        let z = tokens.z_scores().unwrap();
        assert!(z["the"] > 0.0);
        assert!(z["a"] < 0.0);
        assert_approx_eq!(z.values().sum::<f64>(), 0.0);
        assert_eq!(tokens.z_score(&"unknown".to_string()).unwrap(), None);
    }

    #[test]
    fn test_degenerate_z_scores() {
        // Every token has length 4: one length bucket.
        let stats = CorpusStatistics::try_new(&bible_of(&["lamb lion"])).unwrap();
        assert_eq!(stats.length_summary().variance(), None);
        assert!(matches!(
            stats.length_summary().z_scores(),
            Err(CorpusError::Statistics(_))
        ));
        // Both tokens occur once: zero variance.
        assert_eq!(stats.token_summary().variance(), Some(0.0));
        assert!(stats.token_summary().z_scores().is_err());
    }

    #[test]
    fn test_empty_corpus() {
        let result = CorpusStatistics::try_new(&bible_of(&["", "...", "!"]));
        assert!(matches!(result, Err(CorpusError::Statistics(_))));
    }

    #[rstest]
    fn test_summary(animals: CorpusStatistics) {
        let summary = animals.summary();
        assert_eq!(summary.verses, 3);
        assert_eq!(summary.unique_tokens, 6);
        assert_approx_eq!(summary.mean_token_length, 25.0 / 9.0);
        assert_approx_eq!(summary.type_token_ratio, 6.0 / 9.0);
        let json = serde_json::to_string(summary).unwrap();
        assert!(json.contains("\"language\":\"Test\""));
    }

    #[rstest]
    #[case("QtyOfTokens", MetricColumn::TokenCount)]
    #[case("StrLen_4", MetricColumn::LengthCount(4))]
    #[case("VarFreq_StrLen_12", MetricColumn::LengthVariance(12))]
    #[case("VarStrLen_Freq_3", MetricColumn::FrequencyVariance(3))]
    fn test_metric_column_names(
        #[case] name: &str,
        #[case] column: MetricColumn,
    ) {
        assert_eq!(column.to_string(), name);
        assert_eq!(name.parse::<MetricColumn>().unwrap(), column);
    }

    #[test]
    fn test_metric_column_order() {
        let mut columns = vec![
            MetricColumn::FrequencyVariance(1),
            MetricColumn::LengthVariance(2),
            MetricColumn::LengthCount(10),
            MetricColumn::TokenCount,
            MetricColumn::LengthCount(2),
        ];
        columns.sort();
        assert_eq!(columns, vec![
            MetricColumn::TokenCount,
            MetricColumn::LengthCount(2),
            MetricColumn::LengthCount(10),
            MetricColumn::LengthVariance(2),
            MetricColumn::FrequencyVariance(1),
        ]);
        assert!("StrLen_x".parse::<MetricColumn>().is_err());
    }

    #[test]
    fn test_correlation_columns() {
        let stats = CorpusStatistics::try_new(&bible_of(&[
            "a bb bb ccc ccc ccc dddd dddd dddd dddd",
            "eeeee ee fff gggg gggg hhhhh",
        ]))
        .unwrap();
        let correlations = stats.correlations(MissingPolicy::Omit);
        assert_eq!(
            correlations.values().len(),
            CorpusCorrelations::column_names().len()
        );
        let rho = correlations.length_occurrences.unwrap().coefficient;
        assert!((-1.0..=1.0).contains(&rho));
        assert!(correlations.length_frequency.is_some());
    }
}
