use std::collections::BTreeMap;

/// Occurrence count of a token or character.
pub type CountType = u64;
/// Token length in Unicode scalar values.
pub type LengthType = usize;
/// Value of a derived metric. `None` marks an undefined value.
pub type MetricValue = Option<f64>;

/// Named metric values of one corpus, ordered by column.
pub type MetricRow<C> = BTreeMap<C, MetricValue>;
