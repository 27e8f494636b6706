use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use itertools::Itertools;
use log::{
    debug,
    info,
};
use polars::prelude::DataFrame;

use super::statistics::{
    CorpusCorrelations,
    CorpusStatistics,
    MetricColumn,
};
use crate::data_structs::typedef::{
    MetricRow,
    MetricValue,
};
use crate::error::{
    CorpusError,
    CorpusResult,
};
use crate::io::table::{
    drop_null_columns,
    float_column,
    label_column,
    metric_frame,
    read_csv,
    write_csv,
    LABEL_COLUMN,
};
use crate::utils::stats::{
    mean,
    quantile,
    sample_variance,
    spearman,
    Correlation,
    MissingPolicy,
};
use crate::with_field_fn;

pub const STATISTICS_FILE: &str = "statistics.csv";
pub const CORRELATION_MATRIX_FILE: &str = "correlation_matrix.csv";
pub const CORRELATIONS_FILE: &str = "correlations.csv";
pub const SUMMARY_FILE: &str = "summary.csv";

/// A statistics snapshot that can be collected into a [`CorpusGroup`].
pub trait CorpusMetrics {
    /// Row label. Unique within a group.
    fn label(&self) -> &str;

    fn metric_row(&self) -> MetricRow<MetricColumn>;

    fn correlation_row(
        &self,
        policy: MissingPolicy,
    ) -> CorpusCorrelations;
}

impl CorpusMetrics for CorpusStatistics {
    fn label(&self) -> &str {
        self.language()
    }

    fn metric_row(&self) -> MetricRow<MetricColumn> {
        self.metrics()
    }

    fn correlation_row(
        &self,
        policy: MissingPolicy,
    ) -> CorpusCorrelations {
        self.correlations(policy)
    }
}

/// Metric values of several corpora: one row per label, one column per
/// metric. Missing cells are undefined, never zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricTable {
    labels:  Vec<String>,
    columns: BTreeMap<MetricColumn, Vec<MetricValue>>,
}

impl MetricTable {
    /// Builds a table from labelled rows. The columns are the union of the
    /// row keys.
    pub fn from_rows<I, L>(rows: I) -> Self
    where
        I: IntoIterator<Item = (L, MetricRow<MetricColumn>)>,
        L: Into<String>, {
        let rows = rows
            .into_iter()
            .map(|(label, row)| (label.into(), row))
            .collect_vec();
        let headers = rows
            .iter()
            .flat_map(|(_, row)| row.keys().copied())
            .collect::<BTreeSet<_>>();
        let columns = headers
            .into_iter()
            .map(|column| {
                let values = rows
                    .iter()
                    .map(|(_, row)| row.get(&column).copied().flatten())
                    .collect_vec();
                (column, values)
            })
            .collect();
        Self {
            labels: rows.into_iter().map(|(label, _)| label).collect(),
            columns,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Column headers in export order.
    pub fn headers(&self) -> impl Iterator<Item = &MetricColumn> {
        self.columns.keys()
    }

    pub fn column(
        &self,
        column: &MetricColumn,
    ) -> Option<&[MetricValue]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    pub fn height(&self) -> usize {
        self.labels.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The table as a polars frame, without all-null columns.
    pub fn to_dataframe(&self) -> CorpusResult<DataFrame> {
        let columns = self
            .columns
            .iter()
            .map(|(column, values)| (column.to_string(), values.clone()))
            .collect_vec();
        drop_null_columns(&metric_frame(LABEL_COLUMN, &self.labels, &columns)?)
    }

    /// Reads a frame written by [`MetricTable::to_dataframe`].
    pub fn from_dataframe(df: &DataFrame) -> CorpusResult<Self> {
        let labels = label_column(df)?;
        let mut columns = BTreeMap::new();
        for name in df.get_column_names() {
            if name.as_str() == LABEL_COLUMN {
                continue;
            }
            let column = name.as_str().parse::<MetricColumn>()?;
            columns.insert(column, float_column(df, name.as_str())?);
        }
        Ok(Self { labels, columns })
    }

    pub fn write_csv<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> CorpusResult<()> {
        write_csv(&mut self.to_dataframe()?, path)
    }

    pub fn read_csv<P: AsRef<Path>>(path: P) -> CorpusResult<Self> {
        Self::from_dataframe(&read_csv(path)?)
    }

    /// Spearman correlation of two metric columns across corpora.
    pub fn spearman(
        &self,
        x: &MetricColumn,
        y: &MetricColumn,
        policy: MissingPolicy,
    ) -> Option<Correlation> {
        spearman(self.column(x)?, self.column(y)?, policy)
    }

    /// Spearman coefficients between every pair of metric columns. Metrics
    /// whose row would be entirely undefined are dropped from both axes.
    pub fn correlation_matrix(
        &self,
        policy: MissingPolicy,
    ) -> CorpusResult<DataFrame> {
        let headers = self.columns.keys().collect_vec();
        let matrix = headers
            .iter()
            .map(|x| {
                headers
                    .iter()
                    .map(|y| self.spearman(x, y, policy).map(|c| c.coefficient))
                    .collect_vec()
            })
            .collect_vec();

        let kept = (0..headers.len())
            .filter(|&i| matrix[i].iter().any(Option::is_some))
            .collect_vec();
        debug!(
            "Correlation matrix keeps {} of {} metrics",
            kept.len(),
            headers.len()
        );

        let names = kept.iter().map(|&i| headers[i].to_string()).collect_vec();
        let columns = kept
            .iter()
            .map(|&j| {
                let values = kept.iter().map(|&i| matrix[i][j]).collect_vec();
                (headers[j].to_string(), values)
            })
            .collect_vec();
        metric_frame("metric", &names, &columns)
    }

    /// Count, mean, standard deviation, minimum, quartiles and maximum of
    /// the defined values of every column.
    pub fn summary(&self) -> CorpusResult<DataFrame> {
        let statistics = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
            .iter()
            .map(|s| s.to_string())
            .collect_vec();
        let columns = self
            .columns
            .iter()
            .map(|(column, values)| {
                let defined = values.iter().flatten().copied().collect_vec();
                let described = vec![
                    Some(defined.len() as f64),
                    mean(&defined),
                    sample_variance(&defined).map(f64::sqrt),
                    defined.iter().copied().reduce(f64::min),
                    quantile(&defined, 0.25),
                    quantile(&defined, 0.5),
                    quantile(&defined, 0.75),
                    defined.iter().copied().reduce(f64::max),
                ];
                (column.to_string(), described)
            })
            .collect_vec();
        metric_frame("statistic", &statistics, &columns)
    }
}

/// Collection of per-corpus snapshots, kept in insertion order.
#[derive(Debug, Clone)]
pub struct CorpusGroup<S: CorpusMetrics> {
    members: Vec<S>,
    policy:  MissingPolicy,
}

impl<S: CorpusMetrics> Default for CorpusGroup<S> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            policy:  MissingPolicy::default(),
        }
    }
}

impl<S: CorpusMetrics> CorpusGroup<S> {
    with_field_fn!(policy, MissingPolicy);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(&self) -> MissingPolicy {
        self.policy
    }

    /// Appends a snapshot. Fails if its label is already present.
    pub fn add(
        &mut self,
        member: S,
    ) -> CorpusResult<()> {
        if self.get(member.label()).is_some() {
            return Err(CorpusError::AggregationMismatch(format!(
                "corpus '{}' is already part of the group",
                member.label()
            )));
        }
        debug!("Adding {} to group", member.label());
        self.members.push(member);
        Ok(())
    }

    pub fn get(
        &self,
        label: &str,
    ) -> Option<&S> {
        self.members
            .iter()
            .find(|member| member.label() == label)
    }

    pub fn members(&self) -> &[S] {
        &self.members
    }

    pub fn labels(&self) -> Vec<&str> {
        self.members.iter().map(S::label).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Union of the metric columns of all members, in export order.
    pub fn column_headers(&self) -> Vec<MetricColumn> {
        self.members
            .iter()
            .flat_map(|member| member.metric_row().into_keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn table(&self) -> MetricTable {
        MetricTable::from_rows(
            self.members
                .iter()
                .map(|member| (member.label(), member.metric_row())),
        )
    }

    pub fn to_dataframe(&self) -> CorpusResult<DataFrame> {
        self.table().to_dataframe()
    }

    pub fn correlation_matrix(&self) -> CorpusResult<DataFrame> {
        self.table().correlation_matrix(self.policy)
    }

    pub fn summary(&self) -> CorpusResult<DataFrame> {
        self.table().summary()
    }

    /// Within-corpus correlations, one row per member.
    pub fn correlation_table(&self) -> CorpusResult<DataFrame> {
        let rows = self
            .members
            .iter()
            .map(|member| member.correlation_row(self.policy).values())
            .collect_vec();
        let columns = CorpusCorrelations::column_names()
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name, rows.iter().map(|row| row[idx]).collect_vec()))
            .collect_vec();
        let labels = self
            .members
            .iter()
            .map(|member| member.label().to_string())
            .collect_vec();
        metric_frame(LABEL_COLUMN, &labels, &columns)
    }

    /// Writes the metric table, the correlation matrix, the per-corpus
    /// correlations and the summary into `dir`.
    pub fn export<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> CorpusResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| CorpusError::io(dir, e))?;

        let outputs = [
            (STATISTICS_FILE, self.to_dataframe()?),
            (CORRELATION_MATRIX_FILE, self.correlation_matrix()?),
            (CORRELATIONS_FILE, self.correlation_table()?),
            (SUMMARY_FILE, self.summary()?),
        ];

        let mut written = Vec::with_capacity(outputs.len());
        for (name, mut df) in outputs {
            let path = dir.join(name);
            write_csv(&mut df, &path)?;
            written.push(path);
        }
        info!(
            "Exported {} corpora to {}",
            self.members.len(),
            dir.display()
        );
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[derive(Debug, Clone)]
    struct FixedMetrics {
        label: String,
        row:   MetricRow<MetricColumn>,
    }

    impl CorpusMetrics for FixedMetrics {
        fn label(&self) -> &str {
            &self.label
        }

        fn metric_row(&self) -> MetricRow<MetricColumn> {
            self.row.clone()
        }

        fn correlation_row(
            &self,
            _policy: MissingPolicy,
        ) -> CorpusCorrelations {
            CorpusCorrelations::default()
        }
    }

    fn fixed(
        label: &str,
        values: &[(MetricColumn, MetricValue)],
    ) -> FixedMetrics {
        FixedMetrics {
            label: label.to_string(),
            row:   values.iter().copied().collect(),
        }
    }

    fn monotone_group() -> CorpusGroup<FixedMetrics> {
        let mut group = CorpusGroup::new();
        for i in 1..=5 {
            let x = i as f64;
            group
                .add(fixed(&format!("lang{i}"), &[
                    (MetricColumn::TokenCount, Some(100.0 * x)),
                    (MetricColumn::LengthCount(1), Some(x * x)),
                    (MetricColumn::LengthVariance(0), None),
                    (MetricColumn::LengthVariance(1), Some(10.0 - x)),
                ]))
                .unwrap();
        }
        group
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut group = CorpusGroup::new();
        group
            .add(fixed("Latin", &[(MetricColumn::TokenCount, Some(1.0))]))
            .unwrap();
        let err = group
            .add(fixed("Latin", &[(MetricColumn::TokenCount, Some(2.0))]))
            .unwrap_err();
        assert!(matches!(err, CorpusError::AggregationMismatch(_)));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_column_union_and_nulls() {
        let mut group = CorpusGroup::new();
        group
            .add(fixed("A", &[
                (MetricColumn::TokenCount, Some(5.0)),
                (MetricColumn::LengthCount(2), Some(5.0)),
            ]))
            .unwrap();
        group
            .add(fixed("B", &[
                (MetricColumn::TokenCount, Some(7.0)),
                (MetricColumn::LengthCount(4), Some(7.0)),
            ]))
            .unwrap();

        assert_eq!(group.column_headers(), vec![
            MetricColumn::TokenCount,
            MetricColumn::LengthCount(2),
            MetricColumn::LengthCount(4),
        ]);
        let table = group.table();
        assert_eq!(
            table.column(&MetricColumn::LengthCount(2)).unwrap(),
            &[Some(5.0), None]
        );
        assert_eq!(group.labels(), vec!["A", "B"]);
    }

    #[test]
    fn test_monotone_spearman() {
        let table = monotone_group().table();
        let up = table
            .spearman(
                &MetricColumn::TokenCount,
                &MetricColumn::LengthCount(1),
                MissingPolicy::Omit,
            )
            .unwrap();
        assert_approx_eq!(up.coefficient, 1.0);
        assert_eq!(up.n, 5);
        let down = table
            .spearman(
                &MetricColumn::TokenCount,
                &MetricColumn::LengthVariance(1),
                MissingPolicy::Omit,
            )
            .unwrap();
        assert_approx_eq!(down.coefficient, -1.0);
    }

    #[test]
    fn test_dataframe_drops_null_columns() {
        let df = monotone_group().to_dataframe().unwrap();
        let names = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect_vec();
        assert_eq!(names, vec![
            LABEL_COLUMN,
            "QtyOfTokens",
            "StrLen_1",
            "VarFreq_StrLen_1"
        ]);
        assert_eq!(df.height(), 5);
    }

    #[test]
    fn test_correlation_matrix_drops_undefined() {
        let df = monotone_group().correlation_matrix().unwrap();
        // VarFreq_StrLen_0 is never defined.
        assert_eq!(df.shape(), (3, 4));
        let diagonal = float_column(&df, "QtyOfTokens").unwrap();
        assert_approx_eq!(diagonal[0].unwrap(), 1.0);
        assert_approx_eq!(diagonal[2].unwrap(), -1.0);
    }

    #[test]
    fn test_summary_frame() {
        let df = monotone_group().summary().unwrap();
        assert_eq!(df.height(), 8);
        let statistics = df
            .column("statistic")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|s| s.unwrap().to_string())
            .collect_vec();
        assert_eq!(statistics, vec![
            "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        ]);
        let tokens = float_column(&df, "QtyOfTokens").unwrap();
        assert_eq!(tokens[0], Some(5.0));
        assert_approx_eq!(tokens[1].unwrap(), 300.0);
        assert_approx_eq!(tokens[3].unwrap(), 100.0);
        assert_approx_eq!(tokens[4].unwrap(), 200.0);
        assert_approx_eq!(tokens[5].unwrap(), 300.0);
        assert_approx_eq!(tokens[6].unwrap(), 400.0);
        assert_approx_eq!(tokens[7].unwrap(), 500.0);
        let squares = float_column(&df, "StrLen_1").unwrap();
        assert_approx_eq!(squares[4].unwrap(), 4.0);
        assert_approx_eq!(squares[5].unwrap(), 9.0);
        assert_approx_eq!(squares[6].unwrap(), 16.0);
        let empty = float_column(&df, "VarFreq_StrLen_0").unwrap();
        assert_eq!(empty[0], Some(0.0));
        assert_eq!(empty[1], None);
    }

    #[test]
    fn test_table_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATISTICS_FILE);
        let table = monotone_group().table();
        table.write_csv(&path).unwrap();

        let read = MetricTable::read_csv(&path).unwrap();
        assert_eq!(read.labels(), table.labels());
        assert_eq!(
            read.column(&MetricColumn::TokenCount),
            table.column(&MetricColumn::TokenCount)
        );
        // The all-null column is not exported.
        assert_eq!(read.column(&MetricColumn::LengthVariance(0)), None);
    }

    #[test]
    fn test_export_writes_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let written = monotone_group().export(dir.path().join("out")).unwrap();
        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|path| path.exists()));

        let correlations = read_csv(dir.path().join("out").join(CORRELATIONS_FILE)).unwrap();
        assert_eq!(correlations.height(), 5);
        assert_eq!(
            correlations.width(),
            CorpusCorrelations::column_names().len() + 1
        );
    }
}
