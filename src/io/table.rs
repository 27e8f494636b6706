use std::fs::File;
use std::path::{
    Path,
    PathBuf,
};

use log::{
    debug,
    info,
};
use polars::prelude::*;

use crate::data_structs::typedef::MetricValue;
use crate::error::{
    CorpusError,
    CorpusResult,
};

/// Name of the first column of every exported table.
pub const LABEL_COLUMN: &str = "language";

/// Builds a table with a string label column followed by nullable float
/// columns, in the given order.
pub fn metric_frame<S: AsRef<str>>(
    label_header: &str,
    labels: &[String],
    columns: &[(S, Vec<MetricValue>)],
) -> CorpusResult<DataFrame> {
    let mut frame_columns = Vec::with_capacity(columns.len() + 1);
    frame_columns.push(Column::new(label_header.into(), labels.to_vec()));
    for (name, values) in columns {
        if values.len() != labels.len() {
            return Err(CorpusError::AggregationMismatch(format!(
                "column {} has {} values for {} rows",
                name.as_ref(),
                values.len(),
                labels.len()
            )));
        }
        frame_columns.push(Column::new(name.as_ref().into(), values.clone()));
    }
    Ok(DataFrame::new(frame_columns)?)
}

/// Removes the columns whose every value is null. Empty tables are returned
/// unchanged.
pub fn drop_null_columns(df: &DataFrame) -> CorpusResult<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let kept = df
        .get_columns()
        .iter()
        .filter(|column| column.null_count() < column.len())
        .cloned()
        .collect::<Vec<_>>();
    let dropped = df.width() - kept.len();
    if dropped > 0 {
        debug!("Dropping {} all-null columns", dropped);
    }
    Ok(DataFrame::new(kept)?)
}

/// Values of a numeric column, cast to `f64`. Nulls stay undefined.
pub fn float_column(
    df: &DataFrame,
    name: &str,
) -> CorpusResult<Vec<MetricValue>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Values of the label column.
pub fn label_column(df: &DataFrame) -> CorpusResult<Vec<String>> {
    let series = df
        .column(LABEL_COLUMN)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|label| label.unwrap_or_default().to_string())
        .collect())
}

/// Writes `df` as comma separated values with a header line.
pub fn write_csv<P: AsRef<Path>>(
    df: &mut DataFrame,
    path: P,
) -> CorpusResult<()> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| CorpusError::io(path, e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;
    info!(
        "Wrote table with {} rows and {} columns to {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(())
}

/// Reads a table written by [`write_csv`].
pub fn read_csv<P: AsRef<Path>>(path: P) -> CorpusResult<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorpusError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "table does not exist"),
        ));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()?;
    debug!("Read table {:?} from {}", df.shape(), path.display());
    Ok(df)
}
