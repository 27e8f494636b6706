use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading, aggregating and exporting corpora.
///
/// Parse and schema errors are fatal for one document only; batch drivers
/// log them and continue with the next document.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Required metadata is absent or the document is structurally broken.
    #[error("parse error in {source_name}: {reason}")]
    Parse {
        source_name: String,
        reason:      String,
    },

    /// A quantity is undefined for the given distribution.
    #[error("undefined statistic: {0}")]
    Statistics(String),

    /// A book code is unknown or a collection slot is already occupied.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// A corpus group rejected an element.
    #[error("aggregation mismatch: {0}")]
    AggregationMismatch(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),

    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CorpusError {
    pub(crate) fn parse<S: Into<String>, R: Into<String>>(
        source_name: S,
        reason: R,
    ) -> Self {
        CorpusError::Parse {
            source_name: source_name.into(),
            reason:      reason.into(),
        }
    }

    pub(crate) fn io<P: Into<PathBuf>>(
        path: P,
        source: std::io::Error,
    ) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for CorpusError {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        CorpusError::Xml(quick_xml::Error::InvalidAttr(value))
    }
}

pub type CorpusResult<T> = Result<T, CorpusError>;
