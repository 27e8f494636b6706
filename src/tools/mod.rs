//! Analyses built on top of parsed corpora.
//!
//! - [`statistics`]: per-corpus derived tables and correlations.
//! - [`group`]: cross-corpus metric tables and their CSV exports.
//! - [`control`]: randomized control corpora.
//! - [`batch`]: parallel processing of a directory of documents.

pub mod batch;
pub mod control;
pub mod group;
pub mod statistics;

pub use batch::{
    collect_documents,
    BatchConfig,
    BatchFailure,
    BatchReport,
};
pub use control::{
    ControlConfig,
    ControlModel,
};
pub use group::{
    CorpusGroup,
    CorpusMetrics,
    MetricTable,
};
pub use statistics::{
    CorpusCorrelations,
    CorpusStatistics,
    CorpusSummary,
    DistributionSummary,
    MetricColumn,
};
