pub use crate::data_structs::{
    Bible,
    Book,
    BookCollection,
    Chapter,
    CorpusMetadata,
    FrequencyMap,
    FrequencySource,
    Testament,
    Verse,
};
pub use crate::error::{
    CorpusError,
    CorpusResult,
};
pub use crate::io::{
    parse_str,
    read_bible,
    write_bible,
};
pub use crate::tools::{
    BatchConfig,
    ControlConfig,
    ControlModel,
    CorpusCorrelations,
    CorpusGroup,
    CorpusMetrics,
    CorpusStatistics,
    MetricColumn,
    MetricTable,
};
pub use crate::utils::MissingPolicy;
