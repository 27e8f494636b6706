use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use log::{
    debug,
    info,
    warn,
};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{
    Deserialize,
    Serialize,
};

use super::group::CorpusGroup;
use super::statistics::CorpusStatistics;
use crate::data_structs::{
    Bible,
    Testament,
};
use crate::error::{
    CorpusError,
    CorpusResult,
};
use crate::io::read_bible;
use crate::utils::stats::MissingPolicy;
use crate::utils::{
    n_threads,
    THREAD_POOL,
};
use crate::with_field_fn;

/// Extension of the documents picked up by [`collect_documents`].
pub const DOCUMENT_EXTENSION: &str = "xml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads. `None` runs on the global pool.
    pub threads:            Option<usize>,
    /// Documents with books of both testaments are reduced to the New
    /// Testament before statistics are computed.
    pub new_testament_only: bool,
    pub policy:             MissingPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads:            None,
            new_testament_only: true,
            policy:             MissingPolicy::default(),
        }
    }
}

/// A document that could not be processed.
#[derive(Debug)]
pub struct BatchFailure {
    pub path:  PathBuf,
    pub error: CorpusError,
}

#[derive(Debug)]
pub struct BatchReport {
    pub group:    CorpusGroup<CorpusStatistics>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.group.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl BatchConfig {
    with_field_fn!(threads, Option<usize>);

    with_field_fn!(new_testament_only, bool);

    with_field_fn!(policy, MissingPolicy);

    /// Applies the testament restriction to a parsed document.
    pub fn restrict(
        &self,
        bible: Bible,
    ) -> CorpusResult<Bible> {
        let books = bible.books();
        if self.new_testament_only
            && books.count_testament(Testament::Old) > 0
            && books.count_testament(Testament::New) > 0
        {
            debug!("Restricting {} to the New Testament", bible.language());
            bible.new_testament()
        }
        else {
            Ok(bible)
        }
    }

    /// Reads one document and computes its statistics.
    pub fn process_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> CorpusResult<CorpusStatistics> {
        let bible = self.restrict(read_bible(path)?)?;
        CorpusStatistics::try_new(&bible)
    }

    pub fn process<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
    ) -> CorpusResult<BatchReport> {
        self.process_with(paths, |_| {})
    }

    /// Processes every document in parallel and merges the results in input
    /// order. `on_done` is called once per document, from worker threads.
    ///
    /// A failing document is logged and recorded in the report. Only a
    /// failure to build the thread pool aborts the batch.
    pub fn process_with<P, F>(
        &self,
        paths: &[P],
        on_done: F,
    ) -> CorpusResult<BatchReport>
    where
        P: AsRef<Path> + Sync,
        F: Fn(&Path) + Sync, {
        debug!(
            "Processing {} documents on {} threads",
            paths.len(),
            self.threads.unwrap_or_else(n_threads)
        );
        let job = || {
            paths
                .par_iter()
                .map(|path| {
                    let path = path.as_ref();
                    let result = self.process_file(path);
                    on_done(path);
                    (path.to_path_buf(), result)
                })
                .collect::<Vec<_>>()
        };
        let results = match self.threads {
            Some(threads) => {
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?
                    .install(job)
            },
            None => THREAD_POOL.install(job),
        };

        let mut group = CorpusGroup::new().with_policy(self.policy);
        let mut failures = Vec::new();
        for (path, result) in results {
            match result.and_then(|stats| group.add(stats)) {
                Ok(()) => debug!("Processed {}", path.display()),
                Err(error) => {
                    warn!("Skipping {}: {}", path.display(), error);
                    failures.push(BatchFailure { path, error });
                },
            }
        }
        info!(
            "Processed {} of {} documents",
            group.len(),
            paths.len()
        );
        Ok(BatchReport { group, failures })
    }

    /// Processes every document of `dir`.
    pub fn process_dir<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> CorpusResult<BatchReport> {
        let paths = collect_documents(dir)?;
        self.process(&paths)
    }
}

/// Documents of `dir` with the [`DOCUMENT_EXTENSION`], sorted by path.
pub fn collect_documents<P: AsRef<Path>>(dir: P) -> CorpusResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))? {
        let path = entry.map_err(|e| CorpusError::io(dir, e))?.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == DOCUMENT_EXTENSION)
        {
            paths.push(path);
        }
    }
    paths.sort();
    debug!("Found {} documents in {}", paths.len(), dir.display());
    Ok(paths)
}
