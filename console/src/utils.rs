use std::path::{
    Path,
    PathBuf,
};

use anyhow::anyhow;
use bible_corpus::tools::collect_documents;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        long,
        default_value_t = 0,
        help_heading = "UTILS",
        help = "Number of threads to use. 0 uses every available core."
    )]
    pub threads:  usize,
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help_heading = "UTILS",
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)."
    )]
    pub verbose:  u8,
    #[arg(
        long,
        default_value_t = false,
        help_heading = "UTILS",
        help = "Display a progress bar."
    )]
    pub progress: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        init_logger(self.verbose)
    }

    /// Thread count for the batch driver. `None` keeps the library pool.
    pub fn threads(&self) -> Option<usize> {
        (self.threads > 0).then_some(self.threads)
    }

    /// Progress bar over `total` items, hidden unless requested.
    pub fn pbar(
        &self,
        total: usize,
    ) -> anyhow::Result<ProgressBar> {
        if self.progress {
            init_pbar(total)
        }
        else {
            Ok(ProgressBar::hidden())
        }
    }
}

pub(crate) fn init_logger(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

pub(crate) fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}, ETA: {eta}] \
                 [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}",
            )?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Processing...");
    Ok(progress_bar)
}

/// Expands wildcards and directories into document paths.
///
/// Directories contribute every document they contain. Patterns matching
/// nothing are reported and skipped.
pub(crate) fn expand_wildcards(paths: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut expanded_paths = Vec::new();

    for path in paths {
        if path.contains('*') || path.contains('?') {
            let mut matched = 0;
            for entry in glob(path)?.filter_map(Result::ok) {
                expanded_paths.push(entry);
                matched += 1;
            }
            if matched == 0 {
                eprintln!("Pattern {} matched no files.", style(path).yellow());
            }
        }
        else if Path::new(path).is_dir() {
            expanded_paths.extend(collect_documents(path)?);
        }
        else {
            expanded_paths.push(PathBuf::from(path));
        }
    }

    Ok(expanded_paths)
}

pub(crate) fn validate_input(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        return Err(anyhow!("Path {} does not exist.", style(path.display()).red()));
    }
    if !path.is_file() {
        return Err(anyhow!("Path {} is not a file.", style(path.display()).red()));
    }
    Ok(())
}

pub(crate) fn validate_output_dir(path: &Path) -> anyhow::Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(anyhow!(
            "Output path {} is not a directory.",
            style(path.display()).red()
        ));
    }
    Ok(())
}
