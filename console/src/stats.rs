use std::path::PathBuf;

use anyhow::anyhow;
use bible_corpus::prelude::*;
use bible_corpus::tools::group::STATISTICS_FILE;
use clap::{
    Args,
    ValueEnum,
};
use console::style;
use dialoguer::Confirm;
use log::info;

use crate::utils::{
    expand_wildcards,
    validate_input,
    validate_output_dir,
    UtilsArgs,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum CliMissingPolicy {
    /// Drop undefined values before combining vectors.
    Omit,
    /// Replace undefined values with zero.
    Zero,
}

impl From<CliMissingPolicy> for MissingPolicy {
    fn from(value: CliMissingPolicy) -> Self {
        match value {
            CliMissingPolicy::Omit => MissingPolicy::Omit,
            CliMissingPolicy::Zero => MissingPolicy::Zero,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct StatsArgs {
    #[arg(
        value_parser,
        num_args=1..,
        required = true,
        help = "Paths to cesDoc files or directories containing them. Wildcards are expanded."
    )]
    inputs: Vec<String>,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Directory for the exported tables."
    )]
    output: PathBuf,
    #[arg(
        short,
        long,
        required = false,
        default_value_t = false,
        help = "Overwrite existing tables without asking."
    )]
    force:  bool,

    #[clap(
        short,
        long,
        value_enum,
        default_value_t = CliMissingPolicy::Omit,
        help_heading = "STATISTICS ARGS",
        help = "Treatment of undefined variances when correlating metric columns."
    )]
    missing:   CliMissingPolicy,
    #[arg(
        long,
        default_value_t = false,
        help_heading = "STATISTICS ARGS",
        help = "Keep the Old Testament of documents that contain both testaments. \
                By default such documents are reduced to the New Testament."
    )]
    all_books: bool,
}

impl StatsArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let paths = expand_wildcards(&self.inputs)?;
        if paths.is_empty() {
            return Err(anyhow!("No input documents found"));
        }
        for path in paths.iter() {
            validate_input(path)?;
        }
        validate_output_dir(&self.output)?;

        if !self.force && self.output.join(STATISTICS_FILE).exists() {
            let prompt = format!(
                "Tables in {} will be overwritten. Continue?",
                self.output.display()
            );
            let confirmed = Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .unwrap_or(false);
            if !confirmed {
                println!("{}", style("Process aborted by the user.").red());
                return Err(anyhow!("User aborted the process."));
            }
        }

        let config = BatchConfig::default()
            .with_threads(utils.threads())
            .with_new_testament_only(!self.all_books)
            .with_policy(self.missing.into());
        info!("Processing {} documents with {:?}", paths.len(), config);

        let pbar = utils.pbar(paths.len())?;
        let report = config.process_with(&paths, |_| pbar.inc(1))?;
        pbar.finish_with_message("Done.");

        for failure in report.failures.iter() {
            eprintln!(
                "{} {}: {}",
                style("Skipped").yellow(),
                failure.path.display(),
                failure.error
            );
        }
        if report.group.is_empty() {
            return Err(anyhow!("None of the {} documents could be processed", paths.len()));
        }

        let written = report.group.export(&self.output)?;
        println!(
            "Processed {} of {} documents.",
            style(report.processed()).green(),
            paths.len()
        );
        for path in written {
            println!("Wrote {}", style(path.display()).green());
        }
        Ok(())
    }
}
