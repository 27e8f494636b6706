use std::path::PathBuf;

use bible_corpus::exports::serde_json;
use bible_corpus::prelude::*;
use bible_corpus::utils::format_metric;
use clap::{
    Args,
    ValueEnum,
};
use console::style;
use itertools::Itertools;

use crate::stats::CliMissingPolicy;
use crate::utils::{
    validate_input,
    UtilsArgs,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum CliTestament {
    Old,
    New,
}

impl From<CliTestament> for Testament {
    fn from(value: CliTestament) -> Self {
        match value {
            CliTestament::Old => Testament::Old,
            CliTestament::New => Testament::New,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct InspectArgs {
    #[arg(required = true, help = "Path to a cesDoc file.")]
    input:     PathBuf,
    #[arg(
        short,
        long,
        value_enum,
        help = "Restrict the document to one testament."
    )]
    testament: Option<CliTestament>,
    #[arg(
        short = 'n',
        long,
        default_value_t = 20,
        help = "Number of most frequent tokens to show."
    )]
    top:       usize,
    #[arg(
        long,
        default_value_t = false,
        help = "Print the corpus summary as JSON."
    )]
    json:      bool,
    #[clap(
        short,
        long,
        value_enum,
        default_value_t = CliMissingPolicy::Omit,
        help = "Treatment of undefined variances in the correlations."
    )]
    missing:   CliMissingPolicy,
}

impl InspectArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        validate_input(&self.input)?;
        let mut bible = read_bible(&self.input)?;
        if let Some(testament) = self.testament {
            bible = bible.testament(testament.into())?;
        }
        let stats = CorpusStatistics::try_new(&bible)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(stats.summary())?);
            return Ok(());
        }

        println!("{}", style(&stats).bold());
        println!(
            "{} books, {} chapters, {} verses",
            bible.len(),
            bible.chapter_count(),
            bible.verse_count()
        );

        println!("\n{}", style("Most frequent tokens").cyan());
        for (token, count) in stats.token_frequency().most_common(self.top) {
            println!("{:>20} {:>10}", token, count);
        }

        println!("\n{}", style("Token length").cyan());
        println!(
            "{:>6} {:>10} {:>8} {:>14}",
            "length", "tokens", "cdf", "var(freq)"
        );
        let cdf = stats.cdf_series(stats.max_length());
        for (length, variance) in stats.variance_by_length().iter() {
            println!(
                "{:>6} {:>10} {:>8.4} {:>14}",
                length,
                stats.freq_by_length().get(length),
                cdf[*length],
                format_metric(*variance)
            );
        }

        println!("\n{}", style("Correlations").cyan());
        let correlations = stats.correlations(self.missing.into());
        let rows = CorpusCorrelations::column_names()
            .into_iter()
            .zip(correlations.values())
            .map(|(name, value)| format!("{:>16} {}", name, format_metric(value)))
            .join("\n");
        println!("{}", rows);
        Ok(())
    }
}
