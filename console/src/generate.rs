use std::path::PathBuf;

use anyhow::anyhow;
use bible_corpus::prelude::*;
use clap::{
    Args,
    ValueEnum,
};
use console::style;
use log::warn;
use rayon::prelude::*;

use crate::utils::{
    expand_wildcards,
    validate_output_dir,
    UtilsArgs,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum CliControlModel {
    /// Replace every word character, keeping the layout of each verse.
    Scramble,
    /// Redraw token lengths from a geometric distribution.
    Geometric,
}

impl From<CliControlModel> for ControlModel {
    fn from(value: CliControlModel) -> Self {
        match value {
            CliControlModel::Scramble => ControlModel::Scramble,
            CliControlModel::Geometric => ControlModel::GeometricLength,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GenerateArgs {
    #[arg(
        value_parser,
        num_args=1..,
        required = true,
        help = "Paths to cesDoc files or directories containing them. Wildcards are expanded."
    )]
    inputs:        Vec<String>,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Directory for the generated documents."
    )]
    output:        PathBuf,
    #[clap(
        short,
        long,
        value_enum,
        default_value_t = CliControlModel::Scramble,
        help = "Null model used to generate the control corpus."
    )]
    model:         CliControlModel,
    #[arg(
        short,
        long,
        help = "Seed of the random generator. Each document uses the same seed."
    )]
    seed:          Option<u64>,
    #[arg(
        long,
        default_value_t = false,
        help = "Treat the space as a member of the alphabet (scramble model only)."
    )]
    space_as_char: bool,
}

impl GenerateArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let paths = expand_wildcards(&self.inputs)?;
        if paths.is_empty() {
            return Err(anyhow!("No input documents found"));
        }
        validate_output_dir(&self.output)?;

        let config = ControlConfig::default()
            .with_model(self.model.into())
            .with_seed(self.seed)
            .with_space_as_char(self.space_as_char);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(utils.threads)
            .build()?;
        let pbar = utils.pbar(paths.len())?;
        let results = pool.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    let result = read_bible(path).and_then(|bible| config.write(&bible, &self.output));
                    pbar.inc(1);
                    (path, result)
                })
                .collect::<Vec<_>>()
        });
        pbar.finish_with_message("Done.");

        let mut failed = 0;
        for (path, result) in results {
            match result {
                Ok(written) => println!("Wrote {}", style(written.display()).green()),
                Err(e) => {
                    warn!("Failed to generate control for {}: {}", path.display(), e);
                    eprintln!("{} {}: {}", style("Skipped").yellow(), path.display(), e);
                    failed += 1;
                },
            }
        }
        if failed == paths.len() {
            return Err(anyhow!("No control corpus could be generated"));
        }
        Ok(())
    }
}
