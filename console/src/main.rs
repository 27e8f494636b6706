mod generate;
mod inspect;
mod stats;
mod utils;

use clap::{
    Parser,
    Subcommand,
};
use generate::GenerateArgs;
use inspect::InspectArgs;
use stats::StatsArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Compute statistics for many documents and export the tables.
    Stats {
        #[clap(flatten)]
        args:  StatsArgs,
        #[clap(flatten)]
        utils: UtilsArgs,
    },
    /// Print the statistics of one document.
    Inspect {
        #[clap(flatten)]
        args:  InspectArgs,
        #[clap(flatten)]
        utils: UtilsArgs,
    },
    /// Write randomized control corpora.
    Generate {
        #[clap(flatten)]
        args:  GenerateArgs,
        #[clap(flatten)]
        utils: UtilsArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Stats { args, utils } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Inspect { args, utils } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Generate { args, utils } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
