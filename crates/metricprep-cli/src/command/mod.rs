use clap::{Parser, Subcommand};

use self::{inspect::InspectArg, preprocess::PreprocessArg};

mod inspect;
mod preprocess;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Normalize a metrics CSV and split it into train/test sets
    Preprocess(#[clap(flatten)] PreprocessArg),
    /// Print per-column distribution statistics of a CSV
    Inspect(#[clap(flatten)] InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Preprocess(arg) => preprocess::run(&arg)?,
        Mode::Inspect(arg) => inspect::run(&arg)?,
    }
    Ok(())
}
