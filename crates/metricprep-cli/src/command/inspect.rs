//! Column inspection command
//!
//! Prints the distribution of every feature column of a CSV, e.g. to
//! compare a generated training set against its test set.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use metricprep_preprocess::{
    csv_io,
    profile::{self, ColumnProfile},
};

use crate::util::{self, STDOUT_PATH};

#[derive(Debug, Clone, Args)]
pub(crate) struct InspectArg {
    /// Path to the CSV file to inspect
    pub input: PathBuf,

    /// Name of the timestamp column [default: first column]
    #[arg(long)]
    pub timestamp_col: Option<String>,

    /// Print profiles as JSON instead of a text table
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let table = csv_io::read_metric_table(&arg.input, arg.timestamp_col.as_deref())
        .with_context(|| format!("Failed to load {}", arg.input.display()))?;
    let profiles = profile::profile_table(&table);

    if arg.json {
        util::write_json(&profiles, Path::new(STDOUT_PATH))?;
        return Ok(());
    }

    println!("{} ({} rows)", arg.input.display(), table.len());
    println!("Timestamp column: {}\n", table.timestamp_name);
    print_profile_table(&profiles);
    Ok(())
}

const LABEL_WIDTH: usize = 24;

fn print_profile_table(profiles: &[ColumnProfile]) {
    println!(
        "  {:<LABEL_WIDTH$} {:>8} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Column", "Count", "Missing", "Min", "Q1", "Median", "Q3", "Max", "Mean", "Std"
    );
    // label + 2 counts(8) + 7 stats(10) + spaces(9)
    println!("  {}", "-".repeat(LABEL_WIDTH + 2 * 8 + 7 * 10 + 9));
    for profile in profiles {
        print!(
            "  {:<LABEL_WIDTH$} {:>8} {:>8}",
            profile.name, profile.count, profile.missing
        );
        match &profile.summary {
            Some(s) => println!(
                " {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
                s.min, s.q1, s.median, s.q3, s.max, s.mean, s.std_dev
            ),
            None => println!(" {:>10}", "N/A"),
        }
    }
}
