//! Preprocessing command
//!
//! Runs the full pipeline on one metrics CSV and writes
//! `<OUTPUT_PREFIX>_train.csv` and `<OUTPUT_PREFIX>_test.csv`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use metricprep_preprocess::pipeline::{self, PreprocessConfig};

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct PreprocessArg {
    /// Path to the input metrics CSV
    pub input: PathBuf,

    /// Output path prefix (without suffix)
    pub output_prefix: PathBuf,

    /// Name of the timestamp column [default: first column]
    #[arg(long)]
    pub timestamp_col: Option<String>,

    /// Minimum IQR for a feature to take part in outlier fencing [default: 1e-6]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// IQR multiplier for the outlier fence [default: 1.5]
    #[arg(long)]
    pub k: Option<f64>,

    /// First row (0-based) of the fault window [default: 104]
    #[arg(long)]
    pub fault_start: Option<usize>,

    /// Number of rows in the fault window [default: 13]
    #[arg(long)]
    pub fault_len: Option<usize>,

    /// JSON config file; command-line options override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run summary to this path (`-` for stdout)
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl PreprocessArg {
    fn resolve_config(&self) -> anyhow::Result<PreprocessConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<PreprocessConfig>("config", path)?,
            None => PreprocessConfig::default(),
        };
        if let Some(name) = &self.timestamp_col {
            config.timestamp_col = Some(name.clone());
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(start) = self.fault_start {
            config.fault_window.start = start;
        }
        if let Some(len) = self.fault_len {
            config.fault_window.len = len;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &PreprocessArg) -> anyhow::Result<()> {
    let config = arg.resolve_config()?;
    tracing::debug!(?config, "resolved preprocessing config");

    let output = pipeline::preprocess(&arg.input, &arg.output_prefix, &config)
        .with_context(|| format!("Failed to preprocess {}", arg.input.display()))?;

    if let Some(path) = &arg.summary {
        util::write_json(&output.summary, path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fmt::Write as _, fs};

    use clap::Parser;
    use metricprep_preprocess::split::FaultWindow;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        arg: PreprocessArg,
    }

    fn parse(args: &[&str]) -> PreprocessArg {
        TestCli::try_parse_from(std::iter::once("metricprep").chain(args.iter().copied()))
            .unwrap()
            .arg
    }

    #[test]
    fn test_defaults_without_flags() {
        let arg = parse(&["in.csv", "out/run"]);
        assert_eq!(arg.resolve_config().unwrap(), PreprocessConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"timestamp_col": "Time", "k": 3.0, "fault_window": {"start": 40, "len": 10}}"#,
        )
        .unwrap();

        let arg = parse(&[
            "in.csv",
            "out",
            "--config",
            config_path.to_str().unwrap(),
            "--k",
            "2.0",
            "--fault-len",
            "5",
        ]);
        let config = arg.resolve_config().unwrap();
        assert_eq!(config.timestamp_col.as_deref(), Some("Time"));
        assert_eq!(config.k, 2.0);
        assert_eq!(config.fault_window, FaultWindow { start: 40, len: 5 });
    }

    #[test]
    fn test_run_writes_outputs_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("metrics.csv");
        let mut csv = String::from("Time,cpu,mem\n");
        for i in 0..150 {
            writeln!(csv, "{i},{},{}", i % 11, (i * 7) % 13).unwrap();
        }
        fs::write(&input, csv).unwrap();

        let prefix = dir.path().join("out").join("run");
        let summary = dir.path().join("summary.json");
        let arg = parse(&[
            input.to_str().unwrap(),
            prefix.to_str().unwrap(),
            "--summary",
            summary.to_str().unwrap(),
        ]);
        run(&arg).unwrap();

        assert!(dir.path().join("out/run_train.csv").is_file());
        assert!(dir.path().join("out/run_test.csv").is_file());
        let summary: serde_json::Value = util::read_json_file("summary", &summary).unwrap();
        assert_eq!(summary["rows"]["input"], 150);
        assert_eq!(summary["timestamp_column"], "Time");
    }

    #[test]
    fn test_run_reports_short_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("metrics.csv");
        fs::write(&input, "Time,cpu\n0,1\n1,2\n").unwrap();
        let arg = parse(&[input.to_str().unwrap(), dir.path().join("out").to_str().unwrap()]);

        let err = run(&arg).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("Failed to preprocess"));
        assert!(chain.contains("requires at least 117"));
    }
}
