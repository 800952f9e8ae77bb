//! End-to-end preprocessing run
//!
//! [`Preprocessor::run`] reads the input CSV, normalizes it, splits off the
//! fault-window test set, fences the remaining rows and writes
//! `<prefix>_train.csv` and `<prefix>_test.csv`. Both tables are fully
//! computed before anything touches the filesystem, so a validation failure
//! never leaves a half-written pair of outputs behind. A failure while
//! writing the test file can still leave the training file in place.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    csv_io,
    error::PreprocessError,
    normalization::{self, ColumnScaling},
    outlier::{DEFAULT_EPSILON, DEFAULT_K, FenceSet, IqrFilter},
    split::{self, FAULT_LABEL, FaultWindow, NORMAL_LABEL},
    table::{FeatureFrame, LabeledFrame, MetricTable},
};

/// Parameters of a preprocessing run.
///
/// Every field has a default, so a JSON config only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreprocessConfig {
    /// Timestamp column name; the first column when `None`
    pub timestamp_col: Option<String>,
    /// Minimum IQR for a feature to be used for fencing
    pub epsilon: f64,
    /// IQR multiplier for the fence width
    pub k: f64,
    pub fault_window: FaultWindow,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            timestamp_col: None,
            epsilon: DEFAULT_EPSILON,
            k: DEFAULT_K,
            fault_window: FaultWindow::default(),
        }
    }
}

impl PreprocessConfig {
    #[must_use]
    pub fn iqr_filter(&self) -> IqrFilter {
        IqrFilter {
            epsilon: self.epsilon,
            k: self.k,
        }
    }
}

/// Locations of the two output files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub train: PathBuf,
    pub test: PathBuf,
}

/// Derives `<prefix>_train.csv` and `<prefix>_test.csv`.
///
/// ```
/// # use std::path::Path;
/// # use metricprep_preprocess::pipeline::output_paths;
/// let paths = output_paths(Path::new("out/run1"));
/// assert_eq!(paths.train, Path::new("out/run1_train.csv"));
/// assert_eq!(paths.test, Path::new("out/run1_test.csv"));
/// ```
#[must_use]
pub fn output_paths(prefix: &Path) -> OutputPaths {
    let with_suffix = |suffix: &str| {
        let mut path = OsString::from(prefix.as_os_str());
        path.push(suffix);
        PathBuf::from(path)
    };
    OutputPaths {
        train: with_suffix("_train.csv"),
        test: with_suffix("_test.csv"),
    }
}

/// Row counts at each stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub input: usize,
    pub test_normal: usize,
    pub test_fault: usize,
    pub candidates: usize,
    pub train: usize,
    pub removed: usize,
}

/// In-memory result of preprocessing a table.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDataset {
    pub train: FeatureFrame,
    pub test: LabeledFrame,
    pub scaling: Vec<ColumnScaling>,
    pub fences: FenceSet,
    pub rows: RowCounts,
}

/// Machine-readable record of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessSummary {
    pub generated_at: DateTime<Utc>,
    pub input: PathBuf,
    pub outputs: OutputPaths,
    pub timestamp_column: String,
    pub config: PreprocessConfig,
    pub rows: RowCounts,
    pub scaling: Vec<ColumnScaling>,
    pub fences: FenceSet,
}

/// Tables written by a run, plus its summary.
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    pub train: FeatureFrame,
    pub test: LabeledFrame,
    pub summary: PreprocessSummary,
}

#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    #[must_use]
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Normalizes, splits and filters an already loaded table.
    pub fn prepare(&self, table: &MetricTable) -> Result<PreparedDataset, PreprocessError> {
        // Fail on short tables before doing any per-column work.
        self.config.fault_window.validate(table.len())?;

        let (frame, scaling) = normalization::normalize_table(table);

        let split = split::split(&frame, self.config.fault_window)?;
        let fences = self.config.iqr_filter().fit(&split.candidates);
        let outcome = fences.apply(&split.candidates);

        let rows = RowCounts {
            input: table.len(),
            test_normal: split.test.count_label(NORMAL_LABEL),
            test_fault: split.test.count_label(FAULT_LABEL),
            candidates: split.candidates.len(),
            train: outcome.kept.len(),
            removed: outcome.removed_rows.len(),
        };
        tracing::info!(
            candidates = rows.candidates,
            train = rows.train,
            removed = rows.removed,
            valid_columns = fences.valid_columns().count(),
            "filtered training candidates"
        );

        Ok(PreparedDataset {
            train: outcome.kept,
            test: split.test,
            scaling,
            fences,
            rows,
        })
    }

    /// Runs the whole pipeline from `input` to the two files under
    /// `output_prefix`.
    pub fn run(
        &self,
        input: &Path,
        output_prefix: &Path,
    ) -> Result<PreprocessOutput, PreprocessError> {
        tracing::info!(input = %input.display(), "reading metrics table");
        let table = csv_io::read_metric_table(input, self.config.timestamp_col.as_deref())?;
        tracing::info!(
            rows = table.len(),
            features = table.features.len(),
            timestamp = %table.timestamp_name,
            "loaded metrics table"
        );

        let prepared = self.prepare(&table)?;

        let outputs = output_paths(output_prefix);
        // A prefix such as `out/run/` names a directory, so ask the output
        // file for its parent rather than the prefix.
        if let Some(dir) = outputs.train.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| PreprocessError::CreateOutputDir {
                path: dir.to_owned(),
                source,
            })?;
        }
        csv_io::write_frame(&outputs.train, &prepared.train)?;
        tracing::info!(path = %outputs.train.display(), rows = prepared.train.len(), "saved training set");
        csv_io::write_labeled(&outputs.test, &prepared.test)?;
        tracing::info!(path = %outputs.test.display(), rows = prepared.test.len(), "saved test set");

        let summary = PreprocessSummary {
            generated_at: Utc::now(),
            input: input.to_owned(),
            outputs,
            timestamp_column: table.timestamp_name,
            config: self.config.clone(),
            rows: prepared.rows,
            scaling: prepared.scaling,
            fences: prepared.fences,
        };
        Ok(PreprocessOutput {
            train: prepared.train,
            test: prepared.test,
            summary,
        })
    }
}

/// Convenience wrapper around [`Preprocessor::run`].
pub fn preprocess(
    input: &Path,
    output_prefix: &Path,
    config: &PreprocessConfig,
) -> Result<PreprocessOutput, PreprocessError> {
    Preprocessor::new(config.clone()).run(input, output_prefix)
}
