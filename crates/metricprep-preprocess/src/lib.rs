//! Preparation of time-series metrics for anomaly-detection experiments.
//!
//! This crate turns a single metrics CSV (one timestamp column plus numeric
//! feature columns) into a training set and a labeled test set.
//!
//! # Pipeline
//!
//! 1. **Load** the CSV into a [`MetricTable`](table::MetricTable) ([`csv_io`])
//! 2. **Clean and normalize** each feature column: mean imputation of missing
//!    cells, then min-max scaling into `[0, 1]` ([`normalization`])
//! 3. **Split** around a fixed fault window: the fault rows (label 1) and the
//!    equally long run of rows before them (label 0) form the test set; the
//!    rest become training candidates ([`split`])
//! 4. **Filter** training candidates with per-column Tukey fences, skipping
//!    near-constant columns ([`outlier`])
//! 5. **Write** `<prefix>_train.csv` and `<prefix>_test.csv` ([`pipeline`])
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use metricprep_preprocess::pipeline::{PreprocessConfig, preprocess};
//!
//! let config = PreprocessConfig {
//!     timestamp_col: Some("Time".to_owned()),
//!     ..PreprocessConfig::default()
//! };
//! let output = preprocess(Path::new("metrics.csv"), Path::new("out/run"), &config)?;
//! println!(
//!     "train: {} rows, test: {} rows",
//!     output.train.len(),
//!     output.test.len()
//! );
//! # Ok::<(), metricprep_preprocess::PreprocessError>(())
//! ```

pub mod csv_io;
mod error;
pub mod normalization;
pub mod outlier;
pub mod pipeline;
pub mod profile;
pub mod split;
pub mod table;

pub use self::error::PreprocessError;
