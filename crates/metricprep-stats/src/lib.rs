//! Statistical utilities for the metricprep project.
//!
//! This crate provides the small set of descriptive statistics the
//! preprocessing pipeline relies on:
//!
//! - **Descriptive statistics**: min, max, mean, median and standard deviation
//! - **Percentiles**: linearly interpolated percentile values
//! - **Quartiles**: first/third quartiles, interquartile range and Tukey fences
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing a column
//! - [`percentiles`]: Percentile computation and storage
//! - [`quartiles`]: Quartiles, IQR and outlier fences
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use metricprep_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use metricprep_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(25.0), Some(1.75));
//! ```
//!
//! ## Fencing outliers
//!
//! ```
//! use metricprep_stats::quartiles::Quartiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let fence = Quartiles::new(values).unwrap().fence(1.5);
//! assert!(fence.contains(3.0));
//! assert!(!fence.contains(100.0));
//! ```

pub mod descriptive;
pub mod percentiles;
pub mod quartiles;
