//! IQR-based row filter for training candidates
//!
//! Quartiles are computed per feature column over the candidate rows. Only
//! "valid" columns, those whose IQR exceeds `epsilon`, take part in fencing:
//! a near-constant column would otherwise produce a zero-width fence and
//! reject nearly every row. If no column qualifies, all columns are fenced.
//! That fallback is a loose heuristic kept for compatibility with existing
//! datasets, not a statistically grounded rule.
//!
//! A row is kept only if every valid column's value lies inside its closed
//! fence `[Q1 - k * IQR, Q3 + k * IQR]`. `NaN` cells are left out of the
//! quartiles and never reject a row.

use metricprep_stats::quartiles::{Quartiles, TukeyFence};
use serde::Serialize;

use crate::table::FeatureFrame;

/// Default minimum IQR for a column to be fenced.
pub const DEFAULT_EPSILON: f64 = 1e-6;
/// Default fence multiplier (Tukey's "mild outlier" rule).
pub const DEFAULT_K: f64 = 1.5;

/// Parameters of the IQR filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFilter {
    pub epsilon: f64,
    pub k: f64,
}

impl Default for IqrFilter {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            k: DEFAULT_K,
        }
    }
}

/// Fence computed for one feature column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFence {
    pub name: String,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
    /// Whether this column takes part in filtering
    pub valid: bool,
}

impl ColumnFence {
    fn fence(&self) -> TukeyFence {
        TukeyFence {
            lower: self.lower,
            upper: self.upper,
        }
    }
}

/// Fences for every feature column of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FenceSet {
    pub columns: Vec<ColumnFence>,
    /// Set when no column passed the `epsilon` test and all were made valid
    pub fallback: bool,
}

/// Rows surviving the filter, plus the rows it removed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub kept: FeatureFrame,
    /// Indices into the filtered frame of the rejected rows
    pub removed_rows: Vec<usize>,
}

impl IqrFilter {
    /// Computes per-column fences over the rows of `frame`.
    ///
    /// Columns of an empty frame get `NaN` quartiles and are never valid
    /// unless the fallback applies.
    #[must_use]
    pub fn fit(&self, frame: &FeatureFrame) -> FenceSet {
        let mut columns = frame
            .columns()
            .iter()
            .map(|column| {
                let present = column.values.iter().copied().filter(|v| !v.is_nan());
                let quartiles = Quartiles::new(present).unwrap_or(Quartiles {
                    q1: f64::NAN,
                    median: f64::NAN,
                    q3: f64::NAN,
                });
                let iqr = quartiles.iqr();
                let fence = quartiles.fence(self.k);
                ColumnFence {
                    name: column.name.clone(),
                    q1: quartiles.q1,
                    q3: quartiles.q3,
                    iqr,
                    lower: fence.lower,
                    upper: fence.upper,
                    valid: iqr > self.epsilon,
                }
            })
            .collect::<Vec<_>>();

        for column in &columns {
            tracing::debug!(
                column = %column.name,
                q1 = column.q1,
                q3 = column.q3,
                iqr = column.iqr,
                valid = column.valid,
                "computed IQR fence"
            );
        }

        let fallback = !columns.is_empty() && columns.iter().all(|c| !c.valid);
        if fallback {
            tracing::warn!(
                epsilon = self.epsilon,
                "no feature column has IQR above epsilon; fencing on all columns"
            );
            for column in &mut columns {
                column.valid = true;
            }
        }

        FenceSet { columns, fallback }
    }
}

impl FenceSet {
    /// Names of the columns used for filtering.
    pub fn valid_columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns
            .iter()
            .filter(|c| c.valid)
            .map(|c| c.name.as_str())
    }

    /// Whether a row, given as feature values in column order, lies inside
    /// every valid column's fence.
    pub fn accepts<I>(&self, row: I) -> bool
    where
        I: IntoIterator<Item = f64>,
    {
        self.columns
            .iter()
            .zip(row)
            .all(|(column, value)| {
                !column.valid || value.is_nan() || column.fence().contains(value)
            })
    }

    /// Keeps the rows of `frame` accepted by [`FenceSet::accepts`], in order.
    #[must_use]
    pub fn apply(&self, frame: &FeatureFrame) -> FilterOutcome {
        let (kept_rows, removed_rows) =
            (0..frame.len()).partition::<Vec<_>, _>(|&i| self.accepts(frame.row(i)));
        FilterOutcome {
            kept: frame.select_rows(&kept_rows),
            removed_rows,
        }
    }
}
