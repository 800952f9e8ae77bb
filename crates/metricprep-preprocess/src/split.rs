//! Fault-window test split
//!
//! The test set is built from a fixed window of rows known to contain an
//! injected fault (label `1`) and an equally long window immediately before
//! it (label `0`). All other rows become training candidates.
//!
//! ```text
//!   0 ............ start-len ..... start ...... start+len ........ n
//!   | candidates  |  normal (0)   | fault (1)  |    candidates     |
//! ```
//!
//! The default window (rows 104..=116) matches the dataset the pipeline was
//! built for; nothing records why those rows were chosen, so it is
//! configurable rather than assumed general.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{
    error::PreprocessError,
    table::{FeatureFrame, LabeledFrame},
};

/// First row (0-based) of the default fault window.
pub const DEFAULT_FAULT_START: usize = 104;
/// Length of the default fault window.
pub const DEFAULT_FAULT_LEN: usize = 13;

/// Name of the label column appended to the test set.
pub const LABEL_COLUMN: &str = "label";
pub const NORMAL_LABEL: u8 = 0;
pub const FAULT_LABEL: u8 = 1;

/// Row window holding the known fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultWindow {
    /// First fault row (0-based)
    pub start: usize,
    /// Number of fault rows, and of normal rows sampled before them
    pub len: usize,
}

impl Default for FaultWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_FAULT_START,
            len: DEFAULT_FAULT_LEN,
        }
    }
}

impl FaultWindow {
    /// Rows labeled as faults.
    #[must_use]
    pub fn fault_range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Rows labeled as normal, immediately preceding the fault rows.
    ///
    /// # Panics
    ///
    /// Panics if `start < len`; call [`FaultWindow::validate`] first.
    #[must_use]
    pub fn normal_range(&self) -> Range<usize> {
        self.start - self.len..self.start
    }

    /// Minimum number of rows a table needs for this window.
    #[must_use]
    pub fn required_rows(&self) -> usize {
        self.start + self.len
    }

    /// Checks the window is well formed and fits in a table of `rows` rows.
    pub fn validate(&self, rows: usize) -> Result<(), PreprocessError> {
        if self.len == 0 {
            return Err(PreprocessError::EmptyWindow);
        }
        if self.start < self.len {
            return Err(PreprocessError::WindowUnderflow {
                start: self.start,
                len: self.len,
            });
        }
        let required = self.required_rows();
        if rows < required {
            return Err(PreprocessError::InsufficientRows { rows, required });
        }
        Ok(())
    }
}

/// Result of splitting a normalized frame around the fault window.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit {
    /// Normal rows (label 0) followed by fault rows (label 1)
    pub test: LabeledFrame,
    /// Every row outside both windows, in original order
    pub candidates: FeatureFrame,
}

/// Splits `frame` into the labeled test set and the training candidates.
pub fn split(frame: &FeatureFrame, window: FaultWindow) -> Result<DatasetSplit, PreprocessError> {
    window.validate(frame.len())?;

    let normal = window.normal_range();
    let fault = window.fault_range();

    let test_indices = normal.clone().chain(fault.clone()).collect::<Vec<_>>();
    let labels = normal
        .clone()
        .map(|_| NORMAL_LABEL)
        .chain(fault.clone().map(|_| FAULT_LABEL))
        .collect();
    let test = LabeledFrame::new(frame.select_rows(&test_indices), labels);

    // The two windows are adjacent, so together they form one contiguous range.
    let excluded = normal.start..fault.end;
    let candidate_indices = (0..frame.len())
        .filter(|i| !excluded.contains(i))
        .collect::<Vec<_>>();
    let candidates = frame.select_rows(&candidate_indices);

    tracing::debug!(
        normal = ?normal,
        fault = ?fault,
        candidates = candidates.len(),
        "split fault window"
    );

    Ok(DatasetSplit { test, candidates })
}

#[cfg(test)]
mod tests {
    use crate::table::FeatureColumn;

    use super::*;

    #[expect(clippy::cast_precision_loss)]
    fn ramp_frame(rows: usize) -> FeatureFrame {
        FeatureFrame::new(
            "Time".to_owned(),
            (0..rows).map(|i| format!("t{i}")).collect(),
            vec![FeatureColumn {
                name: "a".to_owned(),
                values: (0..rows).map(|i| i as f64).collect(),
            }],
        )
    }

    #[test]
    fn test_default_window() {
        let window = FaultWindow::default();
        assert_eq!(window.fault_range(), 104..117);
        assert_eq!(window.normal_range(), 91..104);
        assert_eq!(window.required_rows(), 117);
    }

    #[test]
    fn test_validate() {
        let window = FaultWindow::default();
        assert!(window.validate(117).is_ok());
        assert!(matches!(
            window.validate(116),
            Err(PreprocessError::InsufficientRows {
                rows: 116,
                required: 117
            })
        ));
        assert!(matches!(
            FaultWindow { start: 5, len: 6 }.validate(1000),
            Err(PreprocessError::WindowUnderflow { start: 5, len: 6 })
        ));
        assert!(matches!(
            FaultWindow { start: 5, len: 0 }.validate(1000),
            Err(PreprocessError::EmptyWindow)
        ));
        assert!(FaultWindow { start: 6, len: 6 }.validate(12).is_ok());
    }

    #[test]
    fn test_split_default_window() {
        let frame = ramp_frame(200);
        let split = split(&frame, FaultWindow::default()).unwrap();

        assert_eq!(split.test.len(), 26);
        assert_eq!(split.test.count_label(NORMAL_LABEL), 13);
        assert_eq!(split.test.count_label(FAULT_LABEL), 13);
        assert_eq!(split.test.labels[..13], [NORMAL_LABEL; 13]);
        assert_eq!(split.test.labels[13..], [FAULT_LABEL; 13]);
        assert_eq!(split.test.frame.timestamps()[0], "t91");
        assert_eq!(split.test.frame.timestamps()[12], "t103");
        assert_eq!(split.test.frame.timestamps()[13], "t104");
        assert_eq!(split.test.frame.timestamps()[25], "t116");

        assert_eq!(split.candidates.len(), 174);
        assert_eq!(split.candidates.timestamps()[90], "t90");
        assert_eq!(split.candidates.timestamps()[91], "t117");
    }

    #[test]
    fn test_split_rejects_short_table() {
        let frame = ramp_frame(116);
        assert!(matches!(
            split(&frame, FaultWindow::default()),
            Err(PreprocessError::InsufficientRows { .. })
        ));
    }

    #[test]
    fn test_split_window_at_table_end() {
        let frame = ramp_frame(117);
        let split = split(&frame, FaultWindow::default()).unwrap();
        assert_eq!(split.candidates.len(), 91);
        assert_eq!(split.candidates.timestamps().last().unwrap(), "t90");
    }
}
