//! In-memory table types
//!
//! The pipeline moves through three shapes of table:
//!
//! - [`MetricTable`]: the raw input, with possibly missing feature cells
//! - [`FeatureFrame`]: timestamps plus dense, normalized feature columns
//! - [`LabeledFrame`]: a [`FeatureFrame`] with one label per row (test set)
//!
//! Timestamps are opaque strings and are passed through untouched.

/// A feature column as read from the input, `None` marking a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// The input table: one timestamp column and N numeric feature columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub timestamp_name: String,
    pub timestamps: Vec<String>,
    pub features: Vec<RawColumn>,
}

impl MetricTable {
    /// Number of rows (observations).
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// A dense feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Timestamps plus dense feature columns, all of the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    timestamp_name: String,
    timestamps: Vec<String>,
    columns: Vec<FeatureColumn>,
}

impl FeatureFrame {
    /// Creates a frame from its parts.
    ///
    /// # Panics
    ///
    /// Panics if any column length differs from the number of timestamps.
    #[must_use]
    pub fn new(
        timestamp_name: String,
        timestamps: Vec<String>,
        columns: Vec<FeatureColumn>,
    ) -> Self {
        for column in &columns {
            assert_eq!(
                column.values.len(),
                timestamps.len(),
                "column '{}' length does not match timestamps",
                column.name
            );
        }
        Self {
            timestamp_name,
            timestamps,
            columns,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn timestamp_name(&self) -> &str {
        &self.timestamp_name
    }

    #[must_use]
    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    #[must_use]
    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Looks up a feature column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&FeatureColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Feature values of row `index`, in column order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn row(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(index < self.len(), "row {index} out of bounds");
        self.columns.iter().map(move |c| c.values[index])
    }

    /// Builds a new frame from the given rows, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let timestamps = indices
            .iter()
            .map(|&i| self.timestamps[i].clone())
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|c| FeatureColumn {
                name: c.name.clone(),
                values: indices.iter().map(|&i| c.values[i]).collect(),
            })
            .collect();
        Self {
            timestamp_name: self.timestamp_name.clone(),
            timestamps,
            columns,
        }
    }
}

/// A frame with one label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledFrame {
    pub frame: FeatureFrame,
    pub labels: Vec<u8>,
}

impl LabeledFrame {
    /// # Panics
    ///
    /// Panics if the label count differs from the frame's row count.
    #[must_use]
    pub fn new(frame: FeatureFrame, labels: Vec<u8>) -> Self {
        assert_eq!(frame.len(), labels.len(), "one label per row required");
        Self { frame, labels }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of rows carrying `label`.
    #[must_use]
    pub fn count_label(&self, label: u8) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}
