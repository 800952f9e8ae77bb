//! Quartiles, interquartile range and Tukey fences.
//!
//! A Tukey fence is the closed interval `[Q1 - k * IQR, Q3 + k * IQR]`;
//! values outside it are treated as outliers. `k = 1.5` gives the usual
//! "mild outlier" threshold.

use crate::percentiles::Percentiles;

/// First quartile, median and third quartile of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Closed interval outside of which a value counts as an outlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TukeyFence {
    pub lower: f64,
    pub upper: f64,
}

impl Quartiles {
    /// Computes quartiles from unsorted values.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use metricprep_stats::quartiles::Quartiles;
    /// let quartiles = Quartiles::new([4.0, 1.0, 3.0, 2.0]).unwrap();
    /// assert_eq!(quartiles.q1, 1.75);
    /// assert_eq!(quartiles.q3, 3.25);
    /// assert_eq!(quartiles.iqr(), 1.5);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes quartiles from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        if sorted_values.is_empty() {
            return None;
        }
        let percentiles = Percentiles::from_sorted(sorted_values, &[25.0, 50.0, 75.0]);
        Some(Self {
            q1: percentiles.get(25.0)?,
            median: percentiles.get(50.0)?,
            q3: percentiles.get(75.0)?,
        })
    }

    /// Interquartile range, `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Builds the fence `[Q1 - k * IQR, Q3 + k * IQR]`.
    #[must_use]
    pub fn fence(&self, k: f64) -> TukeyFence {
        let iqr = self.iqr();
        TukeyFence {
            lower: self.q1 - k * iqr,
            upper: self.q3 + k * iqr,
        }
    }
}

impl TukeyFence {
    /// Whether `value` lies inside the fence. Both edges are inclusive.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}
