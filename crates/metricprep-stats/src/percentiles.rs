/// Precomputed percentile values for a dataset.
///
/// This structure stores percentile-value pairs for efficient lookup
/// of commonly used percentile points.
///
/// # Examples
///
/// ```
/// use metricprep_stats::percentiles::Percentiles;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(3.0));
/// assert_eq!(percentiles.get(25.0), Some(2.0));
/// ```
#[derive(Debug, Clone)]
pub struct Percentiles {
    /// Percentile-value pairs, in the order they were requested.
    /// Each tuple contains (percentile, value) where percentile is 0.0-100.0.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    /// * `percentile_points` - The percentile points to compute (e.g., [25.0, 50.0, 75.0])
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { values }
    }

    /// Computes percentiles from unsorted values.
    ///
    /// This method will sort the values internally before computing percentiles.
    ///
    /// # Examples
    ///
    /// ```
    /// use metricprep_stats::percentiles::Percentiles;
    ///
    /// let values = vec![5.0, 2.0, 8.0, 1.0, 9.0];
    /// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
    ///
    /// assert_eq!(percentiles.get(50.0), Some(5.0));
    /// ```
    #[must_use]
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Gets the value at a specific percentile.
    ///
    /// Returns `None` if the percentile was not precomputed.
    ///
    /// # Examples
    ///
    /// ```
    /// use metricprep_stats::percentiles::Percentiles;
    ///
    /// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    /// let percentiles = Percentiles::new(&values, &[50.0, 100.0]);
    ///
    /// assert_eq!(percentiles.get(50.0), Some(3.0));
    /// assert_eq!(percentiles.get(100.0), Some(5.0));
    /// assert_eq!(percentiles.get(25.0), None); // Not precomputed
    /// ```
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values.iter().find_map(|(p, value)| {
            if (*p - percentile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// Computes a single percentile value from sorted data.
///
/// The percentile is linearly interpolated between the two closest ranks:
/// for `n` values the target position is `(n - 1) * percentile / 100`, and a
/// fractional position blends its neighbours. This matches the default
/// quantile convention of common dataframe libraries.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0.0 to 100.0, clamped)
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use metricprep_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 75.0), 3.25);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(&last) = sorted_values.last() else {
        return f64::NAN;
    };
    let fraction = percentile.clamp(0.0, 100.0) / 100.0;
    let pos = (sorted_values.len() - 1) as f64 * fraction;
    let lower = pos.floor() as usize;
    if lower + 1 >= sorted_values.len() {
        return last;
    }
    let weight = pos - pos.floor();
    let (a, b) = (sorted_values[lower], sorted_values[lower + 1]);
    a + (b - a) * weight
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_single_value() {
        for p in [0.0, 25.0, 50.0, 100.0] {
            assert_eq!(compute_percentile(&[4.0], p), 4.0);
        }
    }

    #[test]
    fn test_extremes_are_min_and_max() {
        let values = [-3.0, 0.5, 2.0, 10.0];
        assert_eq!(compute_percentile(&values, 0.0), -3.0);
        assert_eq!(compute_percentile(&values, 100.0), 10.0);
    }

    #[test]
    fn test_linear_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(compute_percentile(&values, 25.0), 1.75);
        assert_eq!(compute_percentile(&values, 75.0), 3.25);
    }

    #[test]
    fn test_percentiles_preserve_request_order() {
        let percentiles = Percentiles::new(&[3.0, 1.0, 2.0], &[100.0, 0.0]);
        let pairs = percentiles.iter().collect::<Vec<_>>();
        assert_eq!(pairs, vec![(100.0, 3.0), (0.0, 1.0)]);
    }

    #[test]
    fn test_monotonic_in_percentile() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        let mut values = (0..257)
            .map(|_| rng.random_range(-100.0..100.0))
            .collect::<Vec<f64>>();
        values.sort_by(f64::total_cmp);

        let mut prev = f64::NEG_INFINITY;
        for step in 0..=100 {
            let value = compute_percentile(&values, f64::from(step));
            assert!(value >= prev, "percentile {step} decreased");
            prev = value;
        }
    }
}
