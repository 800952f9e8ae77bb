//! Missing-value imputation and min-max normalization
//!
//! Every feature column is handled independently:
//!
//! 1. Missing cells are filled with the mean of the column's present values
//! 2. The filled column is rescaled with `(x - min) / (max - min)`
//!
//! A column whose range is zero, or that has no present values at all, is
//! mapped to a constant `0.0`. Ranges too wide for `f64` are rescaled on
//! halved values, so every output stays finite.

use metricprep_stats::descriptive::{self, DescriptiveStats};
use serde::Serialize;

use crate::table::{FeatureColumn, FeatureFrame, MetricTable, RawColumn};

/// How one feature column was cleaned and rescaled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnScaling {
    pub name: String,
    /// Number of missing cells in the input
    pub missing: usize,
    /// Value used to fill missing cells, if any were filled
    pub fill_value: Option<f64>,
    /// Minimum after imputation (`None` if the column had no values)
    pub min: Option<f64>,
    /// Maximum after imputation (`None` if the column had no values)
    pub max: Option<f64>,
    /// Whether the column was mapped to a constant `0.0`
    pub degenerate: bool,
}

/// Imputes and normalizes every feature column of `table`.
///
/// The timestamp column is carried through unchanged and row order is
/// preserved.
#[must_use]
pub fn normalize_table(table: &MetricTable) -> (FeatureFrame, Vec<ColumnScaling>) {
    let (columns, scalings) = table.features.iter().map(normalize_column).unzip();
    let frame = FeatureFrame::new(
        table.timestamp_name.clone(),
        table.timestamps.clone(),
        columns,
    );
    (frame, scalings)
}

/// Imputes and normalizes a single column.
#[must_use]
pub fn normalize_column(column: &RawColumn) -> (FeatureColumn, ColumnScaling) {
    let missing = column.values.iter().filter(|v| v.is_none()).count();
    let fill_value = if missing > 0 {
        descriptive::mean(column.values.iter().flatten().copied())
    } else {
        None
    };
    if missing > 0 {
        tracing::warn!(
            column = %column.name,
            missing,
            fill_value,
            "filled missing values with column mean"
        );
    }

    // An all-missing column stays unfilled and is caught as degenerate below.
    let filled = column
        .values
        .iter()
        .map(|v| v.or(fill_value))
        .collect::<Vec<_>>();
    let stats = DescriptiveStats::new(filled.iter().flatten().copied());
    let min = stats.as_ref().map(|s| s.min);
    let max = stats.as_ref().map(|s| s.max);

    let values = match (min, max) {
        (Some(min), Some(max)) if max > min => filled
            .iter()
            .map(|v| v.map_or(0.0, |v| min_max(v, min, max)))
            .collect(),
        _ => vec![0.0; filled.len()],
    };
    let degenerate = !matches!((min, max), (Some(min), Some(max)) if max > min);

    let scaling = ColumnScaling {
        name: column.name.clone(),
        missing,
        fill_value,
        min,
        max,
        degenerate,
    };
    let column = FeatureColumn {
        name: column.name.clone(),
        values,
    };
    (column, scaling)
}

/// `(value - min) / (max - min)` for `min <= value <= max`, `min < max`.
fn min_max(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.is_finite() {
        (value - min) / range
    } else {
        (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn raw(name: &str, values: &[Option<f64>]) -> RawColumn {
        RawColumn {
            name: name.to_owned(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_min_max_scaling() {
        let (column, scaling) = normalize_column(&raw("a", &[Some(2.0), Some(4.0), Some(6.0)]));
        assert_eq!(column.values, vec![0.0, 0.5, 1.0]);
        assert_eq!(scaling.min, Some(2.0));
        assert_eq!(scaling.max, Some(6.0));
        assert_eq!(scaling.missing, 0);
        assert_eq!(scaling.fill_value, None);
        assert!(!scaling.degenerate);
    }

    #[test]
    fn test_missing_values_filled_with_mean() {
        let (column, scaling) =
            normalize_column(&raw("a", &[Some(0.0), None, Some(10.0), Some(2.0)]));
        assert_eq!(scaling.missing, 1);
        assert_eq!(scaling.fill_value, Some(4.0));
        assert_eq!(column.values, vec![0.0, 0.4, 1.0, 0.2]);
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let (column, scaling) = normalize_column(&raw("a", &[Some(3.0), None, Some(3.0)]));
        assert_eq!(column.values, vec![0.0; 3]);
        assert!(scaling.degenerate);
    }

    #[test]
    fn test_all_missing_column_maps_to_zero() {
        let (column, scaling) = normalize_column(&raw("a", &[None, None]));
        assert_eq!(column.values, vec![0.0, 0.0]);
        assert_eq!(scaling.fill_value, None);
        assert_eq!(scaling.min, None);
        assert!(scaling.degenerate);
    }

    #[test]
    fn test_range_wider_than_f64_stays_finite() {
        let (column, scaling) = normalize_column(&raw(
            "a",
            &[Some(-1.7e308), Some(1.7e308), Some(0.0), None],
        ));
        assert!(!scaling.degenerate);
        assert_eq!(scaling.fill_value, Some(0.0));
        assert_eq!(column.values, vec![0.0, 1.0, 0.5, 0.5]);
    }

    #[test]
    fn test_columns_are_independent() {
        let table = MetricTable {
            timestamp_name: "Time".to_owned(),
            timestamps: vec!["t0".to_owned(), "t1".to_owned()],
            features: vec![
                raw("small", &[Some(0.0), Some(1.0)]),
                raw("large", &[Some(1000.0), Some(-1000.0)]),
            ],
        };
        let (frame, scalings) = normalize_table(&table);
        assert_eq!(frame.timestamps(), ["t0", "t1"]);
        assert_eq!(frame.column("small").unwrap().values, vec![0.0, 1.0]);
        assert_eq!(frame.column("large").unwrap().values, vec![1.0, 0.0]);
        assert_eq!(scalings.len(), 2);
    }

    #[test]
    fn test_random_columns_span_unit_interval() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        for _ in 0..20 {
            let values = (0..50)
                .map(|_| rng.random_bool(0.9).then(|| rng.random_range(-1e3..1e3)))
                .collect::<Vec<Option<f64>>>();
            let (column, scaling) = normalize_column(&raw("x", &values));
            if scaling.degenerate {
                assert!(column.values.iter().all(|&v| v == 0.0));
                continue;
            }
            let min = column.values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = column.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(min.abs() < 1e-12);
            assert!((max - 1.0).abs() < 1e-12);
            assert!(column.values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }
}
