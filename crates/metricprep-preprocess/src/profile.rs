//! Per-column distribution summaries
//!
//! A text-friendly stand-in for box plots: the five-number summary (min, Q1,
//! median, Q3, max) plus mean, standard deviation and missing count of each
//! feature column.

use metricprep_stats::{descriptive::DescriptiveStats, quartiles::Quartiles};
use serde::Serialize;

use crate::table::MetricTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub count: usize,
    pub missing: usize,
    /// `None` when the column has no present values
    pub summary: Option<FiveNumberSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Profiles every feature column of `table` on its present values.
#[must_use]
pub fn profile_table(table: &MetricTable) -> Vec<ColumnProfile> {
    table
        .features
        .iter()
        .map(|column| {
            let mut present = column.values.iter().flatten().copied().collect::<Vec<_>>();
            present.sort_by(f64::total_cmp);
            let summary = DescriptiveStats::from_sorted(&present)
                .zip(Quartiles::from_sorted(&present))
                .map(|(stats, quartiles)| FiveNumberSummary {
                    min: stats.min,
                    q1: quartiles.q1,
                    median: quartiles.median,
                    q3: quartiles.q3,
                    max: stats.max,
                    mean: stats.mean,
                    std_dev: stats.std_dev,
                });
            ColumnProfile {
                name: column.name.clone(),
                count: present.len(),
                missing: column.values.len() - present.len(),
                summary,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::table::RawColumn;

    use super::*;

    #[test]
    fn test_profile_table() {
        let table = MetricTable {
            timestamp_name: "Time".to_owned(),
            timestamps: (0..5).map(|i| i.to_string()).collect(),
            features: vec![
                RawColumn {
                    name: "cpu".to_owned(),
                    values: vec![Some(5.0), Some(1.0), None, Some(3.0), Some(2.0)],
                },
                RawColumn {
                    name: "empty".to_owned(),
                    values: vec![None; 5],
                },
            ],
        };
        let profiles = profile_table(&table);

        let cpu = &profiles[0];
        assert_eq!(cpu.count, 4);
        assert_eq!(cpu.missing, 1);
        let summary = cpu.summary.unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q3, 3.5);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.mean, 2.75);

        assert_eq!(profiles[1].missing, 5);
        assert_eq!(profiles[1].summary, None);
    }
}
