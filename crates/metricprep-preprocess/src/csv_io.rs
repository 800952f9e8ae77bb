//! CSV reading and writing
//!
//! Input files must carry a header row. One column is the timestamp (named,
//! or the first column by default); every other column is parsed as a
//! numeric feature. Infinite values are rejected. Output files are UTF-8 with a header row and no index
//! column, timestamp first.

use std::{num::ParseFloatError, path::Path};

use csv::StringRecord;

use crate::{
    error::PreprocessError,
    split::LABEL_COLUMN,
    table::{FeatureFrame, LabeledFrame, MetricTable, RawColumn},
};

/// Cell values treated as missing, in addition to the empty cell.
pub const MISSING_MARKERS: &[&str] = &[
    "NA", "N/A", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Reads a metrics table from `path`.
///
/// `timestamp_col` selects the timestamp column by name; when `None`, the
/// first column is used.
pub fn read_metric_table(
    path: &Path,
    timestamp_col: Option<&str>,
) -> Result<MetricTable, PreprocessError> {
    let read_error = |source| PreprocessError::ReadInput {
        path: path.to_owned(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(read_error)?;
    let headers = reader.headers().map_err(read_error)?.clone();
    if headers.is_empty() {
        return Err(PreprocessError::EmptyHeader {
            path: path.to_owned(),
        });
    }

    let timestamp_index = match timestamp_col {
        Some(name) => headers.iter().position(|h| h == name).ok_or_else(|| {
            PreprocessError::MissingTimestampColumn {
                name: name.to_owned(),
            }
        })?,
        None => 0,
    };
    let feature_indices = (0..headers.len())
        .filter(|&i| i != timestamp_index)
        .collect::<Vec<_>>();

    let mut timestamps = vec![];
    let mut features = feature_indices
        .iter()
        .map(|&i| RawColumn {
            name: headers[i].to_owned(),
            values: vec![],
        })
        .collect::<Vec<_>>();

    let mut record = StringRecord::new();
    let mut row = 0;
    while reader.read_record(&mut record).map_err(read_error)? {
        row += 1;
        timestamps.push(record[timestamp_index].to_owned());
        for (column, &index) in features.iter_mut().zip(&feature_indices) {
            let value = parse_cell(&record[index]).map_err(|_| {
                PreprocessError::InvalidNumber {
                    column: column.name.clone(),
                    row,
                    value: record[index].to_owned(),
                }
            })?;
            if value.is_some_and(f64::is_infinite) {
                return Err(PreprocessError::NonFiniteNumber {
                    column: column.name.clone(),
                    row,
                    value: record[index].to_owned(),
                });
            }
            column.values.push(value);
        }
    }

    tracing::debug!(
        path = %path.display(),
        rows = timestamps.len(),
        features = features.len(),
        "loaded metrics table"
    );

    Ok(MetricTable {
        timestamp_name: headers[timestamp_index].to_owned(),
        timestamps,
        features,
    })
}

/// Parses one feature cell.
///
/// Returns `Ok(None)` for a missing cell.
fn parse_cell(cell: &str) -> Result<Option<f64>, ParseFloatError> {
    let cell = cell.trim();
    if cell.is_empty() || MISSING_MARKERS.contains(&cell) {
        return Ok(None);
    }
    let value = cell.parse::<f64>()?;
    Ok((!value.is_nan()).then_some(value))
}

/// Writes a frame to `path` with no label column.
pub fn write_frame(path: &Path, frame: &FeatureFrame) -> Result<(), PreprocessError> {
    write_rows(path, frame, None)
}

/// Writes a labeled frame to `path`, with the labels as the last column.
pub fn write_labeled(path: &Path, labeled: &LabeledFrame) -> Result<(), PreprocessError> {
    write_rows(path, &labeled.frame, Some(labeled.labels.as_slice()))
}

fn write_rows(
    path: &Path,
    frame: &FeatureFrame,
    labels: Option<&[u8]>,
) -> Result<(), PreprocessError> {
    let write_error = |source| PreprocessError::WriteOutput {
        path: path.to_owned(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_error)?;

    let mut header = vec![frame.timestamp_name()];
    header.extend(frame.column_names());
    if labels.is_some() {
        header.push(LABEL_COLUMN);
    }
    writer.write_record(&header).map_err(write_error)?;

    let mut record = Vec::with_capacity(header.len());
    for (i, timestamp) in frame.timestamps().iter().enumerate() {
        record.clear();
        record.push(timestamp.clone());
        record.extend(frame.row(i).map(format_value));
        if let Some(labels) = labels {
            record.push(labels[i].to_string());
        }
        writer.write_record(&record).map_err(write_error)?;
    }

    writer
        .flush()
        .map_err(|e| write_error(csv::Error::from(e)))?;
    Ok(())
}

/// Shortest round-trip representation, keeping a `.0` on integral values.
fn format_value(value: f64) -> String {
    format!("{value:?}")
}
