use std::{io, path::PathBuf};

/// Errors produced while loading, splitting or writing a metrics table.
///
/// I/O and validation failures abort the whole run. Missing and degenerate
/// feature values are never reported here; they are imputed or normalized
/// to a constant instead.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PreprocessError {
    #[display("failed to read input CSV '{}'", path.display())]
    ReadInput { path: PathBuf, source: csv::Error },
    #[display("input CSV '{}' has no columns", path.display())]
    EmptyHeader { path: PathBuf },
    #[display("timestamp column '{name}' not found in input header")]
    MissingTimestampColumn { name: String },
    #[display("invalid number '{value}' in column '{column}' at data row {row}")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
    #[display("non-finite number '{value}' in column '{column}' at data row {row}")]
    NonFiniteNumber {
        column: String,
        row: usize,
        value: String,
    },
    #[display("fault window must contain at least one row")]
    EmptyWindow,
    #[display("fault window starting at row {start} leaves no room for {len} preceding normal rows")]
    WindowUnderflow { start: usize, len: usize },
    #[display("table has {rows} rows but the fault window requires at least {required}")]
    InsufficientRows { rows: usize, required: usize },
    #[display("failed to create output directory '{}'", path.display())]
    CreateOutputDir { path: PathBuf, source: io::Error },
    #[display("failed to write output CSV '{}'", path.display())]
    WriteOutput { path: PathBuf, source: csv::Error },
}
