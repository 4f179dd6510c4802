//! Error types for loading results and rendering charts.

use thiserror::Error;

/// Result type alias for dr-ifpr-plot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur between reading results and writing the chart.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A results line is not a valid JSON object.
    #[error("JSON error at line {line}: {source}")]
    Json {
        /// 1-based line number in the input file.
        line: usize,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// A record lacks a required column.
    #[error("Missing `{field}` at line {line}")]
    MissingField {
        /// 1-based line (or CSV record) number.
        line: usize,
        /// Column name.
        field: String,
    },

    /// A field is present but cannot be coerced to its column type.
    #[error("Invalid `{field}` at line {line}: {reason}")]
    InvalidField {
        /// 1-based line (or CSV record) number.
        line: usize,
        /// Column name.
        field: String,
        /// Reason for the failure.
        reason: String,
    },

    /// The input contained no records.
    #[error("No result records found")]
    EmptyResults,

    /// No record exists for a (threshold, window size) pair the chart needs.
    #[error("No result for threshold {threshold} and window size {window_size}")]
    MissingPoint {
        /// Threshold of the series being plotted.
        threshold: f64,
        /// Window size with no matching record.
        window_size: i64,
    },

    /// Output format not recognized or not compiled in.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The figure cannot be laid out or serialized.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
