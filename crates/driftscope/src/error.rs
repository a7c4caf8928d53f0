//! Error types for the driftscope library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for driftscope operations.
///
/// Only structurally invalid input aborts a run. A single feature that
/// cannot be tested is not an error; see [`crate::drift::UntestableReason`].
#[derive(Debug, Error)]
pub enum DriftError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file, or a dataset with no columns at all.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Significance threshold outside the open interval (0, 1).
    #[error("Invalid threshold {0}: must lie strictly between 0 and 1")]
    InvalidThreshold(f64),

    /// A column whose length disagrees with the rest of the dataset.
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Two columns with the same name in one dataset.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Error saving or loading a report.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A statistical computation failed for a reason other than a degenerate sample.
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// An alert sink failed to deliver an event.
    #[error("Alert delivery error: {0}")]
    Alert(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for driftscope operations.
pub type Result<T> = std::result::Result<T, DriftError>;
