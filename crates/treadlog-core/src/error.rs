//! Core error types for treadlog-core.
//!
//! Errors are split by the flow that raises them: the session store and the
//! records report. Input validation never shows up here, bad answers are
//! re-prompted inside the entry collector.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for treadlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Report generation errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// IO errors (terminal reads and writes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the CSV session store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file has not been created yet
    #[error("No {} file found yet", .path.display())]
    Missing { path: PathBuf },

    /// Failed to append a row
    #[error("Failed to append to {path}: {source}")]
    AppendFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read the store
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while aggregating stored sessions.
#[derive(Error, Debug)]
pub enum ReportError {
    /// No data rows after the header
    #[error("no sessions recorded")]
    Empty,

    /// A row has fewer cells than the report reads
    #[error("row {row} has {found} cells, expected at least {expected}")]
    ShortRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A cell has no leading number
    #[error("could not read {column} from '{value}' in row {row}")]
    BadNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl StoreError {
    /// Whether this error means the store does not exist yet.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing { .. })
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
