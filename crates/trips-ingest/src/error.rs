//! Fatal ingestion errors
//!
//! Row-level problems (missing fields, bad status, bad date) are not errors;
//! they are counted in [`crate::Counters`]. Everything here aborts the run.

use thiserror::Error;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV header mismatch. Expected {expected:?} but got {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Batch insert of {rows} rows failed after {rows_read} rows read: {source}")]
    BatchInsert {
        rows: usize,
        rows_read: u64,
        #[source]
        source: Box<IngestError>,
    },
}

impl IngestError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn header_mismatch(expected: &[&str], found: &[String]) -> Self {
        Self::HeaderMismatch {
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found: found.to_vec(),
        }
    }

    pub fn is_header_mismatch(&self) -> bool {
        matches!(self, IngestError::HeaderMismatch { .. })
    }
}
