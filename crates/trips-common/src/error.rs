//! Error types shared across the trips crates

use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, TripsError>;

/// Errors raised by code that lives in the common crate
#[derive(Error, Debug)]
pub enum TripsError {
    #[error("Invalid trip status: {0:?}")]
    InvalidStatus(String),
}
