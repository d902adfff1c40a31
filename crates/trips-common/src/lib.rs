//! Trips Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the trips workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`TripsError`] and the [`Result`] alias
//! - **Logging**: centralized `tracing` subscriber setup driven by `LOG_*` variables
//! - **Types**: the closed [`TripStatus`] set shared by the ingest and reporting crates
//!
//! # Example
//!
//! ```no_run
//! use trips_common::logging::{init_logging, LogConfig};
//! use trips_common::TripStatus;
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     let status: TripStatus = "done".parse()?;
//!     tracing::info!(%status, "parsed status");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TripsError};
pub use types::TripStatus;
