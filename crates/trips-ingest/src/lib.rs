//! Trips Ingest
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Loads a semicolon-delimited trip dataset into the `trips` table.
//!
//! Each row is classified as accepted or rejected (missing field, invalid
//! status, invalid date), accepted rows are written in batches with
//! `ON CONFLICT (trip_id) DO NOTHING`, and the run ends with an
//! [`IngestReport`] of the counters.
//!
//! # Example
//!
//! ```no_run
//! use trips_ingest::{IngestPipeline, PgTripStore, PipelineConfig, TripStore};
//!
//! # async fn example() -> trips_ingest::Result<()> {
//! let mut store = PgTripStore::connect("postgres://localhost/trips").await?;
//! store.ensure_schema().await?;
//!
//! let counters = IngestPipeline::new(&mut store, PipelineConfig::default())?
//!     .ingest_file("output.csv".as_ref())
//!     .await?;
//! println!("inserted {}", counters.inserted);
//!
//! store.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod counters;
pub mod date;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod validate;

pub use batch::BatchAccumulator;
pub use config::{Cli, IngestConfig};
pub use counters::Counters;
pub use date::parse_trip_date;
pub use error::{IngestError, Result};
pub use models::{RawRow, TripRecord, EXPECTED_HEADER};
pub use pipeline::{run, IngestPipeline, PipelineConfig};
pub use report::IngestReport;
pub use storage::{BatchOutcome, PgTripStore, TripStore};
pub use validate::{classify, validate_row, RowOutcome};
