//! Shared helpers for trips-ingest integration tests
//!
//! - [`MemoryStore`]: in-process [`TripStore`] that records every batch
//! - [`TestPostgres`]: disposable PostgreSQL container (requires Docker)
//! - [`write_csv`]: writes fixture files into a temp directory

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tempfile::TempDir;
use testcontainers::{core::IntoContainerPort, runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tracing::{debug, info};
use trips_ingest::{BatchOutcome, IngestError, PgTripStore, TripRecord, TripStore};

pub const HEADER: &str = "trip_id;client_id;driver_id;trip_date;status";

// ============================================================================
// In-memory store
// ============================================================================

/// Keeps the first record seen per `trip_id`, like the real table
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub rows: BTreeMap<String, TripRecord>,
    pub batch_sizes: Vec<usize>,
    pub schema_calls: usize,
    /// Fail the n-th (1-based) `insert_batch` call
    pub fail_on_batch: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(batch: usize) -> Self {
        Self {
            fail_on_batch: Some(batch),
            ..Self::default()
        }
    }
}

#[async_trait]
impl TripStore for MemoryStore {
    async fn ensure_schema(&mut self) -> trips_ingest::Result<()> {
        self.schema_calls += 1;
        Ok(())
    }

    async fn insert_batch(&mut self, records: &[TripRecord]) -> trips_ingest::Result<BatchOutcome> {
        if records.is_empty() {
            return Ok(BatchOutcome::default());
        }

        if self.fail_on_batch == Some(self.batch_sizes.len() + 1) {
            return Err(IngestError::Io(std::io::Error::other("simulated store failure")));
        }

        self.batch_sizes.push(records.len());

        let mut outcome = BatchOutcome::default();
        for record in records {
            if self.rows.contains_key(&record.trip_id) {
                outcome.duplicates += 1;
            } else {
                self.rows.insert(record.trip_id.clone(), record.clone());
                outcome.inserted += 1;
            }
        }
        Ok(outcome)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Write `contents` to `name` inside a fresh temp directory
///
/// The directory must outlive the path, so both are returned.
pub fn write_csv(name: &str, contents: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("Failed to create temp dir")?;
    let path = dir.path().join(name);
    std::fs::write(&path, contents).context("Failed to write CSV fixture")?;
    Ok((dir, path))
}

/// `n` valid rows with ids `T0..Tn`
pub fn valid_rows(n: usize) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in 0..n {
        let status = if i % 2 == 0 { "done" } else { "not_respond" };
        csv.push_str(&format!("T{i};C{};D{};2024-01-01 10:00:00;{status}\n", i % 7, i % 11));
    }
    csv
}

// ============================================================================
// PostgreSQL container
// ============================================================================

pub struct TestPostgres {
    _container: ContainerAsync<Postgres>,
    pool: PgPool,
    connection_string: String,
}

impl TestPostgres {
    pub async fn start() -> Result<Self> {
        info!("Starting PostgreSQL test container...");

        let container = Postgres::default()
            .with_tag("16-alpine")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await.context("Failed to get container host")?;
        let port = container
            .get_host_port_ipv4(5432.tcp())
            .await
            .context("Failed to get container port")?;

        let connection_string = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);
        debug!("PostgreSQL connection: {}", connection_string);

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&connection_string)
            .await
            .context("Failed to connect to PostgreSQL")?;

        Ok(Self {
            _container: container,
            pool,
            connection_string,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub async fn store(&self) -> Result<PgTripStore> {
        PgTripStore::connect(&self.connection_string)
            .await
            .context("Failed to open store connection")
    }

    pub async fn count_trips(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trips")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count trips")?;
        Ok(count)
    }
}

pub fn init_test_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,trips_ingest=debug,sqlx=warn,testcontainers=info")
        }))
        .with_test_writer()
        .try_init();
}
