//! Trip storage layer
//!
//! [`TripStore`] is the seam between the pipeline and the database. The
//! PostgreSQL implementation holds one connection for the whole run and
//! writes each batch with a single `INSERT ... ON CONFLICT DO NOTHING`.

use async_trait::async_trait;
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::TripRecord;

/// Table definition consumed by the pipeline and the reporting API
pub const CREATE_TRIPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS trips (
    trip_id TEXT PRIMARY KEY,
    client_id TEXT NOT NULL,
    driver_id TEXT NOT NULL,
    trip_date TIMESTAMP NOT NULL,
    status TEXT NOT NULL CHECK (status IN ('done', 'not_respond'))
)
"#;

pub const CREATE_DRIVER_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_trips_driver_date ON trips (driver_id, trip_date)";

pub const CREATE_CLIENT_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_trips_client_date ON trips (client_id, trip_date)";

/// How a submitted batch was absorbed by the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Rows newly written
    pub inserted: u64,
    /// Rows whose `trip_id` was already present (in the table or earlier in the batch)
    pub duplicates: u64,
}

impl BatchOutcome {
    /// Derive the split from attempted rows and the statement's affected-row count
    pub fn from_affected(attempted: usize, affected: u64) -> Self {
        let attempted = attempted as u64;
        Self {
            inserted: affected,
            duplicates: attempted.saturating_sub(affected),
        }
    }
}

/// Destination for validated trips
#[async_trait]
pub trait TripStore: Send {
    /// Create the `trips` table and its indexes if they do not exist
    async fn ensure_schema(&mut self) -> Result<()>;

    /// Insert a batch atomically, skipping rows whose `trip_id` already exists
    ///
    /// Either every row of the batch is applied or none is. Primary-key
    /// conflicts are not errors; they are reported as duplicates.
    async fn insert_batch(&mut self, records: &[TripRecord]) -> Result<BatchOutcome>;
}

/// PostgreSQL-backed store owning a single connection
pub struct PgTripStore {
    conn: PgConnection,
}

impl PgTripStore {
    /// Open the connection used for the whole run
    pub async fn connect(database_url: &str) -> Result<Self> {
        let conn = PgConnection::connect(database_url).await?;
        info!("Connected to PostgreSQL");
        Ok(Self { conn })
    }

    pub fn from_connection(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Close the connection gracefully
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        debug!("PostgreSQL connection closed");
        Ok(())
    }
}

#[async_trait]
impl TripStore for PgTripStore {
    async fn ensure_schema(&mut self) -> Result<()> {
        info!("Ensuring schema exists");

        let mut tx = self.conn.begin().await?;
        for statement in [CREATE_TRIPS_TABLE, CREATE_DRIVER_DATE_INDEX, CREATE_CLIENT_DATE_INDEX] {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn insert_batch(&mut self, records: &[TripRecord]) -> Result<BatchOutcome> {
        if records.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO trips (trip_id, client_id, driver_id, trip_date, status) ",
        );

        query_builder.push_values(records, |mut b, record| {
            b.push_bind(&record.trip_id)
                .push_bind(&record.client_id)
                .push_bind(&record.driver_id)
                .push_bind(record.trip_date)
                .push_bind(record.status.as_str());
        });

        query_builder.push(" ON CONFLICT (trip_id) DO NOTHING");

        let mut tx = self.conn.begin().await?;
        let affected = match query_builder.build().execute(&mut *tx).await {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = ?rollback_err, "Rollback after failed batch insert also failed");
                }
                return Err(e.into());
            },
        };
        tx.commit().await?;

        let outcome = BatchOutcome::from_affected(records.len(), affected);
        debug!(
            rows = records.len(),
            inserted = outcome.inserted,
            duplicates = outcome.duplicates,
            "Batch committed"
        );

        Ok(outcome)
    }
}
