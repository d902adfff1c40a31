use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

const SQL_CLIENT_TRIPS: &str = r#"
SELECT trip_id, driver_id, trip_date, status
FROM trips
WHERE client_id = $1
ORDER BY trip_date DESC
"#;

/// Millisecond precision, e.g. `2024-01-01 10:00:00.250`
pub const TRIP_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListClientTripsQuery {
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTripItem {
    pub trip_id: String,
    pub driver_id: String,
    pub trip_date: String,
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ListClientTripsError {
    #[error("Client has no trips")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Trips for one client, newest first
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: &PgPool,
    query: ListClientTripsQuery,
) -> Result<Vec<ClientTripItem>, ListClientTripsError> {
    let records = sqlx::query_as::<_, ClientTripRecord>(SQL_CLIENT_TRIPS)
        .bind(&query.client_id)
        .fetch_all(pool)
        .await?;

    if records.is_empty() {
        return Err(ListClientTripsError::NotFound);
    }

    Ok(records.into_iter().map(ClientTripItem::from).collect())
}

#[derive(Debug, sqlx::FromRow)]
struct ClientTripRecord {
    trip_id: String,
    driver_id: String,
    trip_date: NaiveDateTime,
    status: String,
}

impl From<ClientTripRecord> for ClientTripItem {
    fn from(record: ClientTripRecord) -> Self {
        Self {
            trip_id: record.trip_id,
            driver_id: record.driver_id,
            trip_date: record.trip_date.format(TRIP_DATE_FORMAT).to_string(),
            status: record.status,
        }
    }
}
