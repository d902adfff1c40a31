use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// `success_rate` is the rounded percentage of `done` trips
const SQL_DRIVER_STATS: &str = r#"
SELECT
    driver_id,
    COUNT(DISTINCT DATE(trip_date)) AS total_days,
    ROUND(
        100.0 * SUM(CASE WHEN status = 'done' THEN 1 ELSE 0 END) / COUNT(*)
    )::INT AS success_rate
FROM trips
WHERE driver_id = $1
GROUP BY driver_id
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDriverStatsQuery {
    pub driver_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DriverStatsResponse {
    pub driver_id: String,
    /// Distinct calendar days with at least one trip
    pub total_days: i64,
    pub success_rate: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum GetDriverStatsError {
    #[error("Driver not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: &PgPool,
    query: GetDriverStatsQuery,
) -> Result<DriverStatsResponse, GetDriverStatsError> {
    sqlx::query_as::<_, DriverStatsResponse>(SQL_DRIVER_STATS)
        .bind(&query.driver_id)
        .fetch_optional(pool)
        .await?
        .ok_or(GetDriverStatsError::NotFound)
}
