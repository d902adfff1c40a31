//! Driver API routes
//!
//! - `GET /drivers/:driver_id/stats` - activity summary for one driver

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::queries::{self, DriverStatsResponse, GetDriverStatsError, GetDriverStatsQuery};
use crate::error::{ApiError, ApiResult};

pub fn drivers_routes() -> Router<PgPool> {
    Router::new().route("/:driver_id/stats", get(get_driver_stats))
}

/// Stats for a single driver
///
/// # Response
///
/// - `200 OK` - `{ "driver_id", "total_days", "success_rate" }`
/// - `404 Not Found` - `{"detail": "driver_not_found"}`
/// - `503 Service Unavailable` - `{"detail": "db_unreachable"}`
async fn get_driver_stats(
    State(pool): State<PgPool>,
    Path(driver_id): Path<String>,
) -> ApiResult<Json<DriverStatsResponse>> {
    tracing::info!(%driver_id, "Driver stats requested");

    let stats = queries::handle(&pool, GetDriverStatsQuery { driver_id }).await?;
    Ok(Json(stats))
}

impl From<GetDriverStatsError> for ApiError {
    fn from(err: GetDriverStatsError) -> Self {
        match err {
            GetDriverStatsError::NotFound => ApiError::DriverNotFound,
            GetDriverStatsError::Database(e) => ApiError::DbUnreachable(e),
        }
    }
}
