//! Client API routes
//!
//! - `GET /clients/:client_id/trips` - every trip of one client, newest first

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::queries::{self, ClientTripItem, ListClientTripsError, ListClientTripsQuery};
use crate::error::{ApiError, ApiResult};

pub fn clients_routes() -> Router<PgPool> {
    Router::new().route("/:client_id/trips", get(list_client_trips))
}

/// # Response
///
/// - `200 OK` - array of `{ "trip_id", "driver_id", "trip_date", "status" }`
/// - `404 Not Found` - `{"detail": "client_not_found"}`
/// - `503 Service Unavailable` - `{"detail": "db_unreachable"}`
async fn list_client_trips(
    State(pool): State<PgPool>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<Vec<ClientTripItem>>> {
    tracing::info!(%client_id, "Client trips requested");

    let trips = queries::handle(&pool, ListClientTripsQuery { client_id }).await?;
    Ok(Json(trips))
}

impl From<ListClientTripsError> for ApiError {
    fn from(err: ListClientTripsError) -> Self {
        match err {
            ListClientTripsError::NotFound => ApiError::ClientNotFound,
            ListClientTripsError::Database(e) => ApiError::DbUnreachable(e),
        }
    }
}
