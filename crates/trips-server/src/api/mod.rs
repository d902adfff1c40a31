//! HTTP surface: router assembly and the health endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceBuilder;

use crate::{db, features, middleware};

/// Full application router with middleware applied
pub fn router(pool: PgPool) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(pool.clone())
        .merge(features::router(pool))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::tracing_layer())
                .layer(middleware::compression_layer()),
        )
}

/// `200 {"status":"ok"}` when the database answers, `503 {"status":"db_unreachable"}` otherwise
async fn health_check(State(pool): State<PgPool>) -> impl IntoResponse {
    match db::health_check(&pool).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "db_unreachable" })),
            )
        },
    }
}
