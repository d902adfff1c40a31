//! HTTP error responses
//!
//! Every failure is rendered as `{"detail": "<code>"}` with a stable code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the data endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("driver_not_found")]
    DriverNotFound,

    #[error("client_not_found")]
    ClientNotFound,

    #[error("db_unreachable")]
    DbUnreachable(#[source] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DriverNotFound | ApiError::ClientNotFound => StatusCode::NOT_FOUND,
            ApiError::DbUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::DriverNotFound => "driver_not_found",
            ApiError::ClientNotFound => "client_not_found",
            ApiError::DbUnreachable(_) => "db_unreachable",
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DbUnreachable(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::DbUnreachable(ref e) = self {
            tracing::error!(error = ?e, "Database error while serving request");
        }

        (self.status(), Json(ErrorResponse::new(self.code()))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
