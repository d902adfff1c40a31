//! Trips Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Read-only HTTP reporting API over the `trips` table filled by
//! `trips-ingest`.
//!
//! # Endpoints
//!
//! - `GET /drivers/:driver_id/stats` - distinct active days and success rate
//! - `GET /clients/:client_id/trips` - trip history, newest first
//! - `GET /health` - database reachability
//!
//! ## Framework Stack
//!
//! - **Axum**: routing and extractors
//! - **SQLx**: PostgreSQL pool, connected lazily
//! - **Tower**: request tracing and compression layers
//!
//! # Example
//!
//! ```no_run
//! use trips_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database)?;
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     axum::serve(listener, api::router(pool)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
