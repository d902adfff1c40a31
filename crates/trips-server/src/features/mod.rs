//! Feature modules implementing the reporting API
//!
//! Each feature is a vertical slice with its own `queries` (SQL plus result
//! types) and `routes` (Axum handlers). All features are read-only.
//!
//! - **drivers**: per-driver activity statistics
//! - **clients**: per-client trip history

pub mod clients;
pub mod drivers;

use axum::Router;
use sqlx::PgPool;

/// Mounts every feature under its path prefix
///
/// - `/drivers` - driver statistics
/// - `/clients` - client trip history
pub fn router(pool: PgPool) -> Router<()> {
    Router::new()
        .nest("/drivers", drivers::drivers_routes().with_state(pool.clone()))
        .nest("/clients", clients::clients_routes().with_state(pool))
}
