pub mod queries;
pub mod routes;

pub use queries::{DriverStatsResponse, GetDriverStatsError, GetDriverStatsQuery};
pub use routes::drivers_routes;
