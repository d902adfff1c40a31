pub mod queries;
pub mod routes;

pub use queries::{ClientTripItem, ListClientTripsError, ListClientTripsQuery};
pub use routes::clients_routes;
