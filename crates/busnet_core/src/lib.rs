//! Core domain logic for the bus network manager.
//! Repositories, services and JSON controllers over one SQLite store.

pub mod app;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use app::App;
pub use controller::{error_envelope, response_envelope, ControllerError, ResponseEnvelope};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::bus::{Bus, NewBus};
pub use model::bus_stop::{BusStop, NewBusStop};
pub use model::driver::{Driver, NewDriver};
pub use model::id::{EntityId, IdSpec};
pub use model::route::{NewRoute, Route};
pub use model::EntityKind;
pub use repo::bus_repo::{BusRepository, SqliteBusRepository};
pub use repo::bus_stop_repo::{BusStopRepository, SqliteBusStopRepository};
pub use repo::driver_repo::{DriverRepository, SqliteDriverRepository};
pub use repo::route_repo::{Association, RouteRepository, SqliteRouteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::bus_service::BusService;
pub use service::bus_stop_service::BusStopService;
pub use service::driver_service::DriverService;
pub use service::route_service::RouteService;

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
