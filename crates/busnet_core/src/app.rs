//! Application wiring.
//!
//! # Responsibility
//! - Own the single SQLite handle opened at startup.
//! - Build repositories, services and controllers that borrow that handle.
//!
//! # Invariants
//! - No global state: callers hold the `App` and ask it for controllers.
//! - Every controller handed out shares the same connection.

use crate::controller::bus_controller::BusController;
use crate::controller::bus_stop_controller::BusStopController;
use crate::controller::driver_controller::DriverController;
use crate::controller::route_controller::RouteController;
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::repo::bus_repo::SqliteBusRepository;
use crate::repo::bus_stop_repo::SqliteBusStopRepository;
use crate::repo::driver_repo::SqliteDriverRepository;
use crate::repo::route_repo::SqliteRouteRepository;
use crate::repo::RepoResult;
use crate::service::bus_service::BusService;
use crate::service::bus_stop_service::BusStopService;
use crate::service::driver_service::DriverService;
use crate::service::route_service::RouteService;
use rusqlite::Connection;
use std::path::Path;

pub type SqliteBusController<'conn> = BusController<SqliteBusRepository<'conn>>;
pub type SqliteDriverController<'conn> = DriverController<SqliteDriverRepository<'conn>>;
pub type SqliteBusStopController<'conn> = BusStopController<SqliteBusStopRepository<'conn>>;
pub type SqliteRouteController<'conn> = RouteController<
    SqliteRouteRepository<'conn>,
    SqliteDriverRepository<'conn>,
    SqliteBusRepository<'conn>,
    SqliteBusStopRepository<'conn>,
>;

/// Composition root holding the store handle.
pub struct App {
    conn: Connection,
}

impl App {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory database, mainly for tests and demos.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bus_controller(&self) -> RepoResult<SqliteBusController<'_>> {
        let repo = SqliteBusRepository::try_new(&self.conn)?;
        Ok(BusController::new(BusService::new(repo)))
    }

    pub fn driver_controller(&self) -> RepoResult<SqliteDriverController<'_>> {
        let repo = SqliteDriverRepository::try_new(&self.conn)?;
        Ok(DriverController::new(DriverService::new(repo)))
    }

    pub fn bus_stop_controller(&self) -> RepoResult<SqliteBusStopController<'_>> {
        let repo = SqliteBusStopRepository::try_new(&self.conn)?;
        Ok(BusStopController::new(BusStopService::new(repo)))
    }

    pub fn route_controller(&self) -> RepoResult<SqliteRouteController<'_>> {
        let service = RouteService::new(
            SqliteRouteRepository::try_new(&self.conn)?,
            SqliteDriverRepository::try_new(&self.conn)?,
            SqliteBusRepository::try_new(&self.conn)?,
            SqliteBusStopRepository::try_new(&self.conn)?,
        );
        Ok(RouteController::new(service))
    }
}
