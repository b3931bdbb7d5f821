//! Route use-case service.
//!
//! # Responsibility
//! - Route CRUD and route association use-cases.
//! - Verify association targets exist before assigning them.
//!
//! # Invariants
//! - Assign checks run in order: route, then target, then insert. A missing
//!   route therefore always reports `Route not found`.
//! - Unassign and joined reads need only the route to exist.

use crate::model::bus::Bus;
use crate::model::bus_stop::BusStop;
use crate::model::driver::Driver;
use crate::model::route::{NewRoute, Route};
use crate::repo::bus_repo::BusRepository;
use crate::repo::bus_stop_repo::BusStopRepository;
use crate::repo::driver_repo::DriverRepository;
use crate::repo::route_repo::RouteRepository;
use crate::repo::RepoResult;

/// Route service over the route repository and the repositories of every
/// association target.
pub struct RouteService<R, D, B, S>
where
    R: RouteRepository,
    D: DriverRepository,
    B: BusRepository,
    S: BusStopRepository,
{
    routes: R,
    drivers: D,
    buses: B,
    bus_stops: S,
}

impl<R, D, B, S> RouteService<R, D, B, S>
where
    R: RouteRepository,
    D: DriverRepository,
    B: BusRepository,
    S: BusStopRepository,
{
    pub fn new(routes: R, drivers: D, buses: B, bus_stops: S) -> Self {
        Self {
            routes,
            drivers,
            buses,
            bus_stops,
        }
    }

    pub fn get_by_id(&self, id: &str) -> RepoResult<Route> {
        self.routes.get_by_id(id)
    }

    pub fn get_by_number(&self, number: &str) -> RepoResult<Route> {
        self.routes.get_by_number(number)
    }

    pub fn add(&self, route: NewRoute) -> RepoResult<Route> {
        self.routes.add(route)
    }

    pub fn get_all(&self) -> RepoResult<Vec<Route>> {
        self.routes.get_all()
    }

    pub fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.routes.delete_by_id(id)
    }

    pub fn update_by_id(&self, route: &Route) -> RepoResult<Route> {
        self.routes.update_by_id(route)?;
        self.routes.get_by_id(&route.id)
    }

    pub fn assign_driver(&self, route_id: &str, driver_id: &str) -> RepoResult<()> {
        self.routes.get_by_id(route_id)?;
        self.drivers.get_by_id(driver_id)?;
        self.routes.assign_driver(route_id, driver_id)
    }

    pub fn assign_bus(&self, route_id: &str, bus_id: &str) -> RepoResult<()> {
        self.routes.get_by_id(route_id)?;
        self.buses.get_by_id(bus_id)?;
        self.routes.assign_bus(route_id, bus_id)
    }

    pub fn assign_bus_stop(&self, route_id: &str, bus_stop_id: &str) -> RepoResult<()> {
        self.routes.get_by_id(route_id)?;
        self.bus_stops.get_by_id(bus_stop_id)?;
        self.routes.assign_bus_stop(route_id, bus_stop_id)
    }

    pub fn unassign_driver(&self, route_id: &str, driver_id: &str) -> RepoResult<()> {
        self.routes.unassign_driver(route_id, driver_id)
    }

    pub fn unassign_bus(&self, route_id: &str, bus_id: &str) -> RepoResult<()> {
        self.routes.unassign_bus(route_id, bus_id)
    }

    pub fn unassign_bus_stop(&self, route_id: &str, bus_stop_id: &str) -> RepoResult<()> {
        self.routes.unassign_bus_stop(route_id, bus_stop_id)
    }

    pub fn get_all_drivers_by_id(&self, route_id: &str) -> RepoResult<Vec<Driver>> {
        self.routes.get_all_drivers_by_id(route_id)
    }

    pub fn get_all_buses_by_id(&self, route_id: &str) -> RepoResult<Vec<Bus>> {
        self.routes.get_all_buses_by_id(route_id)
    }

    pub fn get_all_bus_stops_by_id(&self, route_id: &str) -> RepoResult<Vec<BusStop>> {
        self.routes.get_all_bus_stops_by_id(route_id)
    }
}
