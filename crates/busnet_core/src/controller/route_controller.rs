//! Route JSON controller, including route association calls.

use super::{decode, require, respond, ControllerResult, ResponseEnvelope};
use crate::model::route::{NewRoute, Route};
use crate::repo::bus_repo::BusRepository;
use crate::repo::bus_stop_repo::BusStopRepository;
use crate::repo::driver_repo::DriverRepository;
use crate::repo::route_repo::RouteRepository;
use crate::service::route_service::RouteService;

pub struct RouteController<R, D, B, S>
where
    R: RouteRepository,
    D: DriverRepository,
    B: BusRepository,
    S: BusStopRepository,
{
    service: RouteService<R, D, B, S>,
}

impl<R, D, B, S> RouteController<R, D, B, S>
where
    R: RouteRepository,
    D: DriverRepository,
    B: BusRepository,
    S: BusStopRepository,
{
    pub fn new(service: RouteService<R, D, B, S>) -> Self {
        Self { service }
    }

    pub fn get_by_id(&self, id: &str) -> String {
        respond("route_get_by_id", || {
            require("Id", id)?;
            Ok(self.service.get_by_id(id)?)
        })
    }

    pub fn get_by_number(&self, number: &str) -> String {
        respond("route_get_by_number", || {
            require("Number", number)?;
            Ok(self.service.get_by_number(number)?)
        })
    }

    pub fn get_all(&self) -> String {
        respond("route_get_all", || Ok(self.service.get_all()?))
    }

    pub fn add(&self, payload: &str) -> String {
        respond("route_add", || {
            let route: NewRoute = decode(payload)?;
            require("Number", &route.number)?;
            Ok(self.service.add(route)?)
        })
    }

    pub fn delete_by_id(&self, id: &str) -> String {
        respond("route_delete_by_id", || {
            require("Id", id)?;
            self.service.delete_by_id(id)?;
            Ok(ResponseEnvelope::new("Deleted route successfully"))
        })
    }

    pub fn update_by_id(&self, payload: &str) -> String {
        respond("route_update_by_id", || {
            let route: Route = decode(payload)?;
            require("Id", &route.id)?;
            require("Number", &route.number)?;
            Ok(self.service.update_by_id(&route)?)
        })
    }

    pub fn assign_driver(&self, route_id: &str, driver_id: &str) -> String {
        respond("route_assign_driver", || {
            require_pair(route_id, "DriverId", driver_id)?;
            self.service.assign_driver(route_id, driver_id)?;
            Ok(ResponseEnvelope::new("Assigned driver successfully"))
        })
    }

    pub fn assign_bus(&self, route_id: &str, bus_id: &str) -> String {
        respond("route_assign_bus", || {
            require_pair(route_id, "BusId", bus_id)?;
            self.service.assign_bus(route_id, bus_id)?;
            Ok(ResponseEnvelope::new("Assigned bus successfully"))
        })
    }

    pub fn assign_bus_stop(&self, route_id: &str, bus_stop_id: &str) -> String {
        respond("route_assign_bus_stop", || {
            require_pair(route_id, "BusStopId", bus_stop_id)?;
            self.service.assign_bus_stop(route_id, bus_stop_id)?;
            Ok(ResponseEnvelope::new("Assigned bus stop successfully"))
        })
    }

    pub fn unassign_driver(&self, route_id: &str, driver_id: &str) -> String {
        respond("route_unassign_driver", || {
            require_pair(route_id, "DriverId", driver_id)?;
            self.service.unassign_driver(route_id, driver_id)?;
            Ok(ResponseEnvelope::new("Unassigned driver successfully"))
        })
    }

    pub fn unassign_bus(&self, route_id: &str, bus_id: &str) -> String {
        respond("route_unassign_bus", || {
            require_pair(route_id, "BusId", bus_id)?;
            self.service.unassign_bus(route_id, bus_id)?;
            Ok(ResponseEnvelope::new("Unassigned bus successfully"))
        })
    }

    pub fn unassign_bus_stop(&self, route_id: &str, bus_stop_id: &str) -> String {
        respond("route_unassign_bus_stop", || {
            require_pair(route_id, "BusStopId", bus_stop_id)?;
            self.service.unassign_bus_stop(route_id, bus_stop_id)?;
            Ok(ResponseEnvelope::new("Unassigned bus stop successfully"))
        })
    }

    pub fn get_all_drivers_by_id(&self, route_id: &str) -> String {
        respond("route_get_all_drivers_by_id", || {
            require("RouteId", route_id)?;
            Ok(self.service.get_all_drivers_by_id(route_id)?)
        })
    }

    pub fn get_all_buses_by_id(&self, route_id: &str) -> String {
        respond("route_get_all_buses_by_id", || {
            require("RouteId", route_id)?;
            Ok(self.service.get_all_buses_by_id(route_id)?)
        })
    }

    pub fn get_all_bus_stops_by_id(&self, route_id: &str) -> String {
        respond("route_get_all_bus_stops_by_id", || {
            require("RouteId", route_id)?;
            Ok(self.service.get_all_bus_stops_by_id(route_id)?)
        })
    }
}

fn require_pair(route_id: &str, other_field: &str, other_id: &str) -> ControllerResult<()> {
    require("RouteId", route_id)?;
    require(other_field, other_id)
}
