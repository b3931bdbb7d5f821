//! Bus stop domain model.
//!
//! `route_id` is a plain optional attribute. Membership of a stop in a route
//! is the `routes_bus_stops` association managed by the route repository.

use super::id::{EntityId, IdSpec};
use serde::{Deserialize, Serialize};

/// Persisted bus stop record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusStop {
    pub id: EntityId,
    #[serde(default)]
    pub route_id: Option<EntityId>,
    pub lat: f64,
    pub long: f64,
    /// Position of the stop within its route.
    #[serde(default)]
    pub order: i64,
    /// Natural key.
    pub name: String,
}

/// Add request for a bus stop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewBusStop {
    #[serde(default)]
    pub id: IdSpec,
    #[serde(default)]
    pub route_id: Option<EntityId>,
    pub lat: f64,
    pub long: f64,
    #[serde(default)]
    pub order: i64,
    pub name: String,
}

impl NewBusStop {
    pub fn into_bus_stop(self) -> BusStop {
        BusStop {
            id: self.id.resolve(),
            route_id: normalize_route_id(self.route_id),
            lat: self.lat,
            long: self.long,
            order: self.order,
            name: self.name,
        }
    }
}

/// Treats a blank `RouteId` the same as an absent one.
pub fn normalize_route_id(route_id: Option<EntityId>) -> Option<EntityId> {
    route_id
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
