//! Fleet domain model: buses, drivers, bus stops and routes.
//!
//! # Responsibility
//! - Define the records persisted by repositories and exchanged as JSON.
//! - Define add-request shapes that carry an explicit [`IdSpec`].
//!
//! # Invariants
//! - Persisted records always carry a resolved, non-blank id.
//! - JSON field names are PascalCase (`Id`, `RegisterNumber`, ...).

pub mod bus;
pub mod bus_stop;
pub mod driver;
pub mod id;
pub mod route;

use std::fmt::{Display, Formatter};

/// Entity families known to the core, used to label errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Bus,
    Driver,
    BusStop,
    Route,
}

impl EntityKind {
    /// Human-readable label used in error messages ("Bus stop not found").
    pub fn label(self) -> &'static str {
        match self {
            Self::Bus => "Bus",
            Self::Driver => "Driver",
            Self::BusStop => "Bus stop",
            Self::Route => "Route",
        }
    }

    /// Stable snake_case name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Driver => "driver",
            Self::BusStop => "bus_stop",
            Self::Route => "route",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
