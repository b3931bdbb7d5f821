//! Bus domain model.
//!
//! # Invariants
//! - `register_number` is unique across the `buses` table.
//! - Dates are UTC instants and round-trip through storage unchanged.

use super::id::{EntityId, IdSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted bus record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bus {
    pub id: EntityId,
    pub brand: String,
    /// Serialized as `BusModel` to match the UI payload naming.
    #[serde(rename = "BusModel")]
    pub model: String,
    /// Natural key.
    pub register_number: String,
    pub assembly_date: DateTime<Utc>,
    pub last_repair_date: DateTime<Utc>,
}

/// Add request for a bus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewBus {
    #[serde(default)]
    pub id: IdSpec,
    pub brand: String,
    #[serde(rename = "BusModel")]
    pub model: String,
    pub register_number: String,
    pub assembly_date: DateTime<Utc>,
    pub last_repair_date: DateTime<Utc>,
}

impl NewBus {
    /// Resolves the id and produces the record to persist.
    pub fn into_bus(self) -> Bus {
        Bus {
            id: self.id.resolve(),
            brand: self.brand,
            model: self.model,
            register_number: self.register_number,
            assembly_date: self.assembly_date,
            last_repair_date: self.last_repair_date,
        }
    }
}
