//! Driver domain model.
//!
//! # Invariants
//! - `passport_series`, `snils` and `license_series` are each unique.

use super::id::{EntityId, IdSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted driver record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Driver {
    pub id: EntityId,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub patronymic: String,
    pub birth_date: DateTime<Utc>,
    pub passport_series: String,
    pub snils: String,
    pub license_series: String,
}

/// Add request for a driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewDriver {
    #[serde(default)]
    pub id: IdSpec,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub patronymic: String,
    pub birth_date: DateTime<Utc>,
    pub passport_series: String,
    pub snils: String,
    pub license_series: String,
}

impl NewDriver {
    pub fn into_driver(self) -> Driver {
        Driver {
            id: self.id.resolve(),
            name: self.name,
            surname: self.surname,
            patronymic: self.patronymic,
            birth_date: self.birth_date,
            passport_series: self.passport_series,
            snils: self.snils,
            license_series: self.license_series,
        }
    }
}
