//! Route domain model.

use super::id::{EntityId, IdSpec};
use serde::{Deserialize, Serialize};

/// Persisted route record. `number` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    pub id: EntityId,
    pub number: String,
}

/// Add request for a route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewRoute {
    #[serde(default)]
    pub id: IdSpec,
    pub number: String,
}

impl NewRoute {
    pub fn into_route(self) -> Route {
        Route {
            id: self.id.resolve(),
            number: self.number,
        }
    }
}
