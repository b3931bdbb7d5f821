//! Entity identifiers and the add-time id input variant.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Text identifier shared by every fleet entity.
pub type EntityId = String;

/// How an add request wants its id assigned.
///
/// The JSON boundary maps a missing, `null` or blank `Id` to
/// [`IdSpec::Generate`], so no later layer checks for blank sentinels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdSpec {
    /// Caller-provided, non-blank id.
    Specified(EntityId),
    /// Generate a fresh UUID v4 at insert time.
    #[default]
    Generate,
}

impl IdSpec {
    /// Builds an id spec from raw caller input.
    ///
    /// A non-blank id is kept verbatim; lookups compare ids byte for byte.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Generate
        } else {
            Self::Specified(raw.to_string())
        }
    }

    /// Produces the final id, generating one when requested.
    pub fn resolve(self) -> EntityId {
        match self {
            Self::Specified(id) => id,
            Self::Generate => Uuid::new_v4().to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for IdSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw.as_deref().unwrap_or_default()))
    }
}
