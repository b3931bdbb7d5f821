//! JSON controllers bound by the UI shell.
//!
//! # Responsibility
//! - Decode JSON payloads into add/update models.
//! - Reject blank identifiers and natural keys before touching services.
//! - Encode results as pretty JSON, or as `{"Error": ...}` /
//!   `{"Response": ...}` envelopes.
//!
//! # Invariants
//! - Controller methods never panic and always return a UTF-8 JSON string.
//! - No business rule lives here beyond blank-string checks.

pub mod bus_controller;
pub mod bus_stop_controller;
pub mod driver_controller;
pub mod route_controller;

use crate::repo::RepoError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Controller-level error, rendered into the `{"Error": ...}` envelope.
#[derive(Debug)]
pub enum ControllerError {
    /// Blank required field or malformed JSON payload.
    Validation(String),
    /// Service/repository failure.
    Repo(RepoError),
    /// Result could not be serialized.
    Encode(serde_json::Error),
}

impl ControllerError {
    /// Stable error class used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Repo(RepoError::NotFound(_)) => "not_found",
            Self::Repo(RepoError::AlreadyExists(_)) => "already_exists",
            Self::Repo(RepoError::AlreadyAssigned(_)) => "already_assigned",
            Self::Repo(RepoError::InvalidData(_)) => "invalid_data",
            Self::Repo(_) => "db",
            Self::Encode(_) => "encode",
        }
    }
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => f.write_str(message),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode response: {err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(_) => None,
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorEnvelope<'a> {
    error: &'a str,
}

/// Success envelope for operations that return no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope {
    pub response: String,
}

impl ResponseEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            response: message.into(),
        }
    }
}

/// Renders `message` as an `{"Error": message}` envelope.
pub fn error_envelope(message: &str) -> String {
    serde_json::to_string_pretty(&ErrorEnvelope { error: message })
        .unwrap_or_else(|_| String::from("{\n  \"Error\": \"unrenderable error\"\n}"))
}

/// Renders `message` as a `{"Response": message}` envelope.
pub fn response_envelope(message: &str) -> String {
    serde_json::to_string_pretty(&ResponseEnvelope::new(message))
        .unwrap_or_else(|err| error_envelope(&err.to_string()))
}

/// Fails with `"<field> can't be blank"` when `value` is empty or whitespace.
pub(crate) fn require(field: &str, value: &str) -> ControllerResult<()> {
    if value.trim().is_empty() {
        return Err(ControllerError::Validation(format!("{field} can't be blank")));
    }
    Ok(())
}

pub(crate) fn decode<T: DeserializeOwned>(payload: &str) -> ControllerResult<T> {
    serde_json::from_str(payload)
        .map_err(|err| ControllerError::Validation(format!("invalid payload: {err}")))
}

/// Runs one controller call and renders its outcome as JSON text.
pub(crate) fn respond<T: Serialize>(
    operation: &'static str,
    call: impl FnOnce() -> ControllerResult<T>,
) -> String {
    let outcome = call()
        .and_then(|value| serde_json::to_string_pretty(&value).map_err(ControllerError::Encode));
    match outcome {
        Ok(json) => {
            debug!("event=controller_call module=controller status=ok op={operation}");
            json
        }
        Err(err) => {
            warn!(
                "event=controller_call module=controller status=error op={operation} error_kind={}",
                err.kind()
            );
            error_envelope(&err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{error_envelope, require, respond, response_envelope, ControllerError};
    use crate::model::EntityKind;
    use crate::repo::RepoError;

    #[test]
    fn envelopes_use_pascal_case_keys_and_two_space_indent() {
        assert_eq!(
            error_envelope("Bus not found"),
            "{\n  \"Error\": \"Bus not found\"\n}"
        );
        assert_eq!(
            response_envelope("Assigned bus successfully"),
            "{\n  \"Response\": \"Assigned bus successfully\"\n}"
        );
    }

    #[test]
    fn require_rejects_whitespace() {
        let err = require("Id", "  \t").unwrap_err();
        assert_eq!(err.to_string(), "Id can't be blank");
        assert!(require("Id", "x").is_ok());
    }

    #[test]
    fn respond_renders_repo_errors_as_envelope() {
        let rendered = respond::<()>("test_op", || {
            Err(ControllerError::from(RepoError::NotFound(EntityKind::BusStop)))
        });
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["Error"], "Bus stop not found");
    }

    #[test]
    fn error_kinds_are_stable() {
        assert_eq!(
            ControllerError::Repo(RepoError::AlreadyExists(EntityKind::Bus)).kind(),
            "already_exists"
        );
        assert_eq!(
            ControllerError::Validation(String::new()).kind(),
            "validation"
        );
    }
}
