//! Request validation helpers shared by the HTTP handlers.
//!
//! Every validation failure becomes an [`Error`] with the shared
//! "Validation failed" message, the offending input as context, and a list
//! of field problems as cause.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{Error, UserId, UserValidationError};

/// Part of the request a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Location {
    Body,
    Query,
    Path,
}

/// One problem with one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FieldViolation {
    location: Location,
    field: Option<&'static str>,
    message: String,
}

impl FieldViolation {
    pub(crate) fn new(location: Location, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            location,
            field: Some(field),
            message: message.into(),
        }
    }

    /// Problem with the input as a whole, such as unparseable JSON.
    pub(crate) fn whole(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            field: None,
            message: message.into(),
        }
    }

    pub(crate) fn from_user(location: Location, problem: &UserValidationError) -> Self {
        Self::new(location, problem.field(), problem.to_string())
    }
}

pub(crate) fn validation_error(context: Value, violations: &[FieldViolation]) -> Error {
    Error::validation_failed().with_details(context, json!(violations))
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|problem| {
        validation_error(
            json!({ "user_id": raw }),
            &[FieldViolation::from_user(Location::Path, &problem)],
        )
    })
}
