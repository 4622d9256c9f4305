//! Domain-level error types.
//!
//! Services report failures as [`Error`]: a stable [`ErrorCode`], a
//! human-readable message, and optional [`ErrorDetails`]. The HTTP adapter
//! picks the status from the code and serialises the error as an
//! [`ErrorEnvelope`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Message used for every request that fails validation.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    ValidationFailed,
    /// The requested resource does not exist.
    NotFound,
    /// A downstream dependency such as the database failed.
    DependencyFailure,
}

impl ErrorCode {
    /// Whether the failure is an expected outcome of client input.
    ///
    /// Operational errors are reported as 4xx responses; everything else is
    /// a server fault.
    #[must_use]
    pub const fn is_operational(self) -> bool {
        matches!(self, Self::ValidationFailed | Self::NotFound)
    }
}

/// Structured context attached to an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetails {
    /// Inputs of the failing operation.
    #[schema(value_type = Object, example = json!({"user_id": "7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44"}))]
    pub context: Value,
    /// What went wrong, or `null` when the outcome speaks for itself.
    #[schema(value_type = Object, nullable = true)]
    pub cause: Value,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User could not be read");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.is_operational());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ErrorEnvelope")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<ErrorDetails>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty or whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if the message is blank.
    ///
    /// Messages are compile-time literals throughout the crate; use
    /// [`Error::try_new`] for anything built at runtime.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    #[must_use]
    pub const fn details(&self) -> Option<&ErrorDetails> {
        self.details.as_ref()
    }

    /// Whether the error stems from client input rather than a fault.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        self.code.is_operational()
    }

    /// Attach the operation context and the underlying cause.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::{Value, json};
    ///
    /// let err = Error::not_found("User could not be read")
    ///     .with_details(json!("7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44"), Value::Null);
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, context: Value, cause: Value) -> Self {
        self.details = Some(ErrorDetails { context, cause });
        self
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`] with the
    /// shared validation message.
    pub fn validation_failed() -> Self {
        Self::new(ErrorCode::ValidationFailed, VALIDATION_FAILED_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::DependencyFailure`].
    pub fn dependency_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DependencyFailure, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Human-readable summary.
    #[schema(example = "User could not be read")]
    pub message: String,
    /// Operation context and cause, when available.
    pub details: Option<ErrorDetails>,
    /// `true` for client errors (4xx), `false` for server faults (5xx).
    #[schema(example = true)]
    pub is_operational: bool,
}

impl From<Error> for ErrorEnvelope {
    fn from(value: Error) -> Self {
        let is_operational = value.is_operational();
        Self {
            message: value.message,
            details: value.details,
            is_operational,
        }
    }
}
