//! Domain primitives, ports and services.
//!
//! Purpose: define the user entity, the error model shared by every adapter,
//! and the services that translate repository outcomes into domain results.
//!
//! Public surface:
//! - `Error`: domain error with code and details.
//! - `ErrorCode`: stable error category.
//! - `User`, `UserDraft`, `UserId`: the user entity and its inputs.
//! - `UserService`, `HealthService`: use cases driven by inbound adapters.

pub mod error;
mod health_service;
pub mod ports;
pub mod user;
mod user_service;

pub use self::error::{
    Error, ErrorCode, ErrorDetails, ErrorEnvelope, ErrorValidationError,
    VALIDATION_FAILED_MESSAGE,
};
pub use self::health_service::HealthService;
pub use self::user::{EMAIL_MAX, NAME_MAX, User, UserDraft, UserId, UserValidationError};
pub use self::user_service::UserService;
