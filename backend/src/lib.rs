//! Users REST API: domain model, HTTP adapter, and PostgreSQL persistence.
//!
//! The crate follows a ports-and-adapters layout. [`domain`] owns the user
//! model, validation, and services; [`inbound::http`] maps requests onto
//! those services; [`outbound::persistence`] implements the ports against
//! PostgreSQL with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
