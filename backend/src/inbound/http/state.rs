//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only reach the
//! domain services, never the adapters behind them.

use std::sync::Arc;

use crate::domain::{HealthService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User management use cases.
    pub users: Arc<UserService>,
    /// Database health probe.
    pub health: Arc<HealthService>,
}

impl HttpState {
    /// Bundle the services handlers depend on.
    #[must_use]
    pub const fn new(users: Arc<UserService>, health: Arc<HealthService>) -> Self {
        Self { users, health }
    }
}
