//! Port for checking that the backing database answers queries.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised while probing the database.
    pub enum DatabaseProbeError {
        /// No connection could be obtained.
        Connection => "database connection failed",
        /// The probe query failed.
        Query => "database probe query failed",
    }
}

/// Liveness probe for the database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Run a trivial query; `Ok(true)` when the database answered.
    async fn is_alive(&self) -> Result<bool, DatabaseProbeError>;
}

/// Probe returning a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixtureDatabaseProbe {
    alive: bool,
}

impl FixtureDatabaseProbe {
    /// Probe that always reports `alive`.
    #[must_use]
    pub const fn new(alive: bool) -> Self {
        Self { alive }
    }
}

impl Default for FixtureDatabaseProbe {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl DatabaseProbe for FixtureDatabaseProbe {
    async fn is_alive(&self) -> Result<bool, DatabaseProbeError> {
        Ok(self.alive)
    }
}
