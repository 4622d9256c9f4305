//! Health check service backed by a [`DatabaseProbe`].

use std::sync::Arc;

use serde_json::json;
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::DatabaseProbe;

/// Reports whether the service can reach its database.
pub struct HealthService<P: ?Sized = dyn DatabaseProbe> {
    probe: Arc<P>,
}

impl<P: ?Sized> HealthService<P> {
    /// Create a service over `probe`.
    pub const fn new(probe: Arc<P>) -> Self {
        Self { probe }
    }
}

impl<P> HealthService<P>
where
    P: DatabaseProbe + ?Sized,
{
    /// Probe the database.
    ///
    /// # Errors
    ///
    /// Returns a dependency failure when the probe itself fails.
    pub async fn check_health(&self) -> Result<bool, Error> {
        self.probe.is_alive().await.map_err(|err| {
            let message = "An error occurred when checking if application is alive";
            error!(error = %err, "{message}");
            Error::dependency_failure(message).with_details(json!("database"), json!(err.to_string()))
        })
    }
}
