//! HTTP server configuration object.

use std::net::{Ipv4Addr, SocketAddr};

use backend::settings::Settings;

/// Values the server needs beyond the HTTP state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) openapi_url: String,
    pub(crate) docs_url: String,
}

impl ServerConfig {
    /// Listen on every interface at the configured port.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port)),
            openapi_url: settings.openapi_url.clone(),
            docs_url: settings.docs_url.clone(),
        }
    }

    /// Swagger UI route pattern covering every asset under `docs_url`.
    pub(crate) fn docs_route(&self) -> String {
        format!("{}/{{_:.*}}", self.docs_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(docs_url: &str) -> Settings {
        Settings {
            port: 5002,
            env: "development".to_owned(),
            openapi_url: "/openapi.json".to_owned(),
            docs_url: docs_url.to_owned(),
            database_url: "postgres://localhost/users".to_owned(),
            database_max_connections: None,
        }
    }

    #[test]
    fn binds_all_interfaces_on_configured_port() {
        let config = ServerConfig::from_settings(&settings("/docs"));
        assert_eq!(config.bind_addr, "0.0.0.0:5002".parse().expect("socket address"));
    }

    #[test]
    fn docs_route_ignores_trailing_slash() {
        assert_eq!(ServerConfig::from_settings(&settings("/docs/")).docs_route(), "/docs/{_:.*}");
        assert_eq!(ServerConfig::from_settings(&settings("/docs")).docs_route(), "/docs/{_:.*}");
    }
}
