//! Service configuration loaded from the environment via OrthoConfig.
//!
//! [`AppSettings`] mirrors the raw variables (each also accepted as a CLI
//! flag); [`AppSettings::resolve`] checks that every required value is
//! present and assembles the database URL, yielding [`Settings`].

use std::fmt;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Value of `ENV` that selects production behaviour.
pub const PRODUCTION_ENV: &str = "production";

/// Configuration problems detected at boot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Sources could not be read or parsed.
    #[error("failed to load configuration: {message}")]
    Load {
        /// Loader error text.
        message: String,
    },
    /// A required variable is absent or blank.
    #[error("missing required environment variable {name}")]
    MissingVariable {
        /// Environment variable name.
        name: &'static str,
    },
    /// The database URL parts do not form a valid URL.
    #[error("invalid database URL: {message}")]
    InvalidDatabaseUrl {
        /// Parser error text.
        message: String,
    },
}

/// Raw configuration values.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
pub struct AppSettings {
    /// TCP port to listen on (`PORT`).
    pub port: Option<u16>,
    /// Deployment environment name (`ENV`).
    pub env: Option<String>,
    /// Path serving the OpenAPI JSON (`OPENAPI_URL`).
    pub openapi_url: Option<String>,
    /// Path prefix serving Swagger UI (`DOCS_URL`).
    pub docs_url: Option<String>,
    /// Full connection URL; takes precedence over the parts below.
    pub database_url: Option<String>,
    /// Database role (`DATABASE_USER`).
    pub database_user: Option<String>,
    /// Database password (`DATABASE_PASSWORD`).
    pub database_password: Option<String>,
    /// Database host (`DATABASE_HOST`).
    pub database_host: Option<String>,
    /// Database port (`DATABASE_PORT`).
    pub database_port: Option<u16>,
    /// Database name (`DATABASE_NAME`).
    pub database_name: Option<String>,
    /// Upper bound on pooled connections (`DATABASE_MAX_CONNECTIONS`).
    pub database_max_connections: Option<u32>,
}

fn required<T>(value: Option<T>, name: &'static str) -> Result<T, SettingsError> {
    value.ok_or(SettingsError::MissingVariable { name })
}

fn required_text(value: Option<String>, name: &'static str) -> Result<String, SettingsError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or(SettingsError::MissingVariable { name })
}

fn invalid_url(message: impl ToString) -> SettingsError {
    SettingsError::InvalidDatabaseUrl {
        message: message.to_string(),
    }
}

impl AppSettings {
    /// Load from the process environment and command line.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a value cannot be parsed.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load().map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Check required values and build the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingVariable`] naming the first absent
    /// variable, or [`SettingsError::InvalidDatabaseUrl`].
    pub fn resolve(self) -> Result<Settings, SettingsError> {
        let port = required(self.port, "PORT")?;
        let env = required_text(self.env, "ENV")?;
        let openapi_url = required_text(self.openapi_url, "OPENAPI_URL")?;
        let docs_url = required_text(self.docs_url, "DOCS_URL")?;

        let database_url = match self.database_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => url,
            None => database_url_from_parts(
                &required_text(self.database_user, "DATABASE_USER")?,
                &required_text(self.database_password, "DATABASE_PASSWORD")?,
                &required_text(self.database_host, "DATABASE_HOST")?,
                required(self.database_port, "DATABASE_PORT")?,
                &required_text(self.database_name, "DATABASE_NAME")?,
            )?,
        };

        Ok(Settings {
            port,
            env,
            openapi_url,
            docs_url,
            database_url,
            database_max_connections: self.database_max_connections,
        })
    }
}

fn database_url_from_parts(
    user: &str,
    password: &str,
    host: &str,
    port: u16,
    name: &str,
) -> Result<String, SettingsError> {
    let mut url = Url::parse(&format!("postgres://{host}:{port}/{name}")).map_err(invalid_url)?;
    url.set_username(user)
        .map_err(|()| invalid_url("username cannot be set"))?;
    url.set_password(Some(password))
        .map_err(|()| invalid_url("password cannot be set"))?;
    Ok(url.into())
}

/// Validated configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// TCP port to listen on.
    pub port: u16,
    /// Deployment environment name.
    pub env: String,
    /// Path serving the OpenAPI JSON.
    pub openapi_url: String,
    /// Path prefix serving Swagger UI.
    pub docs_url: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Upper bound on pooled connections, if configured.
    pub database_max_connections: Option<u32>,
}

impl Settings {
    /// Whether `ENV` selects production behaviour.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case(PRODUCTION_ENV)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("port", &self.port)
            .field("env", &self.env)
            .field("openapi_url", &self.openapi_url)
            .field("docs_url", &self.docs_url)
            .field("database_url", &"<redacted>")
            .field("database_max_connections", &self.database_max_connections)
            .finish()
    }
}
