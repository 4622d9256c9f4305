//! Backend entry-point: loads configuration, prepares the database, and
//! serves the users API with its OpenAPI documentation.

mod server;

use color_eyre::eyre::WrapErr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{Database, PoolConfig};
use backend::settings::{AppSettings, Settings};
use server::{ServerConfig, build_http_state, create_server};

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = if settings.is_production() {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn pool_config(settings: &Settings) -> PoolConfig {
    let config = PoolConfig::new(settings.database_url.clone());
    match settings.database_max_connections {
        Some(max_size) => config.with_max_size(max_size),
        None => config,
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let settings = AppSettings::load_from_env()?.resolve()?;
    init_tracing(&settings);

    let database = Database::connect(pool_config(&settings))
        .await
        .wrap_err("connect to database")?;
    database.migrate().await.wrap_err("apply migrations")?;

    let config = ServerConfig::from_settings(&settings);
    info!(addr = %config.bind_addr, env = %settings.env, "starting server");
    let server = create_server(build_http_state(&database), config)?;
    let outcome = server.await;

    database.dispose();
    outcome.wrap_err("server terminated")
}
