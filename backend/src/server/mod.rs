//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
use backend::doc::ApiDoc;
use backend::domain::ports::{DatabaseProbe, UserRepository};
use backend::domain::{HealthService, UserService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{Database, DieselUserRepository};

/// Wire the domain services to the PostgreSQL adapters.
pub fn build_http_state(database: &Database) -> HttpState {
    let repository: Arc<dyn UserRepository> =
        Arc::new(DieselUserRepository::new(database.pool()));
    let probe: Arc<dyn DatabaseProbe> = Arc::new(database.clone());
    HttpState::new(
        Arc::new(UserService::new(repository)),
        Arc::new(HealthService::new(probe)),
    )
}

fn build_app(
    state: web::Data<HttpState>,
    config: ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .configure(backend::inbound::http::configure)
        .service(SwaggerUi::new(config.docs_route()).url(config.openapi_url, ApiDoc::openapi()))
}

/// Construct an Actix HTTP server serving `state`.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(state: HttpState, config: ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let bind_addr = config.bind_addr;
    let server = HttpServer::new(move || build_app(state.clone(), config.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
