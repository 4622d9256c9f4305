//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::ports::{
    DatabaseProbe, FixtureDatabaseProbe, FixtureUserRepository, UserRepository,
};
use crate::domain::{HealthService, UserService};
use crate::middleware::Trace;

use super::state::HttpState;

/// State backed by `repository` and a healthy probe.
pub fn state_with_repository(repository: Arc<dyn UserRepository>) -> HttpState {
    let probe: Arc<dyn DatabaseProbe> = Arc::new(FixtureDatabaseProbe::default());
    HttpState::new(
        Arc::new(UserService::new(repository)),
        Arc::new(HealthService::new(probe)),
    )
}

/// State backed by an empty in-memory repository.
pub fn fixture_state() -> HttpState {
    state_with_repository(Arc::new(FixtureUserRepository::new()))
}

/// Application wired exactly like the server, minus Swagger UI.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(super::configure)
}
