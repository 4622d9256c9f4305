//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint and the request, response and
//! error schemas they reference. The server serves it as JSON and through
//! Swagger UI; `openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::{ErrorDetails, ErrorEnvelope};
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::users_dto::{UserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "Health check and user management with paginated listing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health_check,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(
        UserRequest,
        UserResponse,
        HealthResponse,
        ErrorEnvelope,
        ErrorDetails,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
