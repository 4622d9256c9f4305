//! Health check endpoint.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ErrorEnvelope;

use super::ApiResult;
use super::state::HttpState;

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Whether the database answered a trivial query.
    #[schema(example = true)]
    pub healthy: bool,
}

/// Verify that the service started correctly and can reach its database.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse,
            example = json!({"healthy": true})),
        (status = 500, description = "Database probe failed", body = ErrorEnvelope,
            example = json!({
                "message": "An error occurred when checking if application is alive",
                "details": {"context": "database", "cause": "database connection failed: timed out"},
                "is_operational": false
            }))
    ),
    tags = ["health"],
    operation_id = "getHealth"
)]
#[get("/health")]
pub async fn health_check(state: web::Data<HttpState>) -> ApiResult<web::Json<HealthResponse>> {
    let healthy = state.health.check_health().await?;
    Ok(web::Json(HealthResponse { healthy }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HealthService;
    use crate::domain::ports::{
        DatabaseProbe, DatabaseProbeError, FixtureDatabaseProbe, MockDatabaseProbe,
    };
    use crate::inbound::http::test_utils::{fixture_state, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state_with_probe(probe: Arc<dyn DatabaseProbe>) -> HttpState {
        HttpState {
            health: Arc::new(HealthService::new(probe)),
            ..fixture_state()
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn reports_healthy_database() {
        let app = actix_test::init_service(test_app(state_with_probe(Arc::new(
            FixtureDatabaseProbe::new(true),
        ))))
        .await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/health").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({"healthy": true}));
    }

    #[rstest]
    #[actix_web::test]
    async fn probe_failure_is_server_error() {
        let mut probe = MockDatabaseProbe::new();
        probe
            .expect_is_alive()
            .returning(|| Err(DatabaseProbeError::connection("refused")));
        let app = actix_test::init_service(test_app(state_with_probe(Arc::new(probe)))).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/health").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("is_operational"), Some(&json!(false)));
        assert_eq!(body.pointer("/details/context"), Some(&json!("database")));
    }
}
