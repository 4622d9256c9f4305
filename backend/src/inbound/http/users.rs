//! Users API handlers.
//!
//! ```text
//! POST   /users                    {"name":"Ann","email":"ann@x.com"}
//! GET    /users?page=1&limit=10
//! GET    /users/{user_id}
//! PUT    /users/{user_id}          {"name":"Ann","email":"ann@x.com"}
//! DELETE /users/{user_id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{PaginatedResponse, PaginationData, create_response};

use crate::domain::{ErrorEnvelope, UserDraft};

use super::ApiResult;
use super::state::HttpState;
use super::users_dto::{ListUsersQuery, UserRequest, UserResponse};
use super::validation::parse_user_id;

/// URL of the collection the request targeted, without its query string.
fn collection_url(req: &HttpRequest) -> String {
    let mut url: url::Url = req.full_url();
    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse,
            example = json!({
                "id": "7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44",
                "name": "Ann",
                "email": "ann@x.com",
                "created_at": "2024-05-01T09:30:00.123456Z",
                "updated_at": null
            })),
        (status = 422, description = "Validation failed", body = ErrorEnvelope,
            example = json!({
                "message": "Validation failed",
                "details": {
                    "context": {"name": "a", "email": "not-an-email"},
                    "cause": [{"location": "body", "field": "email", "message": "Invalid email"}]
                },
                "is_operational": true
            })),
        (status = 500, description = "Database failure", body = ErrorEnvelope,
            example = json!({
                "message": "An error occurred when creating a user",
                "details": {
                    "context": {"name": "Ann", "email": "ann@x.com"},
                    "cause": "user repository connection failed: timed out"
                },
                "is_operational": false
            }))
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users.register(&draft).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List users, newest first.
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = PaginatedResponse<UserResponse>,
            example = json!({
                "page": 1,
                "limit": 1,
                "total_pages": 3,
                "total_records": 3,
                "records": [{
                    "id": "7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44",
                    "name": "Ann",
                    "email": "ann@x.com",
                    "created_at": "2024-05-01T09:30:00.123456Z",
                    "updated_at": null
                }],
                "next": "http://localhost:8080/users?page=2&limit=1"
            })),
        (status = 422, description = "Page or limit out of range", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUsers"
)]
#[get("/users")]
pub async fn list_users(
    req: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<PaginatedResponse<UserResponse>>> {
    let request = query.into_inner().page_request()?;
    let (users, total) = state.users.retrieve_and_count(request).await?;
    let page = create_response(
        &collection_url(&req),
        PaginationData::new(request, total, users),
    );
    Ok(web::Json(page.map(UserResponse::from)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = uuid::Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorEnvelope,
            example = json!({
                "message": "User could not be read",
                "details": {"context": "7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44", "cause": null},
                "is_operational": true
            })),
        (status = 422, description = "Identifier is not a UUID", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = state.users.retrieve(&id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(("user_id" = uuid::Uuid, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "The updated user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorEnvelope),
        (status = 422, description = "Validation failed", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{user_id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users.replace(&id, &draft).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Delete a user, returning it as it was.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = uuid::Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The deleted user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorEnvelope),
        (status = 422, description = "Identifier is not a UUID", body = ErrorEnvelope),
        (status = 500, description = "Database failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = state.users.remove(&id).await?;
    Ok(web::Json(UserResponse::from(user)))
}
