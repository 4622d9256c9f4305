//! Request and response bodies for the users endpoints, and the mappers
//! between them and the domain.

use chrono::{DateTime, Utc};
use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Error, User, UserDraft};

use super::validation::{FieldViolation, Location, validation_error};

/// Body of `POST /users` and `PUT /users/{user_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRequest {
    /// Display name, 1 to 256 characters.
    #[schema(example = "Ann", min_length = 1, max_length = 256)]
    pub name: String,
    /// Contact address, at most 256 characters.
    #[schema(example = "ann@x.com", max_length = 256)]
    pub email: String,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::new(&value.name, &value.email).map_err(|problems| {
            let violations: Vec<_> = problems
                .iter()
                .map(|problem| FieldViolation::from_user(Location::Body, problem))
                .collect();
            validation_error(
                json!({ "name": value.name, "email": value.email }),
                &violations,
            )
        })
    }
}

/// A user as returned by every users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Identifier assigned on creation.
    #[schema(example = "7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44")]
    pub id: Uuid,
    /// Display name.
    #[schema(example = "Ann")]
    pub name: String,
    /// Contact address.
    #[schema(example = "ann@x.com")]
    pub email: String,
    /// Creation time (RFC 3339).
    #[schema(example = "2024-05-01T09:30:00.123456Z")]
    pub created_at: DateTime<Utc>,
    /// Time of the latest update (RFC 3339); `null` until the first update.
    #[schema(example = json!(null))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: *value.id.as_uuid(),
            name: value.name,
            email: value.email,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Query string of `GET /users`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number; defaults to 1.
    #[param(minimum = 1, example = 1)]
    pub page: Option<u32>,
    /// Page size between 1 and 10; defaults to 1.
    #[param(minimum = 1, maximum = 10, example = 1)]
    pub limit: Option<u32>,
}

impl ListUsersQuery {
    /// Validate the window, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `page` or `limit` when out of range.
    pub fn page_request(self) -> Result<PageRequest, Error> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        PageRequest::new(page, limit).map_err(|problem| {
            validation_error(
                json!({ "page": page, "limit": limit }),
                &[FieldViolation::new(
                    Location::Query,
                    problem.field(),
                    problem.to_string(),
                )],
            )
        })
    }
}
