//! User management service.
//!
//! Wraps a [`UserRepository`] with uniform error translation: adapter
//! failures become [`ErrorCode::DependencyFailure`](crate::domain::ErrorCode)
//! errors and missing rows become not-found errors, each carrying the
//! operation inputs as context.

use std::sync::Arc;

use pagination::PageRequest;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Error, User, UserDraft, UserId};

/// Service implementing create, read, update and delete for users.
pub struct UserService<R: ?Sized = dyn UserRepository> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn draft_context(draft: &UserDraft) -> Value {
    json!({ "name": draft.name(), "email": draft.email() })
}

fn dependency_failure(message: &'static str, context: Value, cause: &UserPersistenceError) -> Error {
    error!(error = %cause, %context, "{message}");
    Error::dependency_failure(message).with_details(context, json!(cause.to_string()))
}

fn not_found(message: &'static str, context: Value) -> Error {
    warn!(%context, "{message}");
    Error::not_found(message).with_details(context, Value::Null)
}

impl<R: ?Sized> UserService<R> {
    /// Create a service over `repository`.
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserService<R>
where
    R: UserRepository + ?Sized,
{
    /// Persist a new user.
    ///
    /// # Errors
    ///
    /// Returns a dependency failure when the repository fails.
    pub async fn register(&self, draft: &UserDraft) -> Result<User, Error> {
        self.repository.create(draft).await.map_err(|err| {
            dependency_failure(
                "An error occurred when creating a user",
                draft_context(draft),
                &err,
            )
        })
    }

    /// Fetch one page of users and the total user count.
    ///
    /// # Errors
    ///
    /// Returns a dependency failure when the repository fails.
    pub async fn retrieve_and_count(&self, request: PageRequest) -> Result<(Vec<User>, u64), Error> {
        self.repository.read_and_count(request).await.map_err(|err| {
            dependency_failure(
                "An error occurred when reading and counting users",
                json!({ "page": request.page(), "limit": request.limit() }),
                &err,
            )
        })
    }

    /// Fetch a single user.
    ///
    /// # Errors
    ///
    /// Returns not-found when no user has `id`, or a dependency failure when
    /// the repository fails.
    pub async fn retrieve(&self, id: &UserId) -> Result<User, Error> {
        let context = json!(id.to_string());
        match self.repository.read(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(not_found("User could not be read", context)),
            Err(err) => Err(dependency_failure(
                "An error occurred when reading a user",
                context,
                &err,
            )),
        }
    }

    /// Overwrite the name and email of an existing user.
    ///
    /// # Errors
    ///
    /// Returns not-found when no user has `id`, or a dependency failure when
    /// the repository fails.
    pub async fn replace(&self, id: &UserId, draft: &UserDraft) -> Result<User, Error> {
        let context = json!({ "user_id": id.to_string(), "user": draft_context(draft) });
        match self.repository.update(id, draft).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(not_found("User could not be updated", context)),
            Err(err) => Err(dependency_failure(
                "An error occurred when updating a user",
                context,
                &err,
            )),
        }
    }

    /// Delete a user, returning it as it was before removal.
    ///
    /// # Errors
    ///
    /// Returns not-found when no user has `id`, or a dependency failure when
    /// the repository fails.
    pub async fn remove(&self, id: &UserId) -> Result<User, Error> {
        let context = json!(id.to_string());
        match self.repository.delete(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(not_found("User could not be removed", context)),
            Err(err) => Err(dependency_failure(
                "An error occurred when deleting a user",
                context,
                &err,
            )),
        }
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
