//! Port abstraction for user persistence adapters and their errors.
//!
//! The Diesel adapter lives in `outbound::persistence`; the in-memory
//! [`FixtureUserRepository`] backs handler and service tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use pagination::PageRequest;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed",
        /// Query or mutation failed during execution.
        Query => "user repository query failed",
    }
}

/// Storage for users.
///
/// A missing user is reported as `Ok(None)`, never as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the stored row, including the assigned id
    /// and creation time.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Fetch one page of users, newest first, together with the total row
    /// count observed in the same snapshot.
    async fn read_and_count(
        &self,
        request: PageRequest,
    ) -> Result<(Vec<User>, u64), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn read(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite name and email and stamp `updated_at`.
    async fn update(
        &self,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user, returning the row as it was before deletion.
    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}

/// In-memory repository with the same ordering and timestamp rules as the
/// database adapter.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    users: Mutex<Vec<User>>,
    failure: Option<UserPersistenceError>,
}

impl FixtureUserRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that answers every call with `failure`.
    #[must_use]
    pub fn failing(failure: UserPersistenceError) -> Self {
        Self {
            users: Mutex::default(),
            failure: Some(failure),
        }
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the repository holds no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self) -> Result<(), UserPersistenceError> {
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        self.check()?;
        let user = User {
            id: UserId::random(),
            name: draft.name().to_owned(),
            email: draft.email().to_owned(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.lock().push(user.clone());
        Ok(user)
    }

    async fn read_and_count(
        &self,
        request: PageRequest,
    ) -> Result<(Vec<User>, u64), UserPersistenceError> {
        self.check()?;
        let mut users = self.lock().clone();
        users.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = users.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let page = users
            .into_iter()
            .skip(offset)
            .take(request.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn read(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check()?;
        Ok(self.lock().iter().find(|user| user.id == *id).cloned())
    }

    async fn update(
        &self,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.check()?;
        let mut users = self.lock();
        let Some(user) = users.iter_mut().find(|user| user.id == *id) else {
            return Ok(None);
        };
        // Keep `updated_at` strictly after `created_at` even on coarse clocks.
        let now = Utc::now().max(user.created_at + TimeDelta::microseconds(1));
        user.name = draft.name().to_owned();
        user.email = draft.email().to_owned();
        user.updated_at = Some(now);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check()?;
        let mut users = self.lock();
        let position = users.iter().position(|user| user.id == *id);
        Ok(position.map(|index| users.remove(index)))
    }
}
