//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::PageRequest;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

diesel::define_sql_function! {
    /// Wall-clock time, advancing within a transaction unlike `now()`.
    fn clock_timestamp() -> diesel::sql_types::Timestamptz;
}

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn window(request: PageRequest) -> Result<(i64, i64), UserPersistenceError> {
    let offset = i64::try_from(request.offset())
        .map_err(|_| UserPersistenceError::query("page offset exceeds the supported range"))?;
    Ok((i64::from(request.limit()), offset))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(users::table)
            .values(NewUserRow::from(draft))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(User::from)
            .map_err(diesel_error)
    }

    async fn read_and_count(
        &self,
        request: PageRequest,
    ) -> Result<(Vec<User>, u64), UserPersistenceError> {
        let (limit, offset) = window(request)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        // Both statements must observe the same snapshot.
        let (rows, total) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run(move |conn| {
                async move {
                    let rows: Vec<UserRow> = users::table
                        .select(UserRow::as_select())
                        .order_by((users::created_at.desc(), users::id.desc()))
                        .limit(limit)
                        .offset(offset)
                        .load(conn)
                        .await?;
                    let total: i64 = users::table.count().get_result(conn).await?;
                    Ok::<_, diesel::result::Error>((rows, total))
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        let total = u64::try_from(total)
            .map_err(|_| UserPersistenceError::query("negative user count"))?;
        Ok((rows.into_iter().map(User::from).collect(), total))
    }

    async fn read(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(diesel_error)
    }

    async fn update(
        &self,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::update(users::table.find(*id.as_uuid()))
            .set((
                UserChangeset::from(draft),
                users::updated_at.eq(clock_timestamp().nullable()),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(diesel_error)
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(users::table.find(*id.as_uuid()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, 1, 0)]
    #[case(3, 10, 10, 20)]
    fn window_converts_page_to_limit_and_offset(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected_limit: i64,
        #[case] expected_offset: i64,
    ) {
        let request = PageRequest::new(page, limit).expect("valid window");
        assert_eq!(window(request), Ok((expected_limit, expected_offset)));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn missing_row_maps_to_query_error() {
        let err = diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
