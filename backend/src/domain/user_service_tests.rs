//! Tests for user service error translation.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRepository;
use chrono::Utc;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

#[fixture]
fn draft() -> UserDraft {
    UserDraft::new("Ann", "ann@x.com").expect("valid draft")
}

#[fixture]
fn user_id() -> UserId {
    UserId::parse("7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44").expect("valid id")
}

fn stored_user(id: UserId) -> User {
    User {
        id,
        name: "Ann".to_owned(),
        email: "ann@x.com".to_owned(),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn register_returns_repository_user(draft: UserDraft, user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .withf(|draft| draft.name() == "Ann")
        .times(1)
        .return_once(move |_| Ok(stored_user(user_id)));

    let user = service(repo).register(&draft).await.expect("registered");

    assert_eq!(user.id, user_id);
}

#[rstest]
#[tokio::test]
async fn register_failure_carries_draft_and_cause(draft: UserDraft) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::query("duplicate key")));

    let err = service(repo).register(&draft).await.expect_err("failure");

    assert_eq!(err.code(), ErrorCode::DependencyFailure);
    assert_eq!(err.message(), "An error occurred when creating a user");
    assert!(!err.is_operational());
    let details = err.details().expect("details");
    assert_eq!(details.context, json!({"name": "Ann", "email": "ann@x.com"}));
    assert_eq!(
        details.cause,
        json!("user repository query failed: duplicate key")
    );
}

#[rstest]
#[tokio::test]
async fn retrieve_and_count_passes_tuple_through(user_id: UserId) {
    let request = PageRequest::new(2, 1).expect("valid window");
    let mut repo = MockUserRepository::new();
    repo.expect_read_and_count()
        .with(eq(request))
        .times(1)
        .return_once(move |_| Ok((vec![stored_user(user_id)], 3)));

    let (users, total) = service(repo)
        .retrieve_and_count(request)
        .await
        .expect("listed");

    assert_eq!(users.len(), 1);
    assert_eq!(total, 3);
}

#[rstest]
#[tokio::test]
async fn retrieve_and_count_failure_records_window() {
    let request = PageRequest::new(2, 5).expect("valid window");
    let mut repo = MockUserRepository::new();
    repo.expect_read_and_count()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::connection("pool timed out")));

    let err = service(repo)
        .retrieve_and_count(request)
        .await
        .expect_err("failure");

    assert_eq!(err.code(), ErrorCode::DependencyFailure);
    assert_eq!(
        err.details().map(|details| &details.context),
        Some(&json!({"page": 2, "limit": 5}))
    );
}

#[rstest]
#[tokio::test]
async fn retrieve_missing_user_is_not_found(user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_read()
        .with(eq(user_id))
        .times(1)
        .return_once(|_| Ok(None));

    let err = service(repo).retrieve(&user_id).await.expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User could not be read");
    let details = err.details().expect("details");
    assert_eq!(details.context, json!(user_id.to_string()));
    assert_eq!(details.cause, Value::Null);
}

#[rstest]
#[case::missing(Ok(None), ErrorCode::NotFound, "User could not be updated")]
#[case::failing(
    Err(UserPersistenceError::query("relation \"users\" does not exist")),
    ErrorCode::DependencyFailure,
    "An error occurred when updating a user"
)]
#[tokio::test]
async fn replace_translates_repository_outcomes(
    draft: UserDraft,
    user_id: UserId,
    #[case] outcome: Result<Option<User>, UserPersistenceError>,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_update().times(1).return_once(move |_, _| outcome);

    let err = service(repo)
        .replace(&user_id, &draft)
        .await
        .expect_err("failure");

    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
    assert_eq!(
        err.details().map(|details| &details.context),
        Some(&json!({
            "user_id": user_id.to_string(),
            "user": {"name": "Ann", "email": "ann@x.com"},
        }))
    );
}

#[rstest]
#[tokio::test]
async fn remove_returns_deleted_user(user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .with(eq(user_id))
        .times(1)
        .return_once(move |_| Ok(Some(stored_user(user_id))));

    let user = service(repo).remove(&user_id).await.expect("removed");

    assert_eq!(user.id, user_id);
}

#[rstest]
#[tokio::test]
async fn remove_missing_user_is_not_found(user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().times(1).return_once(|_| Ok(None));

    let err = service(repo).remove(&user_id).await.expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User could not be removed");
}
