//! Integration tests for the `Database` connector maintenance operations.

use backend::domain::UserDraft;
use backend::domain::ports::{DatabaseProbe, UserRepository};
use backend::outbound::persistence::{DatabaseError, DieselUserRepository};

mod support;

#[tokio::test]
async fn live_database_reports_alive() {
    let Some(db) = support::fresh_database().await else {
        return;
    };

    assert!(db.database.check_alive().await.expect("check alive"));
    assert!(db.database.is_alive().await.expect("probe"));
}

#[tokio::test]
async fn clear_tables_empties_users_but_keeps_schema() {
    let Some(db) = support::fresh_database().await else {
        return;
    };
    let repo = DieselUserRepository::new(db.database.pool());
    for n in 1..=2 {
        let draft = UserDraft::new(format!("User {n}"), format!("user{n}@example.com"))
            .expect("valid draft");
        repo.create(&draft).await.expect("create");
    }
    assert_eq!(db.database.table_row_count("users").await.expect("count"), 2);

    db.database.clear_tables().await.expect("clear tables");

    assert_eq!(db.database.table_row_count("users").await.expect("count"), 0);
}

#[tokio::test]
async fn migrate_is_idempotent() {
    let Some(db) = support::fresh_database().await else {
        return;
    };

    assert_eq!(db.database.migrate().await.expect("migrate again"), 0);
}

#[tokio::test]
async fn unsafe_table_names_are_rejected() {
    let Some(db) = support::fresh_database().await else {
        return;
    };

    let err = db
        .database
        .table_row_count("users; DROP TABLE users")
        .await
        .expect_err("invalid name");

    assert!(matches!(err, DatabaseError::InvalidTableName { .. }));
}
