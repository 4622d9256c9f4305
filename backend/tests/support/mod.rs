//! Shared setup for tests that need a live PostgreSQL database.
//!
//! Suites read `TEST_DATABASE_URL`; when it is unset they print a
//! `SKIP-TEST-DATABASE` marker and return without asserting anything.

use backend::outbound::persistence::{Database, PoolConfig};
use tokio::sync::{Mutex, MutexGuard};

static DATABASE_LOCK: Mutex<()> = Mutex::const_new(());

/// Exclusive access to a freshly migrated database.
pub struct TestDatabase {
    pub database: Database,
    _guard: MutexGuard<'static, ()>,
}

/// Drop every table, rerun migrations, and hand back the connector.
///
/// Returns `None` when `TEST_DATABASE_URL` is not set.
pub async fn fresh_database() -> Option<TestDatabase> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("SKIP-TEST-DATABASE: TEST_DATABASE_URL is not set");
        return None;
    };
    let guard = DATABASE_LOCK.lock().await;
    let database = Database::connect(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("connect to test database");
    database.drop_tables().await.expect("drop tables");
    database.migrate().await.expect("run migrations");
    Some(TestDatabase {
        database,
        _guard: guard,
    })
}
