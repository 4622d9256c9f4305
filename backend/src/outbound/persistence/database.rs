//! Database connector owning the connection pool.
//!
//! [`Database`] is the single entry point for lifecycle and maintenance
//! operations: connecting, running embedded migrations, liveness checks,
//! and the table housekeeping used by integration tests.

use std::sync::OnceLock;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::sql_types::{BigInt, Text};
use diesel::{Connection as _, QueryableByName};
use diesel_async::RunQueryDsl;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use regex::Regex;
use tracing::info;

use crate::domain::ports::{DatabaseProbe, DatabaseProbeError};

use super::pool::{DbPool, PoolConfig, PoolError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
const MIGRATIONS_TABLE: &str = "__diesel_schema_migrations";

static IDENTIFIER_RE: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
            .unwrap_or_else(|error| panic!("identifier regex failed to compile: {error}"))
    })
}

/// Failures raised by [`Database`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    /// The pool could not be built or a connection checked out.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// A statement failed.
    #[error("database statement failed: {message}")]
    Query {
        /// Database error text.
        message: String,
    },
    /// Embedded migrations could not be applied.
    #[error("database migration failed: {message}")]
    Migration {
        /// Migration harness error text.
        message: String,
    },
    /// A table name was not a plain SQL identifier.
    #[error("invalid table name: {name:?}")]
    InvalidTableName {
        /// Rejected name.
        name: String,
    },
}

impl DatabaseError {
    fn query(error: &diesel::result::Error) -> Self {
        Self::Query {
            message: error.to_string(),
        }
    }

    fn migration(message: impl ToString) -> Self {
        Self::Migration {
            message: message.to_string(),
        }
    }
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct TableNameRow {
    #[diesel(sql_type = Text)]
    table_name: String,
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Connection pool plus the URL it was built from.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    database_url: String,
}

impl Database {
    /// Build the pool described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Pool`] when the pool cannot be built.
    pub async fn connect(config: PoolConfig) -> Result<Self, DatabaseError> {
        let database_url = config.database_url().to_owned();
        let pool = DbPool::new(config).await?;
        info!("database pool ready");
        Ok(Self { pool, database_url })
    }

    /// Handle to the shared pool, for repositories.
    #[must_use]
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Apply every pending embedded migration.
    ///
    /// Diesel's migration harness is synchronous, so this runs on a blocking
    /// thread with its own connection.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Migration`] when a connection cannot be
    /// opened or a migration fails.
    pub async fn migrate(&self) -> Result<usize, DatabaseError> {
        let url = self.database_url.clone();
        let applied = tokio::task::spawn_blocking(move || {
            let mut conn = PgConnection::establish(&url).map_err(DatabaseError::migration)?;
            conn.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.len())
                .map_err(DatabaseError::migration)
        })
        .await
        .map_err(DatabaseError::migration)??;
        info!(applied, "database migrations complete");
        Ok(applied)
    }

    /// Run `SELECT 1`.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection is available or the query fails.
    pub async fn check_alive(&self) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.get().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|err| DatabaseError::query(&err))?;
        Ok(true)
    }

    /// Count the rows of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidTableName`] unless `table` is a plain
    /// identifier, or a query error when the table does not exist.
    pub async fn table_row_count(&self, table: &str) -> Result<u64, DatabaseError> {
        if !identifier_regex().is_match(table) {
            return Err(DatabaseError::InvalidTableName {
                name: table.to_owned(),
            });
        }
        let mut conn = self.pool.get().await?;
        let row: CountRow = diesel::sql_query(format!(
            "SELECT count(*) AS count FROM {}",
            quote_identifier(table)
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| DatabaseError::query(&err))?;
        u64::try_from(row.count).map_err(|_| DatabaseError::Query {
            message: format!("negative row count for {table}"),
        })
    }

    async fn public_tables(&self, include_migrations: bool) -> Result<Vec<String>, DatabaseError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<TableNameRow> = diesel::sql_query(
            "SELECT table_name::text AS table_name FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
        )
        .load(&mut conn)
        .await
        .map_err(|err| DatabaseError::query(&err))?;

        Ok(rows
            .into_iter()
            .map(|row| row.table_name)
            .filter(|name| include_migrations || name != MIGRATIONS_TABLE)
            .collect())
    }

    async fn execute_on_tables(&self, statement: &str, tables: &[String]) -> Result<(), DatabaseError> {
        if tables.is_empty() {
            return Ok(());
        }
        let list = tables
            .iter()
            .map(|name| quote_identifier(name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut conn = self.pool.get().await?;
        diesel::sql_query(format!("{statement} {list} CASCADE"))
            .execute(&mut conn)
            .await
            .map_err(|err| DatabaseError::query(&err))?;
        Ok(())
    }

    /// Truncate every application table in the `public` schema, keeping the
    /// migration history.
    ///
    /// # Errors
    ///
    /// Returns an error when listing or truncating the tables fails.
    pub async fn clear_tables(&self) -> Result<(), DatabaseError> {
        let tables = self.public_tables(false).await?;
        self.execute_on_tables("TRUNCATE TABLE", &tables).await
    }

    /// Drop every table in the `public` schema, migration history included,
    /// so the next [`Database::migrate`] starts from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error when listing or dropping the tables fails.
    pub async fn drop_tables(&self) -> Result<(), DatabaseError> {
        let tables = self.public_tables(true).await?;
        self.execute_on_tables("DROP TABLE IF EXISTS", &tables)
            .await
    }

    /// Release this handle on the pool.
    ///
    /// Connections close once every clone of the pool, including those held
    /// by repositories, has been dropped.
    pub fn dispose(self) {
        drop(self.pool);
        info!("database pool released");
    }
}

#[async_trait]
impl DatabaseProbe for Database {
    async fn is_alive(&self) -> Result<bool, DatabaseProbeError> {
        self.check_alive().await.map_err(|err| match err {
            DatabaseError::Pool(pool) => DatabaseProbeError::connection(pool.into_message()),
            other => DatabaseProbeError::query(other.to_string()),
        })
    }
}
