//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Row structs (`models.rs`) and the table definition (`schema.rs`) stay
//! internal; adapters translate them into domain types and map every
//! database failure onto the port's error type.
//!
//! ```ignore
//! use backend::outbound::persistence::{Database, DieselUserRepository, PoolConfig};
//!
//! let database = Database::connect(PoolConfig::new("postgres://localhost/users")).await?;
//! database.migrate().await?;
//! let repo = DieselUserRepository::new(database.pool());
//! ```

mod database;
mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use database::{Database, DatabaseError};
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError,
};
