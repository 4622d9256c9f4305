//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repository and connector using Diesel.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod persistence;
