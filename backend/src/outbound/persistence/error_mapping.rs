//! Shared translation of Diesel and pool failures into adapter errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto the adapter's connection error constructor.
pub(super) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Map a Diesel failure onto the adapter's query or connection constructor.
///
/// Closed connections count as connection failures; everything else,
/// constraint violations included, is a query failure. The message keeps
/// the database's own wording and names the violated constraint when known.
pub(super) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
            let message = info.constraint_name().map_or_else(
                || info.message().to_owned(),
                |constraint| format!("{} (constraint `{constraint}`)", info.message()),
            );
            if matches!(kind, DatabaseErrorKind::ClosedConnection) {
                connection(message)
            } else {
                query(message)
            }
        }
        DieselError::NotFound => query("record not found".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            query(other.to_string())
        }
    }
}
