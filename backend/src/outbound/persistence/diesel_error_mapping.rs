//! Shared translation of pool and Diesel failures into port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constructors for the three failure classes every repository port exposes.
pub(crate) struct PortErrorKinds<E> {
    pub connection: fn(String) -> E,
    pub query: fn(String) -> E,
    pub conflict: fn(String) -> E,
}

/// Pool failures always mean the database is unreachable.
pub(crate) fn map_pool_error<E>(error: PoolError, kinds: &PortErrorKinds<E>) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    (kinds.connection)(message)
}

/// Map a Diesel error, surfacing constraint violations as conflicts.
///
/// Database messages are logged at debug level and replaced by generic text
/// so SQL details never reach callers.
pub(crate) fn map_diesel_error<E>(error: DieselError, kinds: &PortErrorKinds<E>) -> E {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "database operation failed"
            );
            let constraint = info.constraint_name().unwrap_or("unknown constraint");
            match kind {
                DatabaseErrorKind::UniqueViolation => {
                    (kinds.conflict)(format!("duplicate value violates {constraint}"))
                }
                DatabaseErrorKind::ForeignKeyViolation => {
                    (kinds.conflict)(format!("missing reference violates {constraint}"))
                }
                DatabaseErrorKind::CheckViolation => {
                    (kinds.query)(format!("value rejected by {constraint}"))
                }
                DatabaseErrorKind::ClosedConnection => {
                    (kinds.connection)("database connection closed".to_owned())
                }
                _ => (kinds.query)("database error".to_owned()),
            }
        }
        DieselError::NotFound => (kinds.query)("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => (kinds.query)("database query error".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            (kinds.query)("database error".to_owned())
        }
    }
}
