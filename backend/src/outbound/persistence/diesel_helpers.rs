//! Error mapping and conversions shared by the Diesel repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Map a pool failure through the repository's connection constructor.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map a Diesel failure onto a repository's query and connection variants.
///
/// Closed connections become connection errors; everything else is a query
/// error. Callers that treat specific constraint violations differently must
/// check [`is_unique_violation`] first.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Whether `error` is a unique violation of the named constraint.
///
/// Unique violations of any other constraint are logged, since they signal a
/// schema change the adapter does not handle yet.
pub(crate) fn is_unique_violation(error: &DieselError, constraint: &str) -> bool {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = error else {
        return false;
    };
    if info.constraint_name() == Some(constraint) {
        return true;
    }
    warn!(
        expected = constraint,
        constraint_name = ?info.constraint_name(),
        message = info.message(),
        "unrecognised unique violation"
    );
    false
}

/// Convert a `COUNT(*)` result to the domain's unsigned count.
#[expect(clippy::cast_sign_loss, reason = "COUNT(*) is never negative")]
pub(crate) fn count_from_db(count: i64) -> u64 {
    count.max(0) as u64
}
