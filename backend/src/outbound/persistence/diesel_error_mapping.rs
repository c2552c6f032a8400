//! Maps pool and Diesel failures onto application details port errors.

use tracing::debug;

use crate::domain::ports::ApplicationDetailsRepositoryError;

use super::pool::PoolError;

/// Map a pool failure to a connection error.
pub(crate) fn map_pool_error(error: PoolError) -> ApplicationDetailsRepositoryError {
    debug!(error = %error, "application details pool checkout failed");
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ApplicationDetailsRepositoryError::connection(message)
        }
    }
}

/// Map a Diesel failure to a connection or query error.
///
/// Only the error category crosses the port; driver detail is logged at
/// `debug` level here.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> ApplicationDetailsRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "application details query failed");
        }
        other => debug!(error = %other, "application details query failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ApplicationDetailsRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(_, _) => {
            ApplicationDetailsRepositoryError::query("database error")
        }
        DieselError::DeserializationError(_) => {
            ApplicationDetailsRepositoryError::query("row deserialization failed")
        }
        _ => ApplicationDetailsRepositoryError::query("database query error"),
    }
}
