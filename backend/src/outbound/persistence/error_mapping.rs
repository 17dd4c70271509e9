//! Maps pool and Diesel failures onto journal repository errors.

use tracing::debug;

use crate::domain::ports::JournalEntryRepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> JournalEntryRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    JournalEntryRepositoryError::connection(message)
}

/// Database detail goes to the debug log; callers only see a coarse message.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> JournalEntryRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => JournalEntryRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            JournalEntryRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => {
            JournalEntryRepositoryError::query("database query error")
        }
        _ => JournalEntryRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    #[case::checkout(PoolError::checkout("timed out"))]
    #[case::build(PoolError::build("bad url"))]
    fn pool_errors_are_connection_errors(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            JournalEntryRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        );
        assert_eq!(
            map_diesel_error(error),
            JournalEntryRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    #[case::not_found(DieselError::NotFound, "record not found")]
    #[case::unique(
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key")),
        ),
        "database error"
    )]
    fn other_failures_are_query_errors(#[case] error: DieselError, #[case] message: &str) {
        assert_eq!(
            map_diesel_error(error),
            JournalEntryRepositoryError::query(message)
        );
    }
}
