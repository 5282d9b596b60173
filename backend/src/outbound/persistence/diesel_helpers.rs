//! Shared error mapping for Diesel repositories.
//!
//! Every repository port error exposes the same four failure shapes
//! (connection, query, unknown reference, conflict). [`StorageErrorKind`]
//! lets each port error plug into one classification routine instead of
//! repeating the Diesel match in every adapter.

use tracing::debug;

use crate::domain::ports::{
    ParticipationRepositoryError, ScheduleRepositoryError, UserPersistenceError,
};

use super::pool::PoolError;

/// Constructors a repository error type offers to the shared mapper.
pub(crate) trait StorageErrorKind: Sized {
    fn connection(message: String) -> Self;
    fn query(message: String) -> Self;

    /// Foreign key violation. Defaults to a query error for ports that do
    /// not distinguish it.
    fn unknown_reference(message: String) -> Self {
        Self::query(message)
    }

    /// Unique constraint violation. Defaults to a query error.
    fn conflict(message: String) -> Self {
        Self::query(message)
    }
}

impl StorageErrorKind for ScheduleRepositoryError {
    fn connection(message: String) -> Self {
        Self::connection(message)
    }

    fn query(message: String) -> Self {
        Self::query(message)
    }

    fn unknown_reference(message: String) -> Self {
        Self::unknown_reference(message)
    }

    fn conflict(message: String) -> Self {
        Self::conflict(message)
    }
}

impl StorageErrorKind for ParticipationRepositoryError {
    fn connection(message: String) -> Self {
        Self::connection(message)
    }

    fn query(message: String) -> Self {
        Self::query(message)
    }

    fn unknown_reference(message: String) -> Self {
        Self::unknown_reference(message)
    }

    fn conflict(message: String) -> Self {
        Self::conflict(message)
    }
}

impl StorageErrorKind for UserPersistenceError {
    fn connection(message: String) -> Self {
        Self::connection(message)
    }

    fn query(message: String) -> Self {
        Self::query(message)
    }
}

/// Map pool failures to a connection error.
pub(crate) fn classify_pool_error<E: StorageErrorKind>(error: PoolError) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => E::connection(message),
    }
}

/// Map Diesel failures onto the repository's error shapes.
///
/// Constraint names are surfaced for foreign key and uniqueness violations;
/// other database messages stay in the debug log.
pub(crate) fn classify_diesel_error<E: StorageErrorKind>(error: diesel::result::Error) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => E::query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query("database query error".to_owned()),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ForeignKeyViolation => {
                E::unknown_reference(constraint_label(info.constraint_name()))
            }
            DatabaseErrorKind::UniqueViolation => {
                E::conflict(constraint_label(info.constraint_name()))
            }
            DatabaseErrorKind::ClosedConnection => {
                E::connection("database connection error".to_owned())
            }
            _ => E::query("database error".to_owned()),
        },
        _ => E::query("database error".to_owned()),
    }
}

fn constraint_label(constraint_name: Option<&str>) -> String {
    constraint_name.unwrap_or("unnamed constraint").to_owned()
}
