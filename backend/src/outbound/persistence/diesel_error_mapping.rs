//! Shared mapping from Diesel and pool failures to port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{PersistenceError, TicketPersistenceError};

use super::pool::PoolError;

fn log_diesel_failure(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }
}

/// Map pool errors for the registry repositories.
pub(super) fn map_pool_error(error: PoolError) -> PersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors for the registry repositories.
///
/// Constraint violations keep their constraint name so callers can decide
/// which uniqueness rule fired.
pub(super) fn map_diesel_error(error: DieselError) -> PersistenceError {
    log_diesel_failure(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            PersistenceError::duplicate(info.constraint_name().unwrap_or("unknown").to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            PersistenceError::foreign_key(info.constraint_name().unwrap_or("unknown").to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        _ => PersistenceError::query("database error"),
    }
}

/// Map pool errors for the ticket repository.
pub(super) fn map_ticket_pool_error(error: PoolError) -> TicketPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TicketPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors for the ticket repository.
///
/// A serialization failure means another issuance won the race; it becomes
/// the retryable `Conflict` variant.
pub(super) fn map_ticket_diesel_error(error: DieselError) -> TicketPersistenceError {
    log_diesel_failure(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            TicketPersistenceError::conflict()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TicketPersistenceError::connection("database connection error")
        }
        _ => TicketPersistenceError::query("database error"),
    }
}
