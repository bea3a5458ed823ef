//! Persistence errors and outcomes shared by the registry ports.

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by registry repository adapters.
    pub enum PersistenceError {
        /// Repository connection could not be established or checked out.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// An insert or update violated a uniqueness constraint.
        Duplicate { constraint: String } => "unique constraint violated: {constraint}",
        /// A write was rejected by a referential constraint.
        ForeignKey { constraint: String } => "referential constraint violated: {constraint}",
    }
}

/// Outcome of a delete attempt.
///
/// `Restricted` covers rows that exist but are pinned by dependent records;
/// callers present it the same way as `NotFound` (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row was removed.
    Deleted,
    /// No row matched the identifier.
    NotFound,
    /// A referential constraint blocked the delete.
    Restricted,
}
