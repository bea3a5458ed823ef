//! Port abstraction for ticket persistence adapters.

use async_trait::async_trait;

use crate::domain::ticket::{NewTicket, Ticket, TicketNumbering};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by ticket repository adapters.
    pub enum TicketPersistenceError {
        /// Repository connection could not be established or checked out.
        Connection { message: String } => "ticket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ticket repository query failed: {message}",
        /// Concurrent issuance collided; the caller may retry.
        Conflict {} => "concurrent ticket issuance conflict",
    }
}

/// Storage surface for tickets.
///
/// `insert_numbered` computes the sequence number and inserts in one atomic
/// unit from the caller's perspective; a lost race surfaces as
/// [`TicketPersistenceError::Conflict`] rather than a duplicate number.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// All tickets, most recent first.
    async fn list(&self) -> Result<Vec<Ticket>, TicketPersistenceError>;

    /// Fetch a ticket by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, TicketPersistenceError>;

    /// Assign the next number under `numbering` and insert atomically.
    async fn insert_numbered(
        &self,
        ticket: NewTicket,
        numbering: TicketNumbering,
    ) -> Result<Ticket, TicketPersistenceError>;

    /// Overwrite the status; `None` when no row matched.
    async fn update_status(
        &self,
        id: i32,
        estado: &str,
    ) -> Result<Option<Ticket>, TicketPersistenceError>;

    /// Delete a ticket; `false` when no row matched.
    async fn delete(&self, id: i32) -> Result<bool, TicketPersistenceError>;
}
