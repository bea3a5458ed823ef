//! Ticket lifecycle events.
//!
//! Events stay transport agnostic; the WebSocket adapter wraps them in its
//! own envelope. Publication is fire-and-forget: the issuance engine never
//! observes delivery failures.

use serde_json::Value;

use crate::domain::ticket::{PublicTicket, Ticket};

/// Event name announcing a newly issued ticket.
pub const EVENT_NUEVO_TICKET: &str = "nuevo_ticket";
/// Event name announcing a status change.
pub const EVENT_TICKET_ACTUALIZADO: &str = "ticket_actualizado";
/// Event name announcing a ticket being called.
pub const EVENT_TICKET_LLAMADO: &str = "ticket_llamado";

/// Ticket lifecycle event published to connected listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketEvent {
    /// A ticket was issued through the staff path.
    Issued(Ticket),
    /// A ticket was issued through the public kiosk path.
    IssuedPublic(PublicTicket),
    /// A ticket's status was updated.
    StatusUpdated(Ticket),
    /// A ticket was called to a room.
    Called(Ticket),
}

impl TicketEvent {
    /// Wire-level event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Issued(_) | Self::IssuedPublic(_) => EVENT_NUEVO_TICKET,
            Self::StatusUpdated(_) => EVENT_TICKET_ACTUALIZADO,
            Self::Called(_) => EVENT_TICKET_LLAMADO,
        }
    }

    /// Event payload as JSON.
    pub fn payload(&self) -> Value {
        match self {
            Self::Issued(ticket) | Self::StatusUpdated(ticket) | Self::Called(ticket) => {
                serde_json::to_value(ticket).unwrap_or(Value::Null)
            }
            Self::IssuedPublic(ticket) => serde_json::to_value(ticket).unwrap_or(Value::Null),
        }
    }
}
