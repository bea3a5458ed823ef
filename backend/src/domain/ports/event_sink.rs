//! Output port for ticket lifecycle events.

use async_trait::async_trait;

use crate::domain::events::TicketEvent;

/// Sink for ticket lifecycle events.
///
/// Publication is fire-and-forget: implementations may buffer, drop, or
/// retry, and the caller never observes delivery failures. The issuance
/// engine invokes this synchronously after each successful write.
#[async_trait]
pub trait TicketEventSink: Send + Sync {
    /// Publish an event to all connected listeners.
    async fn publish(&self, event: TicketEvent);
}
