//! In-process broadcast hub implementing the ticket event sink.
//!
//! The issuance engine publishes into a `tokio::sync::broadcast` channel;
//! each WebSocket session drains its own receiver. Slow or absent
//! listeners lose events without ever affecting the write path.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::TicketEvent;
use crate::domain::ports::TicketEventSink;

/// Events buffered per receiver before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 64;

/// Fan-out hub shared between the issuance engine and WebSocket sessions.
#[derive(Clone)]
pub struct TicketBroadcaster {
    tx: broadcast::Sender<TicketEvent>,
}

impl Default for TicketBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketBroadcaster {
    /// Create a hub with the default buffer capacity.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe a new listener.
    pub fn subscribe(&self) -> broadcast::Receiver<TicketEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl TicketEventSink for TicketBroadcaster {
    async fn publish(&self, event: TicketEvent) {
        // A send error only means nobody is listening right now.
        if let Err(error) = self.tx.send(event) {
            debug!(error = %error, "ticket event dropped: no listeners");
        }
    }
}
