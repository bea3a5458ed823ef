//! Shared WebSocket adapter state.

use crate::outbound::broadcast::TicketBroadcaster;

/// Dependency bundle for WebSocket sessions.
///
/// Sessions only need a subscription handle on the event hub; everything
/// else stays on the HTTP side.
#[derive(Clone)]
pub struct WsState {
    /// Hub the issuance engine publishes into.
    pub events: TicketBroadcaster,
}

impl WsState {
    /// Construct state from the shared hub.
    pub fn new(events: TicketBroadcaster) -> Self {
        Self { events }
    }
}
