//! WebSocket envelope for ticket events.

use serde::Serialize;
use serde_json::Value;

use crate::domain::TicketEvent;

/// Frame pushed to every listener: `{"evento": "...", "data": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    /// Wire-level event name.
    pub evento: &'static str,
    /// Event payload.
    pub data: Value,
}

impl From<&TicketEvent> for EventEnvelope {
    fn from(event: &TicketEvent) -> Self {
        Self {
            evento: event.name(),
            data: event.payload(),
        }
    }
}

impl EventEnvelope {
    /// Serialized text frame.
    pub fn to_frame(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
