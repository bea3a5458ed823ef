//! Per-connection WebSocket handler.
//!
//! Keeps WebSocket framing and heartbeats at the edge while the payload
//! stream comes from the shared ticket event hub. The public contract
//! pings every 5s and considers a connection idle after 10s without client
//! traffic. Tests shorten these intervals to speed up feedback.

use std::time::{Duration, Instant};

use actix_ws::{CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time;
use tracing::{debug, warn};

use crate::domain::TicketEvent;
use crate::inbound::ws::messages::EventEnvelope;

/// Time between heartbeats to the client.
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client.
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

enum SessionEnd {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HeartbeatTimeout,
    FeedClosed,
    Protocol(ProtocolError),
    Network(Closed),
}

/// Drive one WebSocket connection until either side goes away.
pub(super) async fn handle_ws_session(
    mut events: broadcast::Receiver<TicketEvent>,
    mut session: Session,
    mut stream: MessageStream,
) {
    let mut last_heartbeat = Instant::now();
    let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

    let end = loop {
        let result = tokio::select! {
            _ = heartbeat.tick() => {
                heartbeat_tick(&mut session, last_heartbeat).await
            }
            message = stream.recv() => {
                client_message(&mut session, &mut last_heartbeat, message).await
            }
            event = events.recv() => {
                feed_event(&mut session, event).await
            }
        };

        if let Err(end) = result {
            break end;
        }
    };

    log_shutdown(&end);
    if let SessionEnd::ClientClosed(reason) = end {
        let _ = session.close(reason).await;
    } else {
        let _ = session.close(None).await;
    }
}

async fn heartbeat_tick(session: &mut Session, last_heartbeat: Instant) -> Result<(), SessionEnd> {
    if Instant::now().duration_since(last_heartbeat) > CLIENT_TIMEOUT {
        return Err(SessionEnd::HeartbeatTimeout);
    }
    session.ping(b"").await.map_err(SessionEnd::Network)
}

async fn client_message(
    session: &mut Session,
    last_heartbeat: &mut Instant,
    message: Option<Result<Message, ProtocolError>>,
) -> Result<(), SessionEnd> {
    let Some(message) = message else {
        return Err(SessionEnd::StreamClosed);
    };
    let message = message.map_err(SessionEnd::Protocol)?;
    *last_heartbeat = Instant::now();

    match message {
        Message::Ping(bytes) => session.pong(&bytes).await.map_err(SessionEnd::Network),
        Message::Close(reason) => Err(SessionEnd::ClientClosed(reason)),
        // The feed is one-way; client text and binary frames only count as
        // liveness traffic.
        _ => Ok(()),
    }
}

async fn feed_event(
    session: &mut Session,
    event: Result<TicketEvent, RecvError>,
) -> Result<(), SessionEnd> {
    match event {
        Ok(event) => {
            let frame = EventEnvelope::from(&event).to_frame();
            session.text(frame).await.map_err(SessionEnd::Network)
        }
        Err(RecvError::Lagged(missed)) => {
            warn!(missed, "listener lagged behind the ticket feed");
            Ok(())
        }
        Err(RecvError::Closed) => Err(SessionEnd::FeedClosed),
    }
}

fn log_shutdown(end: &SessionEnd) {
    match end {
        SessionEnd::ClientClosed(_) | SessionEnd::StreamClosed => {
            debug!("websocket client disconnected");
        }
        SessionEnd::HeartbeatTimeout => debug!("websocket client timed out"),
        SessionEnd::FeedClosed => debug!("ticket feed closed, dropping session"),
        SessionEnd::Protocol(error) => warn!(error = %error, "websocket protocol error"),
        SessionEnd::Network(_) => debug!("websocket connection closed mid-write"),
    }
}
