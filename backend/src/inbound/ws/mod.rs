//! WebSocket entry and session wiring.

use actix_web::web::Payload;
use actix_web::{HttpRequest, HttpResponse, get, web};
use tracing::error;

pub mod messages;
mod session;
pub mod state;

pub use state::WsState;

/// Handle WebSocket upgrade for the `/ws` endpoint.
///
/// Each connection gets its own subscription on the ticket event hub; no
/// token is required, matching the kiosk displays this feeds.
#[get("/ws")]
pub async fn ws_entry(
    req: HttpRequest,
    stream: Payload,
    state: web::Data<WsState>,
) -> actix_web::Result<HttpResponse> {
    let (response, session, message_stream) = actix_ws::handle(&req, stream).map_err(|e| {
        error!(error = %e, "WebSocket upgrade failed");
        actix_web::error::ErrorInternalServerError("WebSocket upgrade failed")
    })?;

    let events = state.events.subscribe();
    actix_web::rt::spawn(session::handle_ws_session(events, session, message_stream));
    Ok(response)
}
