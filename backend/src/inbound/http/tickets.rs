//! Ticket handlers: the staff surface plus the public kiosk intake.
//!
//! ```text
//! GET    /tickets              POST /tickets
//! POST   /tickets/publico      (unauthenticated)
//! POST   /tickets/llamar
//! GET    /tickets/{id}         DELETE /tickets/{id}
//! PUT    /tickets/{id}/estado
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, IdentityNumber, IssueRequest, PublicTicket, Ticket};

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorBody, MessageBody};
use super::state::AppState;

/// Staff issuance request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateTicketRequest {
    /// Patient the ticket belongs to.
    pub paciente_id: Option<i32>,
    /// Service the ticket queues for.
    pub servicio_id: Option<i32>,
    /// Priority tag.
    pub prioridad_id: Option<i32>,
    /// Optional initial status, `pendiente` when omitted.
    pub estado: Option<String>,
}

/// Public kiosk intake request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PublicIntakeRequest {
    /// Patient's national identity number.
    pub identidad: Option<String>,
    /// Service the ticket queues for.
    pub servicio_id: Option<i32>,
}

/// Call request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CallRequest {
    /// Ticket to call.
    pub id: Option<i32>,
}

/// Status update request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct StatusRequest {
    /// New status value.
    pub estado: Option<String>,
}

/// List tickets, most recent first.
#[utoipa::path(
    get,
    path = "/tickets",
    responses(
        (status = 200, description = "Tickets", body = [Ticket]),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("")]
pub async fn list(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<Ticket>>> {
    Ok(web::Json(state.tickets.list().await?))
}

/// Issue a ticket through the staff path.
#[utoipa::path(
    post,
    path = "/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 200, description = "Ticket issued", body = Ticket),
        (status = 400, description = "Missing fields or unknown references", body = ErrorBody),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["tickets"],
    operation_id = "createTicket"
)]
#[post("")]
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<CreateTicketRequest>,
) -> ApiResult<web::Json<Ticket>> {
    let CreateTicketRequest {
        paciente_id,
        servicio_id,
        prioridad_id,
        estado,
    } = payload.into_inner();
    let (Some(paciente_id), Some(servicio_id), Some(prioridad_id)) =
        (paciente_id, servicio_id, prioridad_id)
    else {
        return Err(
            Error::invalid_request("Paciente, servicio y prioridad son obligatorios").into(),
        );
    };

    let ticket = state
        .tickets
        .issue(IssueRequest {
            paciente_id,
            servicio_id,
            prioridad_id,
            estado,
        })
        .await?;
    Ok(web::Json(ticket))
}

/// Issue a ticket from the public kiosk (no token required).
///
/// The patient is resolved by identity number; a malformed identity cannot
/// match a registered patient and reports the same way as an unknown one.
#[utoipa::path(
    post,
    path = "/tickets/publico",
    request_body = PublicIntakeRequest,
    responses(
        (status = 200, description = "Ticket issued", body = PublicTicket),
        (status = 400, description = "Missing fields", body = ErrorBody),
        (status = 404, description = "Unknown patient or service", body = ErrorBody)
    ),
    tags = ["tickets"],
    operation_id = "createTicketPublico",
    security([])
)]
#[post("/publico")]
pub async fn intake_public(
    state: web::Data<AppState>,
    payload: web::Json<PublicIntakeRequest>,
) -> ApiResult<web::Json<PublicTicket>> {
    let PublicIntakeRequest {
        identidad,
        servicio_id,
    } = payload.into_inner();
    let (Some(identidad), Some(servicio_id)) = (identidad, servicio_id) else {
        return Err(Error::invalid_request("Identidad y servicio_id son obligatorios").into());
    };
    if identidad.trim().is_empty() {
        return Err(Error::invalid_request("Identidad y servicio_id son obligatorios").into());
    }

    let identidad = IdentityNumber::new(identidad)
        .map_err(|_| Error::not_found("Paciente no encontrado"))?;
    let public = state.tickets.issue_public(&identidad, servicio_id).await?;
    Ok(web::Json(public))
}

/// Call a ticket to a room.
#[utoipa::path(
    post,
    path = "/tickets/llamar",
    request_body = CallRequest,
    responses(
        (status = 200, description = "Ticket called", body = Ticket),
        (status = 400, description = "Missing ticket identifier", body = ErrorBody),
        (status = 404, description = "Unknown ticket", body = ErrorBody)
    ),
    tags = ["tickets"],
    operation_id = "llamarTicket"
)]
#[post("/llamar")]
pub async fn call(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<CallRequest>,
) -> ApiResult<web::Json<Ticket>> {
    let id = payload
        .into_inner()
        .id
        .ok_or_else(|| Error::invalid_request("El ID del ticket es obligatorio"))?;
    Ok(web::Json(state.tickets.call(id).await?))
}

/// Fetch one ticket.
#[utoipa::path(
    get,
    path = "/tickets/{id}",
    params(("id" = i32, Path, description = "Ticket identifier")),
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 404, description = "Unknown ticket", body = ErrorBody)
    ),
    tags = ["tickets"],
    operation_id = "getTicket"
)]
#[get("/{id}")]
pub async fn get_by_id(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Ticket>> {
    Ok(web::Json(state.tickets.get(path.into_inner()).await?))
}

/// Overwrite a ticket's status.
#[utoipa::path(
    put,
    path = "/tickets/{id}/estado",
    params(("id" = i32, Path, description = "Ticket identifier")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Ticket updated", body = Ticket),
        (status = 400, description = "Missing status", body = ErrorBody),
        (status = 404, description = "Unknown ticket", body = ErrorBody)
    ),
    tags = ["tickets"],
    operation_id = "updateTicketEstado"
)]
#[put("/{id}/estado")]
pub async fn set_status(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<web::Json<Ticket>> {
    let estado = payload
        .into_inner()
        .estado
        .ok_or_else(|| Error::invalid_request("El estado es obligatorio"))?;
    let ticket = state
        .tickets
        .set_status(path.into_inner(), &estado)
        .await?;
    Ok(web::Json(ticket))
}

/// Delete a ticket.
#[utoipa::path(
    delete,
    path = "/tickets/{id}",
    params(("id" = i32, Path, description = "Ticket identifier")),
    responses(
        (status = 200, description = "Ticket deleted", body = MessageBody),
        (status = 404, description = "Unknown ticket", body = ErrorBody)
    ),
    tags = ["tickets"],
    operation_id = "deleteTicket"
)]
#[delete("/{id}")]
pub async fn remove(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    state.tickets.delete(path.into_inner()).await?;
    Ok(web::Json(MessageBody::new("Ticket eliminado correctamente")))
}
