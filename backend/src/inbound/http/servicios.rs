//! Care-service registry handlers.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::DeleteOutcome;
use crate::domain::{Error, NewService, Service};

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorBody, MessageBody};
use super::state::AppState;

const MISSING_FIELDS: &str = "Todos los campos son obligatorios";

/// Service registration request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ServiceRequest {
    /// Display name.
    pub nombre: Option<String>,
    /// Single-letter ticket prefix.
    pub letra: Option<String>,
    /// First number handed out when the sequence is empty.
    pub numero_inicial: Option<i32>,
}

/// List services.
#[utoipa::path(
    get,
    path = "/servicios",
    responses(
        (status = 200, description = "Services", body = [Service]),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["servicios"],
    operation_id = "listServicios"
)]
#[get("")]
pub async fn list(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<Service>>> {
    Ok(web::Json(state.services.list().await?))
}

/// Register a service with its numbering seed.
#[utoipa::path(
    post,
    path = "/servicios",
    request_body = ServiceRequest,
    responses(
        (status = 200, description = "Service created", body = Service),
        (status = 400, description = "Invalid fields", body = ErrorBody)
    ),
    tags = ["servicios"],
    operation_id = "createServicio"
)]
#[post("")]
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<ServiceRequest>,
) -> ApiResult<web::Json<Service>> {
    let ServiceRequest {
        nombre,
        letra,
        numero_inicial,
    } = payload.into_inner();
    let numero_inicial = numero_inicial.ok_or_else(|| Error::invalid_request(MISSING_FIELDS))?;
    let new_service = NewService::from_parts(
        nombre.as_deref().unwrap_or_default(),
        letra.as_deref().unwrap_or_default(),
        numero_inicial,
    )
    .ok_or_else(|| Error::invalid_request(MISSING_FIELDS))?;

    Ok(web::Json(state.services.insert(new_service).await?))
}

/// Fetch one service.
#[utoipa::path(
    get,
    path = "/servicios/{id}",
    params(("id" = i32, Path, description = "Service identifier")),
    responses(
        (status = 200, description = "Service", body = Service),
        (status = 404, description = "Unknown service", body = ErrorBody)
    ),
    tags = ["servicios"],
    operation_id = "getServicio"
)]
#[get("/{id}")]
pub async fn get_by_id(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Service>> {
    let service = state
        .services
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Servicio no encontrado"))?;
    Ok(web::Json(service))
}

/// Delete a service.
///
/// A service referenced by tickets or rooms is reported the same way as a
/// missing one.
#[utoipa::path(
    delete,
    path = "/servicios/{id}",
    params(("id" = i32, Path, description = "Service identifier")),
    responses(
        (status = 200, description = "Service deleted", body = MessageBody),
        (status = 404, description = "Unknown or referenced service", body = ErrorBody)
    ),
    tags = ["servicios"],
    operation_id = "deleteServicio"
)]
#[delete("/{id}")]
pub async fn remove(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    match state.services.delete(path.into_inner()).await? {
        DeleteOutcome::Deleted => Ok(web::Json(MessageBody::new(
            "Servicio eliminado correctamente",
        ))),
        DeleteOutcome::NotFound | DeleteOutcome::Restricted => {
            Err(Error::not_found("Servicio no encontrado o tiene registros asociados").into())
        }
    }
}
