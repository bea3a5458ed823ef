//! Priority registry handlers.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{DeleteOutcome, PersistenceError};
use crate::domain::{Error, NewPriority, Priority};

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorBody, MessageBody};
use super::state::AppState;

/// Priority registration and update request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PriorityRequest {
    /// Display name, unique across priorities.
    pub nombre: Option<String>,
    /// Numeric level.
    pub nivel_prioridad: Option<i32>,
}

fn parse(payload: PriorityRequest, missing: &str) -> ApiResult<NewPriority> {
    let nivel = payload
        .nivel_prioridad
        .ok_or_else(|| Error::invalid_request(missing))?;
    NewPriority::from_parts(payload.nombre.as_deref().unwrap_or_default(), nivel)
        .ok_or_else(|| Error::invalid_request(missing).into())
}

/// List priorities.
#[utoipa::path(
    get,
    path = "/prioridades",
    responses(
        (status = 200, description = "Priorities", body = [Priority]),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["prioridades"],
    operation_id = "listPrioridades"
)]
#[get("")]
pub async fn list(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<Priority>>> {
    Ok(web::Json(state.priorities.list().await?))
}

/// Register a priority. Names are unique.
#[utoipa::path(
    post,
    path = "/prioridades",
    request_body = PriorityRequest,
    responses(
        (status = 200, description = "Priority created", body = Priority),
        (status = 400, description = "Invalid or duplicate fields", body = ErrorBody)
    ),
    tags = ["prioridades"],
    operation_id = "createPrioridad"
)]
#[post("")]
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<PriorityRequest>,
) -> ApiResult<web::Json<Priority>> {
    let new_priority = parse(
        payload.into_inner(),
        "Nombre y nivel_prioridad son obligatorios",
    )?;

    let existing = state
        .priorities
        .find_by_name(&new_priority.nombre, None)
        .await?;
    if existing.is_some() {
        return Err(Error::invalid_request("La prioridad ya existe").into());
    }

    match state.priorities.insert(new_priority).await {
        Ok(priority) => Ok(web::Json(priority)),
        Err(PersistenceError::Duplicate { .. }) => {
            Err(Error::invalid_request("La prioridad ya existe").into())
        }
        Err(error) => Err(error.into()),
    }
}

/// Fetch one priority.
#[utoipa::path(
    get,
    path = "/prioridades/{id}",
    params(("id" = i32, Path, description = "Priority identifier")),
    responses(
        (status = 200, description = "Priority", body = Priority),
        (status = 404, description = "Unknown priority", body = ErrorBody)
    ),
    tags = ["prioridades"],
    operation_id = "getPrioridad"
)]
#[get("/{id}")]
pub async fn get_by_id(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Priority>> {
    let priority = state
        .priorities
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Prioridad no encontrada"))?;
    Ok(web::Json(priority))
}

/// Replace a priority's fields; the new name must not belong to another
/// priority.
#[utoipa::path(
    put,
    path = "/prioridades/{id}",
    params(("id" = i32, Path, description = "Priority identifier")),
    request_body = PriorityRequest,
    responses(
        (status = 200, description = "Priority updated", body = Priority),
        (status = 400, description = "Invalid or duplicate fields", body = ErrorBody),
        (status = 404, description = "Unknown priority", body = ErrorBody)
    ),
    tags = ["prioridades"],
    operation_id = "updatePrioridad"
)]
#[put("/{id}")]
pub async fn update(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<PriorityRequest>,
) -> ApiResult<web::Json<Priority>> {
    let id = path.into_inner();
    let new_priority = parse(payload.into_inner(), "Nombre y nivel son obligatorios")?;

    let clash = state
        .priorities
        .find_by_name(&new_priority.nombre, Some(id))
        .await?;
    if clash.is_some() {
        return Err(Error::invalid_request("Otra prioridad con este nombre ya existe").into());
    }

    match state.priorities.update(id, new_priority).await {
        Ok(Some(priority)) => Ok(web::Json(priority)),
        Ok(None) => Err(Error::not_found("Prioridad no encontrada").into()),
        Err(PersistenceError::Duplicate { .. }) => {
            Err(Error::invalid_request("Otra prioridad con este nombre ya existe").into())
        }
        Err(error) => Err(error.into()),
    }
}

/// Delete a priority.
#[utoipa::path(
    delete,
    path = "/prioridades/{id}",
    params(("id" = i32, Path, description = "Priority identifier")),
    responses(
        (status = 200, description = "Priority deleted", body = MessageBody),
        (status = 404, description = "Unknown or referenced priority", body = ErrorBody)
    ),
    tags = ["prioridades"],
    operation_id = "deletePrioridad"
)]
#[delete("/{id}")]
pub async fn remove(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    match state.priorities.delete(path.into_inner()).await? {
        DeleteOutcome::Deleted => Ok(web::Json(MessageBody::new(
            "Prioridad eliminada correctamente",
        ))),
        DeleteOutcome::NotFound | DeleteOutcome::Restricted => {
            Err(Error::not_found("Prioridad no encontrada o tiene registros asociados").into())
        }
    }
}
