//! Consulting-room registry handlers.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{DeleteOutcome, PersistenceError};
use crate::domain::{Error, NewRoom, Room};

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorBody, MessageBody};
use super::state::AppState;

const MISSING_FIELDS: &str = "Número, servicio_id y medico_id son obligatorios";
const UNKNOWN_SERVICE: &str = "El servicio no existe";
const UNKNOWN_DOCTOR: &str = "El médico no existe";
const DUPLICATE_ROOM: &str = "Este consultorio ya está registrado con los mismos datos";

/// Room registration and update request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RoomRequest {
    /// Room number.
    pub numero: Option<i32>,
    /// Service attended in this room.
    pub servicio_id: Option<i32>,
    /// Doctor staffing this room.
    pub medico_id: Option<i32>,
}

async fn validated(state: &AppState, payload: RoomRequest) -> ApiResult<NewRoom> {
    let (Some(numero), Some(servicio_id), Some(medico_id)) =
        (payload.numero, payload.servicio_id, payload.medico_id)
    else {
        return Err(Error::invalid_request(MISSING_FIELDS).into());
    };

    if state.services.find_by_id(servicio_id).await?.is_none() {
        return Err(Error::invalid_request(UNKNOWN_SERVICE).into());
    }
    if state.doctors.find_by_id(medico_id).await?.is_none() {
        return Err(Error::invalid_request(UNKNOWN_DOCTOR).into());
    }
    Ok(NewRoom {
        numero,
        servicio_id,
        medico_id,
    })
}

/// List rooms ordered by room number.
#[utoipa::path(
    get,
    path = "/consultorios",
    responses(
        (status = 200, description = "Rooms", body = [Room]),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["consultorios"],
    operation_id = "listConsultorios"
)]
#[get("")]
pub async fn list(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<Room>>> {
    Ok(web::Json(state.rooms.list().await?))
}

/// Register a room. Duplicate `(numero, servicio, medico)` tuples are
/// rejected.
#[utoipa::path(
    post,
    path = "/consultorios",
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room created", body = Room),
        (status = 400, description = "Invalid, unknown, or duplicate fields", body = ErrorBody)
    ),
    tags = ["consultorios"],
    operation_id = "createConsultorio"
)]
#[post("")]
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<RoomRequest>,
) -> ApiResult<web::Json<Room>> {
    let new_room = validated(&state, payload.into_inner()).await?;

    if state.rooms.find_by_tuple(new_room).await?.is_some() {
        return Err(Error::invalid_request(DUPLICATE_ROOM).into());
    }

    match state.rooms.insert(new_room).await {
        Ok(room) => Ok(web::Json(room)),
        Err(PersistenceError::Duplicate { .. }) => {
            Err(Error::invalid_request(DUPLICATE_ROOM).into())
        }
        Err(error) => Err(error.into()),
    }
}

/// Fetch one room.
#[utoipa::path(
    get,
    path = "/consultorios/{id}",
    params(("id" = i32, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room", body = Room),
        (status = 404, description = "Unknown room", body = ErrorBody)
    ),
    tags = ["consultorios"],
    operation_id = "getConsultorio"
)]
#[get("/{id}")]
pub async fn get_by_id(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Room>> {
    let room = state
        .rooms
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Consultorio no encontrado"))?;
    Ok(web::Json(room))
}

/// Replace a room's fields.
#[utoipa::path(
    put,
    path = "/consultorios/{id}",
    params(("id" = i32, Path, description = "Room identifier")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 400, description = "Invalid, unknown, or duplicate fields", body = ErrorBody),
        (status = 404, description = "Unknown room", body = ErrorBody)
    ),
    tags = ["consultorios"],
    operation_id = "updateConsultorio"
)]
#[put("/{id}")]
pub async fn update(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<RoomRequest>,
) -> ApiResult<web::Json<Room>> {
    let new_room = validated(&state, payload.into_inner()).await?;
    match state.rooms.update(path.into_inner(), new_room).await {
        Ok(Some(room)) => Ok(web::Json(room)),
        Ok(None) => Err(Error::not_found("Consultorio no encontrado").into()),
        Err(PersistenceError::Duplicate { .. }) => {
            Err(Error::invalid_request(DUPLICATE_ROOM).into())
        }
        Err(error) => Err(error.into()),
    }
}

/// Delete a room.
#[utoipa::path(
    delete,
    path = "/consultorios/{id}",
    params(("id" = i32, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room deleted", body = MessageBody),
        (status = 404, description = "Unknown room", body = ErrorBody)
    ),
    tags = ["consultorios"],
    operation_id = "deleteConsultorio"
)]
#[delete("/{id}")]
pub async fn remove(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    match state.rooms.delete(path.into_inner()).await? {
        DeleteOutcome::Deleted => Ok(web::Json(MessageBody::new(
            "Consultorio eliminado correctamente",
        ))),
        DeleteOutcome::NotFound | DeleteOutcome::Restricted => {
            Err(Error::not_found("Consultorio no encontrado").into())
        }
    }
}
