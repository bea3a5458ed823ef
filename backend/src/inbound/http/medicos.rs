//! Doctor registry handlers.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::DeleteOutcome;
use crate::domain::{Doctor, Error, NewDoctor};

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorBody, MessageBody};
use super::state::AppState;

const MISSING_FIELDS: &str = "Nombre, apellido, profesión y usuario_id son obligatorios";
const UNKNOWN_ACCOUNT: &str = "El usuario no existe";

/// Doctor registration and update request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DoctorRequest {
    /// Given name.
    pub nombre: Option<String>,
    /// Family name.
    pub apellido: Option<String>,
    /// Profession or speciality label.
    pub profesion: Option<String>,
    /// Owning user account.
    pub usuario_id: Option<i32>,
}

async fn validated(state: &AppState, payload: DoctorRequest) -> ApiResult<NewDoctor> {
    let usuario_id = payload
        .usuario_id
        .ok_or_else(|| Error::invalid_request(MISSING_FIELDS))?;
    let new_doctor = NewDoctor::from_parts(
        payload.nombre.as_deref().unwrap_or_default(),
        payload.apellido.as_deref().unwrap_or_default(),
        payload.profesion.as_deref().unwrap_or_default(),
        usuario_id,
    )
    .ok_or_else(|| Error::invalid_request(MISSING_FIELDS))?;

    if state.users.find_by_id(usuario_id).await?.is_none() {
        return Err(Error::invalid_request(UNKNOWN_ACCOUNT).into());
    }
    Ok(new_doctor)
}

/// List doctors.
#[utoipa::path(
    get,
    path = "/medicos",
    responses(
        (status = 200, description = "Doctors", body = [Doctor]),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["medicos"],
    operation_id = "listMedicos"
)]
#[get("")]
pub async fn list(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<Doctor>>> {
    Ok(web::Json(state.doctors.list().await?))
}

/// Register a doctor. The owning user account must exist.
#[utoipa::path(
    post,
    path = "/medicos",
    request_body = DoctorRequest,
    responses(
        (status = 200, description = "Doctor created", body = Doctor),
        (status = 400, description = "Invalid fields or unknown account", body = ErrorBody)
    ),
    tags = ["medicos"],
    operation_id = "createMedico"
)]
#[post("")]
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<DoctorRequest>,
) -> ApiResult<web::Json<Doctor>> {
    let new_doctor = validated(&state, payload.into_inner()).await?;
    Ok(web::Json(state.doctors.insert(new_doctor).await?))
}

/// Fetch one doctor.
#[utoipa::path(
    get,
    path = "/medicos/{id}",
    params(("id" = i32, Path, description = "Doctor identifier")),
    responses(
        (status = 200, description = "Doctor", body = Doctor),
        (status = 404, description = "Unknown doctor", body = ErrorBody)
    ),
    tags = ["medicos"],
    operation_id = "getMedico"
)]
#[get("/{id}")]
pub async fn get_by_id(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Doctor>> {
    let doctor = state
        .doctors
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Médico no encontrado"))?;
    Ok(web::Json(doctor))
}

/// Replace a doctor's fields.
#[utoipa::path(
    put,
    path = "/medicos/{id}",
    params(("id" = i32, Path, description = "Doctor identifier")),
    request_body = DoctorRequest,
    responses(
        (status = 200, description = "Doctor updated", body = Doctor),
        (status = 400, description = "Invalid fields or unknown account", body = ErrorBody),
        (status = 404, description = "Unknown doctor", body = ErrorBody)
    ),
    tags = ["medicos"],
    operation_id = "updateMedico"
)]
#[put("/{id}")]
pub async fn update(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<DoctorRequest>,
) -> ApiResult<web::Json<Doctor>> {
    let new_doctor = validated(&state, payload.into_inner()).await?;
    let doctor = state
        .doctors
        .update(path.into_inner(), new_doctor)
        .await?
        .ok_or_else(|| Error::not_found("Médico no encontrado"))?;
    Ok(web::Json(doctor))
}

/// Delete a doctor.
#[utoipa::path(
    delete,
    path = "/medicos/{id}",
    params(("id" = i32, Path, description = "Doctor identifier")),
    responses(
        (status = 200, description = "Doctor deleted", body = MessageBody),
        (status = 404, description = "Unknown or referenced doctor", body = ErrorBody)
    ),
    tags = ["medicos"],
    operation_id = "deleteMedico"
)]
#[delete("/{id}")]
pub async fn remove(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    match state.doctors.delete(path.into_inner()).await? {
        DeleteOutcome::Deleted => Ok(web::Json(MessageBody::new(
            "Médico eliminado correctamente",
        ))),
        DeleteOutcome::NotFound | DeleteOutcome::Restricted => {
            Err(Error::not_found("Médico no encontrado").into())
        }
    }
}
