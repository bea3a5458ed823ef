//! Patient registry handlers.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{DeleteOutcome, PersistenceError};
use crate::domain::{Error, NewPatient, Patient, PatientValidationError};

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorBody, MessageBody};
use super::state::AppState;

const DUPLICATE_PATIENT: &str = "El paciente ya está registrado";

/// Patient registration request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterPatientRequest {
    /// National identity number, exactly thirteen digits.
    pub identidad: Option<String>,
    /// Given names.
    pub nombres: Option<String>,
    /// Family names.
    pub apellidos: Option<String>,
}

fn map_validation(err: PatientValidationError) -> Error {
    match err {
        PatientValidationError::MissingField => {
            Error::invalid_request("Todos los campos son obligatorios")
        }
        PatientValidationError::InvalidIdentity => Error::invalid_request(
            "La identidad debe contener exactamente 13 dígitos numéricos",
        ),
    }
}

/// List patients.
#[utoipa::path(
    get,
    path = "/pacientes",
    responses(
        (status = 200, description = "Patients", body = [Patient]),
        (status = 401, description = "Missing token", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["pacientes"],
    operation_id = "listPacientes"
)]
#[get("")]
pub async fn list(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<Patient>>> {
    Ok(web::Json(state.patients.list().await?))
}

/// Register a patient.
///
/// The identity format is validated before any storage write; duplicates
/// are rejected whether caught by the pre-check or the unique constraint.
#[utoipa::path(
    post,
    path = "/pacientes",
    request_body = RegisterPatientRequest,
    responses(
        (status = 200, description = "Patient created", body = Patient),
        (status = 400, description = "Invalid or duplicate fields", body = ErrorBody),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["pacientes"],
    operation_id = "registerPaciente"
)]
#[post("")]
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<RegisterPatientRequest>,
) -> ApiResult<web::Json<Patient>> {
    let RegisterPatientRequest {
        identidad,
        nombres,
        apellidos,
    } = payload.into_inner();
    let new_patient = NewPatient::from_parts(
        identidad.as_deref().unwrap_or_default(),
        nombres.as_deref().unwrap_or_default(),
        apellidos.as_deref().unwrap_or_default(),
    )
    .map_err(map_validation)?;

    let existing = state
        .patients
        .find_by_identity(&new_patient.identidad)
        .await?;
    if existing.is_some() {
        return Err(Error::invalid_request(DUPLICATE_PATIENT).into());
    }

    match state.patients.insert(new_patient).await {
        Ok(patient) => Ok(web::Json(patient)),
        Err(PersistenceError::Duplicate { .. }) => {
            Err(Error::invalid_request(DUPLICATE_PATIENT).into())
        }
        Err(error) => Err(error.into()),
    }
}

/// Fetch one patient.
#[utoipa::path(
    get,
    path = "/pacientes/{id}",
    params(("id" = i32, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient", body = Patient),
        (status = 404, description = "Unknown patient", body = ErrorBody)
    ),
    tags = ["pacientes"],
    operation_id = "getPaciente"
)]
#[get("/{id}")]
pub async fn get_by_id(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Patient>> {
    let patient = state
        .patients
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Paciente no encontrado"))?;
    Ok(web::Json(patient))
}

/// Delete a patient.
///
/// A patient referenced by tickets is reported the same way as a missing
/// one; callers cannot distinguish the two cases.
#[utoipa::path(
    delete,
    path = "/pacientes/{id}",
    params(("id" = i32, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageBody),
        (status = 404, description = "Unknown or referenced patient", body = ErrorBody)
    ),
    tags = ["pacientes"],
    operation_id = "deletePaciente"
)]
#[delete("/{id}")]
pub async fn remove(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    match state.patients.delete(path.into_inner()).await? {
        DeleteOutcome::Deleted => Ok(web::Json(MessageBody::new(
            "Paciente eliminado correctamente",
        ))),
        DeleteOutcome::NotFound | DeleteOutcome::Restricted => {
            Err(Error::not_found("Paciente no encontrado o tiene registros asociados").into())
        }
    }
}
