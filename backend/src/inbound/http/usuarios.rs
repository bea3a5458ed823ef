//! User account handlers: registration, login, profile, and the registry.
//!
//! ```text
//! POST /auth/register  (also mounted at /usuarios/register)
//! POST /auth/login     (also mounted at /usuarios/login)
//! GET  /usuarios       GET /usuarios/perfil  GET /usuarios/{id}
//! DELETE /usuarios/{id}
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{DeleteOutcome, PersistenceError};
use crate::domain::{Claims, Error, NewUser, User, UserValidationError, validate_registration};

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorBody, MessageBody};
use super::state::AppState;

const DUPLICATE_ACCOUNT: &str = "El usuario o correo ya están registrados";
const BAD_CREDENTIALS: &str = "Correo o contraseña incorrectos";

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Username.
    pub usuario: Option<String>,
    /// Email address.
    pub correo: Option<String>,
    /// Raw password; hashed before storage, never logged.
    #[serde(alias = "contraseña")]
    pub contrasena: Option<String>,
    /// Role string.
    pub rol: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Email address.
    pub correo: Option<String>,
    /// Raw password.
    #[serde(alias = "contraseña")]
    pub contrasena: Option<String>,
}

/// Login response: the bearer token plus a safe account view.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token, valid for 24 hours.
    pub token: String,
    /// The authenticated account.
    pub usuario: User,
}

fn map_validation(err: UserValidationError) -> Error {
    match err {
        UserValidationError::MissingField => {
            Error::invalid_request("Todos los campos son obligatorios")
        }
        UserValidationError::InvalidEmail => Error::invalid_request("Correo electrónico no válido"),
    }
}

async fn register_account(state: &AppState, payload: RegisterRequest) -> ApiResult<User> {
    let RegisterRequest {
        usuario,
        correo,
        contrasena,
        rol,
    } = payload;
    let usuario = usuario.unwrap_or_default();
    let contrasena = contrasena.unwrap_or_default();
    let rol = rol.unwrap_or_default();
    let correo = validate_registration(
        &usuario,
        correo.as_deref().unwrap_or_default(),
        &contrasena,
        &rol,
    )
    .map_err(map_validation)?;

    let existing = state
        .users
        .find_by_username_or_email(&usuario, correo.as_ref())
        .await?;
    if existing.is_some() {
        return Err(Error::invalid_request(DUPLICATE_ACCOUNT).into());
    }

    let hash = state.hasher.hash(&contrasena)?;
    let created = match state
        .users
        .insert(NewUser {
            usuario,
            correo,
            contrasena: hash,
            rol,
        })
        .await
    {
        Ok(user) => user,
        // The unique constraint backstops the pre-check under concurrency.
        Err(PersistenceError::Duplicate { .. }) => {
            return Err(Error::invalid_request(DUPLICATE_ACCOUNT).into());
        }
        Err(error) => return Err(error.into()),
    };
    Ok(created)
}

/// Register a new account (unauthenticated path).
#[utoipa::path(
    post,
    path = "/usuarios/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = User),
        (status = 400, description = "Invalid or duplicate fields", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "registerUsuario",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<User>> {
    register_account(&state, payload.into_inner())
        .await
        .map(web::Json)
}

/// Create an account from the authenticated admin surface.
#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = User),
        (status = 400, description = "Invalid or duplicate fields", body = ErrorBody),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "createUsuario"
)]
#[post("")]
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<User>> {
    register_account(&state, payload.into_inner())
        .await
        .map(web::Json)
}

/// Authenticate and obtain a bearer token.
///
/// Wrong password and unknown email produce the identical message, so
/// callers cannot probe which accounts exist.
#[utoipa::path(
    post,
    path = "/usuarios/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing or incorrect credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "loginUsuario",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { correo, contrasena } = payload.into_inner();
    let correo = correo.unwrap_or_default();
    let contrasena = contrasena.unwrap_or_default();
    if correo.trim().is_empty() || contrasena.is_empty() {
        return Err(Error::invalid_request("Correo y contraseña son obligatorios").into());
    }

    let Some(record) = state.users.find_credentials_by_email(&correo).await? else {
        return Err(Error::invalid_request(BAD_CREDENTIALS).into());
    };
    if !state.hasher.verify(&contrasena, &record.contrasena)? {
        return Err(Error::invalid_request(BAD_CREDENTIALS).into());
    }

    let token = state.tokens.issue(&record.user)?;
    Ok(web::Json(LoginResponse {
        token,
        usuario: record.user,
    }))
}

/// Claims of the presented token.
#[utoipa::path(
    get,
    path = "/usuarios/perfil",
    responses(
        (status = 200, description = "Token claims", body = Claims),
        (status = 400, description = "Invalid token", body = ErrorBody),
        (status = 401, description = "Missing token", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "perfilUsuario"
)]
#[get("/perfil")]
pub async fn perfil(user: AuthenticatedUser) -> web::Json<Claims> {
    web::Json(user.0)
}

/// List accounts.
#[utoipa::path(
    get,
    path = "/usuarios",
    responses(
        (status = 200, description = "Accounts", body = [User]),
        (status = 401, description = "Missing token", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "listUsuarios"
)]
#[get("")]
pub async fn list(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.list().await?))
}

/// Fetch one account.
#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account", body = User),
        (status = 404, description = "Unknown account", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "getUsuario"
)]
#[get("/{id}")]
pub async fn get_by_id(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Usuario no encontrado"))?;
    Ok(web::Json(user))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account deleted", body = MessageBody),
        (status = 404, description = "Unknown or referenced account", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "deleteUsuario"
)]
#[delete("/{id}")]
pub async fn remove(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    match state.users.delete(path.into_inner()).await? {
        DeleteOutcome::Deleted => Ok(web::Json(MessageBody::new(
            "Usuario eliminado correctamente",
        ))),
        DeleteOutcome::NotFound | DeleteOutcome::Restricted => {
            Err(Error::not_found("Usuario no encontrado").into())
        }
    }
}
