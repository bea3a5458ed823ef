//! Bearer-token identity guard.
//!
//! Every protected route takes [`AuthenticatedUser`] as an extractor, so
//! verification short-circuits before any registry or engine logic runs.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::{Ready, ready};

use crate::domain::{Claims, Error};

use super::error::ApiError;
use super::state::AppState;

/// Response when no token accompanies the request.
const MISSING_TOKEN: &str = "Acceso denegado. No se proporcionó un token.";
/// Response for malformed, expired, or mis-signed tokens.
const INVALID_TOKEN: &str = "Token inválido";

/// Identity attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Err(Error::internal("application state not configured").into());
    };

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized(MISSING_TOKEN))?;

    // The scheme prefix is optional in the original contract.
    let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value);

    let claims = state
        .tokens
        .verify(token.trim())
        .map_err(|_| Error::invalid_request(INVALID_TOKEN))?;
    Ok(AuthenticatedUser(claims))
}
