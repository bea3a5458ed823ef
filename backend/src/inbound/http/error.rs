//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating [`Error`]
//! into Actix responses here. The wire envelope is a single descriptive
//! field: `{"error": "<mensaje>"}`. Internal failures are redacted; the
//! original error is only logged.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::ports::{IdentityError, PersistenceError};
use crate::domain::{Error, ErrorCode};

/// JSON error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    #[schema(example = "Ticket no encontrado")]
    pub error: String,
}

/// JSON acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MessageBody {
    /// Human-readable confirmation.
    #[schema(example = "Ticket eliminado correctamente")]
    pub message: String,
}

impl MessageBody {
    /// Build an acknowledgement payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// HTTP-facing error wrapping a domain failure.
#[derive(Debug, Clone)]
pub struct ApiError(Error);

impl ApiError {
    /// The wrapped domain error.
    pub fn inner(&self) -> &Error {
        &self.0
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        error!(error = %value, "storage failure surfaced to handler");
        Self(Error::internal(value.to_string()))
    }
}

impl From<IdentityError> for ApiError {
    fn from(value: IdentityError) -> Self {
        error!(error = %value, "identity primitive failure surfaced to handler");
        Self(Error::internal(value.to_string()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if matches!(self.0.code(), ErrorCode::Internal) {
            "Error interno del servidor".to_owned()
        } else {
            self.0.message().to_owned()
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { error: message })
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("denied"), StatusCode::UNAUTHORIZED)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_expected_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(error).status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let api_error = ApiError::from(Error::internal("connection refused to db:5432"));

        let response = api_error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: Value = serde_json::from_slice(&body).expect("error payload");

        assert_eq!(
            value.get("error").and_then(Value::as_str),
            Some("Error interno del servidor")
        );
    }

    #[actix_web::test]
    async fn validation_messages_pass_through() {
        let api_error = ApiError::from(Error::invalid_request("El servicio no existe"));

        let response = api_error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: Value = serde_json::from_slice(&body).expect("error payload");

        assert_eq!(
            value.get("error").and_then(Value::as_str),
            Some("El servicio no existe")
        );
    }
}
