//! User account model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised when constructing account values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    /// A required field is empty once trimmed of whitespace.
    MissingField,
    /// The email address does not match the `local@domain.tld` shape.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "all account fields are required"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Email address validated against a basic `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

fn has_valid_shape(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"._%+-".contains(&b))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty()
        || !host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
    {
        return false;
    }
    tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if !has_valid_shape(&raw) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// User account as exposed to callers.
///
/// The stored password hash never travels on this type; adapters that need
/// it for verification use [`CredentialRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Surrogate key assigned by storage.
    pub id: i32,
    /// Username, unique across accounts.
    pub usuario: String,
    /// Email address, unique across accounts. Validated as [`Email`] on
    /// registration; carried verbatim afterwards.
    #[schema(example = "recepcion@hospital.hn")]
    pub correo: String,
    /// Role string attached to issued tokens.
    pub rol: String,
}

/// Fields required to register an account. `contrasena` is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Username.
    pub usuario: String,
    /// Email address.
    pub correo: Email,
    /// Salted password hash; never the raw password.
    pub contrasena: String,
    /// Role string.
    pub rol: String,
}

/// Account row paired with its stored password hash, for login verification.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRecord {
    /// The account without secret material.
    pub user: User,
    /// Salted password hash as persisted.
    pub contrasena: String,
}

/// Validate raw registration input, returning the parsed email.
///
/// Presence is checked before the email shape so a blank form reports the
/// missing-field error first.
pub fn validate_registration(
    usuario: &str,
    correo: &str,
    contrasena: &str,
    rol: &str,
) -> Result<Email, UserValidationError> {
    if usuario.trim().is_empty()
        || correo.trim().is_empty()
        || contrasena.is_empty()
        || rol.trim().is_empty()
    {
        return Err(UserValidationError::MissingField);
    }
    Email::new(correo)
}
