//! Patient registry model.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of digits in a national identity number.
pub const IDENTITY_DIGITS: usize = 13;

/// Validation errors raised when constructing patient values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientValidationError {
    /// A required field is empty once trimmed of whitespace.
    MissingField,
    /// The identity number is not exactly thirteen numeric digits.
    InvalidIdentity,
}

impl fmt::Display for PatientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "all patient fields are required"),
            Self::InvalidIdentity => {
                write!(f, "identity must be exactly {IDENTITY_DIGITS} numeric digits")
            }
        }
    }
}

impl std::error::Error for PatientValidationError {}

/// National identity number: exactly thirteen numeric digits.
///
/// Validated on construction so a stored value is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityNumber(String);

impl IdentityNumber {
    /// Validate and construct an [`IdentityNumber`].
    pub fn new(raw: impl Into<String>) -> Result<Self, PatientValidationError> {
        let raw = raw.into();
        if raw.len() != IDENTITY_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PatientValidationError::InvalidIdentity);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for IdentityNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<IdentityNumber> for String {
    fn from(value: IdentityNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for IdentityNumber {
    type Error = PatientValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    /// Surrogate key assigned by storage.
    pub id: i32,
    /// National identity number, unique across the registry.
    #[schema(value_type = String, example = "0123456789123")]
    pub identidad: IdentityNumber,
    /// Given names.
    pub nombres: String,
    /// Family names.
    pub apellidos: String,
    /// Registration timestamp assigned by storage.
    pub fecha_registro: NaiveDateTime,
}

/// Fields required to register a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    /// National identity number.
    pub identidad: IdentityNumber,
    /// Given names.
    pub nombres: String,
    /// Family names.
    pub apellidos: String,
}

impl NewPatient {
    /// Validate raw registration input.
    ///
    /// Presence is checked before format so an empty identity reports the
    /// missing-field error, matching the registry's observable behaviour.
    pub fn from_parts(
        identidad: &str,
        nombres: &str,
        apellidos: &str,
    ) -> Result<Self, PatientValidationError> {
        if identidad.trim().is_empty() || nombres.trim().is_empty() || apellidos.trim().is_empty() {
            return Err(PatientValidationError::MissingField);
        }
        Ok(Self {
            identidad: IdentityNumber::new(identidad)?,
            nombres: nombres.to_owned(),
            apellidos: apellidos.to_owned(),
        })
    }
}
