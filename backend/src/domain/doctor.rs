//! Doctor registry model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registered doctor, linked to the user account it signs in with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Doctor {
    /// Surrogate key assigned by storage.
    pub id: i32,
    /// Given name.
    pub nombre: String,
    /// Family name.
    pub apellido: String,
    /// Profession or speciality label.
    pub profesion: String,
    /// Owning user account.
    pub usuario_id: i32,
}

/// Fields required to register or update a doctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    /// Given name.
    pub nombre: String,
    /// Family name.
    pub apellido: String,
    /// Profession or speciality label.
    pub profesion: String,
    /// Owning user account; existence is checked before writes.
    pub usuario_id: i32,
}

impl NewDoctor {
    /// Validate raw input; every field is required.
    pub fn from_parts(
        nombre: &str,
        apellido: &str,
        profesion: &str,
        usuario_id: i32,
    ) -> Option<Self> {
        if nombre.trim().is_empty() || apellido.trim().is_empty() || profesion.trim().is_empty() {
            return None;
        }
        Some(Self {
            nombre: nombre.to_owned(),
            apellido: apellido.to_owned(),
            profesion: profesion.to_owned(),
            usuario_id,
        })
    }
}
