//! Priority level model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ordering tag attached to tickets. Lower `nivel_prioridad` is more urgent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Priority {
    /// Surrogate key assigned by storage.
    pub id: i32,
    /// Display name, unique across priorities.
    pub nombre: String,
    /// Numeric level.
    pub nivel_prioridad: i32,
}

/// Fields required to register or update a priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPriority {
    /// Display name.
    pub nombre: String,
    /// Numeric level.
    pub nivel_prioridad: i32,
}

impl NewPriority {
    /// Validate raw input; the name is required.
    pub fn from_parts(nombre: &str, nivel_prioridad: i32) -> Option<Self> {
        if nombre.trim().is_empty() {
            return None;
        }
        Some(Self {
            nombre: nombre.to_owned(),
            nivel_prioridad,
        })
    }
}
