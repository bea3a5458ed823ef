//! Consulting room model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Consulting room: a numbered room staffed by a doctor for a service.
///
/// The `(numero, servicio_id, medico_id)` tuple is unique; duplicates are
/// rejected on registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Room {
    /// Surrogate key assigned by storage.
    pub id: i32,
    /// Room number shown on displays.
    pub numero: i32,
    /// Service attended in this room.
    pub servicio_id: i32,
    /// Doctor staffing this room.
    pub medico_id: i32,
}

/// Fields required to register or update a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRoom {
    /// Room number.
    pub numero: i32,
    /// Service attended in this room; existence is checked before writes.
    pub servicio_id: i32,
    /// Doctor staffing this room; existence is checked before writes.
    pub medico_id: i32,
}
