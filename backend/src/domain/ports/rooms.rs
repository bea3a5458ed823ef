//! Port abstraction for consulting-room persistence adapters.

use async_trait::async_trait;

use crate::domain::room::{NewRoom, Room};

use super::persistence::{DeleteOutcome, PersistenceError};

/// Storage surface for the room registry.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// All rooms ordered by room number.
    async fn list(&self) -> Result<Vec<Room>, PersistenceError>;

    /// Fetch a room by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Room>, PersistenceError>;

    /// Duplicate probe for the `(numero, servicio, medico)` tuple.
    async fn find_by_tuple(&self, room: NewRoom) -> Result<Option<Room>, PersistenceError>;

    /// Insert a new room and return the stored row.
    async fn insert(&self, new_room: NewRoom) -> Result<Room, PersistenceError>;

    /// Replace a room's fields; `None` when no row matched.
    async fn update(&self, id: i32, room: NewRoom) -> Result<Option<Room>, PersistenceError>;

    /// Delete a room.
    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError>;
}
