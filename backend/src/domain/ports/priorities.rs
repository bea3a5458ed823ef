//! Port abstraction for priority persistence adapters.

use async_trait::async_trait;

use crate::domain::priority::{NewPriority, Priority};

use super::persistence::{DeleteOutcome, PersistenceError};

/// Storage surface for the priority registry.
#[async_trait]
pub trait PriorityRepository: Send + Sync {
    /// All priorities, newest first.
    async fn list(&self) -> Result<Vec<Priority>, PersistenceError>;

    /// Fetch a priority by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Priority>, PersistenceError>;

    /// Duplicate probe: a priority with this name, excluding `exclude_id`
    /// when updating in place.
    async fn find_by_name(
        &self,
        nombre: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Priority>, PersistenceError>;

    /// Insert a new priority and return the stored row.
    async fn insert(&self, new_priority: NewPriority) -> Result<Priority, PersistenceError>;

    /// Replace a priority's fields; `None` when no row matched.
    async fn update(
        &self,
        id: i32,
        priority: NewPriority,
    ) -> Result<Option<Priority>, PersistenceError>;

    /// Delete a priority.
    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError>;
}
