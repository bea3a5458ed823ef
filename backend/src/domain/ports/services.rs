//! Port abstraction for care-service persistence adapters.

use async_trait::async_trait;

use crate::domain::service::{NewService, Service};

use super::persistence::{DeleteOutcome, PersistenceError};

/// Storage surface for the service registry.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// All services, newest first.
    async fn list(&self) -> Result<Vec<Service>, PersistenceError>;

    /// Fetch a service by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Service>, PersistenceError>;

    /// Insert a new service and return the stored row.
    async fn insert(&self, new_service: NewService) -> Result<Service, PersistenceError>;

    /// Delete a service.
    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError>;
}
