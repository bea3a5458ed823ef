//! Port abstraction for doctor persistence adapters.

use async_trait::async_trait;

use crate::domain::doctor::{Doctor, NewDoctor};

use super::persistence::{DeleteOutcome, PersistenceError};

/// Storage surface for the doctor registry.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// All doctors, newest first.
    async fn list(&self) -> Result<Vec<Doctor>, PersistenceError>;

    /// Fetch a doctor by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Doctor>, PersistenceError>;

    /// Insert a new doctor and return the stored row.
    async fn insert(&self, new_doctor: NewDoctor) -> Result<Doctor, PersistenceError>;

    /// Replace a doctor's fields; `None` when no row matched.
    async fn update(&self, id: i32, doctor: NewDoctor) -> Result<Option<Doctor>, PersistenceError>;

    /// Delete a doctor.
    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError>;
}
