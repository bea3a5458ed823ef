//! Port abstraction for patient persistence adapters.

use async_trait::async_trait;

use crate::domain::patient::{IdentityNumber, NewPatient, Patient};

use super::persistence::{DeleteOutcome, PersistenceError};

/// Storage surface for the patient registry.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// All patients, newest first.
    async fn list(&self) -> Result<Vec<Patient>, PersistenceError>;

    /// Fetch a patient by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Patient>, PersistenceError>;

    /// Fetch a patient by national identity number.
    async fn find_by_identity(
        &self,
        identidad: &IdentityNumber,
    ) -> Result<Option<Patient>, PersistenceError>;

    /// Insert a new patient and return the stored row.
    async fn insert(&self, new_patient: NewPatient) -> Result<Patient, PersistenceError>;

    /// Delete a patient.
    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError>;
}
