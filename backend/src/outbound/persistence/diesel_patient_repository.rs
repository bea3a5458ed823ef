//! Diesel-backed `PatientRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DeleteOutcome, PatientRepository, PersistenceError};
use crate::domain::{IdentityNumber, NewPatient, Patient};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPatientRow, PatientRow};
use super::pool::DbPool;
use super::schema::pacientes;

/// Diesel-backed implementation of the `PatientRepository` port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn list(&self) -> Result<Vec<Patient>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PatientRow> = pacientes::table
            .order(pacientes::id.desc())
            .select(PatientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(PatientRow::into_domain).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Patient>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PatientRow> = pacientes::table
            .find(id)
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(PatientRow::into_domain).transpose()
    }

    async fn find_by_identity(
        &self,
        identidad: &IdentityNumber,
    ) -> Result<Option<Patient>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PatientRow> = pacientes::table
            .filter(pacientes::identidad.eq(identidad.as_ref()))
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(PatientRow::into_domain).transpose()
    }

    async fn insert(&self, new_patient: NewPatient) -> Result<Patient, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: PatientRow = diesel::insert_into(pacientes::table)
            .values(NewPatientRow::from(new_patient))
            .returning(PatientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_domain()
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::delete(pacientes::table.find(id)).execute(&mut conn).await {
            Ok(0) => Ok(DeleteOutcome::NotFound),
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(error) => match map_diesel_error(error) {
                PersistenceError::ForeignKey { .. } => Ok(DeleteOutcome::Restricted),
                other => Err(other),
            },
        }
    }
}
