//! Diesel-backed `DoctorRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DeleteOutcome, DoctorRepository, PersistenceError};
use crate::domain::{Doctor, NewDoctor};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DoctorRow, NewDoctorRow};
use super::pool::DbPool;
use super::schema::medicos;

/// Diesel-backed implementation of the `DoctorRepository` port.
#[derive(Clone)]
pub struct DieselDoctorRepository {
    pool: DbPool,
}

impl DieselDoctorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorRepository for DieselDoctorRepository {
    async fn list(&self) -> Result<Vec<Doctor>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DoctorRow> = medicos::table
            .order(medicos::id.desc())
            .select(DoctorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(DoctorRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Doctor>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DoctorRow> = medicos::table
            .find(id)
            .select(DoctorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(DoctorRow::into_domain))
    }

    async fn insert(&self, new_doctor: NewDoctor) -> Result<Doctor, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: DoctorRow = diesel::insert_into(medicos::table)
            .values(NewDoctorRow::from(new_doctor))
            .returning(DoctorRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into_domain())
    }

    async fn update(&self, id: i32, doctor: NewDoctor) -> Result<Option<Doctor>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DoctorRow> = diesel::update(medicos::table.find(id))
            .set(NewDoctorRow::from(doctor))
            .returning(DoctorRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(DoctorRow::into_domain))
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::delete(medicos::table.find(id)).execute(&mut conn).await {
            Ok(0) => Ok(DeleteOutcome::NotFound),
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(error) => match map_diesel_error(error) {
                PersistenceError::ForeignKey { .. } => Ok(DeleteOutcome::Restricted),
                other => Err(other),
            },
        }
    }
}
