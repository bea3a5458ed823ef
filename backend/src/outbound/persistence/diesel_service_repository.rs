//! Diesel-backed `ServiceRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DeleteOutcome, PersistenceError, ServiceRepository};
use crate::domain::{NewService, Service};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewServiceRow, ServiceRow};
use super::pool::DbPool;
use super::schema::servicios;

/// Diesel-backed implementation of the `ServiceRepository` port.
#[derive(Clone)]
pub struct DieselServiceRepository {
    pool: DbPool,
}

impl DieselServiceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for DieselServiceRepository {
    async fn list(&self) -> Result<Vec<Service>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ServiceRow> = servicios::table
            .order(servicios::id.desc())
            .select(ServiceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(ServiceRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Service>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ServiceRow> = servicios::table
            .find(id)
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(ServiceRow::into_domain))
    }

    async fn insert(&self, new_service: NewService) -> Result<Service, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ServiceRow = diesel::insert_into(servicios::table)
            .values(NewServiceRow::from(new_service))
            .returning(ServiceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into_domain())
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::delete(servicios::table.find(id)).execute(&mut conn).await {
            Ok(0) => Ok(DeleteOutcome::NotFound),
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(error) => match map_diesel_error(error) {
                PersistenceError::ForeignKey { .. } => Ok(DeleteOutcome::Restricted),
                other => Err(other),
            },
        }
    }
}
