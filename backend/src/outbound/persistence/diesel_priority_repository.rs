//! Diesel-backed `PriorityRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DeleteOutcome, PersistenceError, PriorityRepository};
use crate::domain::{NewPriority, Priority};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPriorityRow, PriorityRow};
use super::pool::DbPool;
use super::schema::prioridades;

/// Diesel-backed implementation of the `PriorityRepository` port.
#[derive(Clone)]
pub struct DieselPriorityRepository {
    pool: DbPool,
}

impl DieselPriorityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriorityRepository for DieselPriorityRepository {
    async fn list(&self) -> Result<Vec<Priority>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PriorityRow> = prioridades::table
            .order(prioridades::id.desc())
            .select(PriorityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(PriorityRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Priority>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PriorityRow> = prioridades::table
            .find(id)
            .select(PriorityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(PriorityRow::into_domain))
    }

    async fn find_by_name(
        &self,
        nombre: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Priority>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = prioridades::table
            .select(PriorityRow::as_select())
            .filter(prioridades::nombre.eq(nombre))
            .into_boxed();
        if let Some(excluded) = exclude_id {
            query = query.filter(prioridades::id.ne(excluded));
        }
        let row: Option<PriorityRow> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(PriorityRow::into_domain))
    }

    async fn insert(&self, new_priority: NewPriority) -> Result<Priority, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: PriorityRow = diesel::insert_into(prioridades::table)
            .values(NewPriorityRow::from(new_priority))
            .returning(PriorityRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into_domain())
    }

    async fn update(
        &self,
        id: i32,
        priority: NewPriority,
    ) -> Result<Option<Priority>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PriorityRow> = diesel::update(prioridades::table.find(id))
            .set(NewPriorityRow::from(priority))
            .returning(PriorityRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(PriorityRow::into_domain))
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::delete(prioridades::table.find(id)).execute(&mut conn).await {
            Ok(0) => Ok(DeleteOutcome::NotFound),
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(error) => match map_diesel_error(error) {
                PersistenceError::ForeignKey { .. } => Ok(DeleteOutcome::Restricted),
                other => Err(other),
            },
        }
    }
}
