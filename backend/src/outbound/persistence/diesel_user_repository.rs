//! Diesel-backed `UserRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DeleteOutcome, PersistenceError, UserRepository};
use crate::domain::{CredentialRecord, NewUser, User};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::usuarios;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = usuarios::table
            .order(usuarios::id.desc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = usuarios::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_username_or_email(
        &self,
        usuario: &str,
        correo: &str,
    ) -> Result<Option<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = usuarios::table
            .filter(usuarios::usuario.eq(usuario).or(usuarios::correo.eq(correo)))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRow::into_user))
    }

    async fn find_credentials_by_email(
        &self,
        correo: &str,
    ) -> Result<Option<CredentialRecord>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = usuarios::table
            .filter(usuarios::correo.eq(correo))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRow::into_credentials))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(usuarios::table)
            .values(NewUserRow::from(new_user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into_user())
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::delete(usuarios::table.find(id)).execute(&mut conn).await {
            Ok(0) => Ok(DeleteOutcome::NotFound),
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(error) => match map_diesel_error(error) {
                PersistenceError::ForeignKey { .. } => Ok(DeleteOutcome::Restricted),
                other => Err(other),
            },
        }
    }
}
