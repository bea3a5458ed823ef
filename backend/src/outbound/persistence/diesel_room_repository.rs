//! Diesel-backed `RoomRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DeleteOutcome, PersistenceError, RoomRepository};
use crate::domain::{NewRoom, Room};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRoomRow, RoomRow};
use super::pool::DbPool;
use super::schema::consultorios;

/// Diesel-backed implementation of the `RoomRepository` port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn list(&self) -> Result<Vec<Room>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RoomRow> = consultorios::table
            .order(consultorios::numero.asc())
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(RoomRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Room>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RoomRow> = consultorios::table
            .find(id)
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(RoomRow::into_domain))
    }

    async fn find_by_tuple(&self, room: NewRoom) -> Result<Option<Room>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RoomRow> = consultorios::table
            .filter(consultorios::numero.eq(room.numero))
            .filter(consultorios::servicio_id.eq(room.servicio_id))
            .filter(consultorios::medico_id.eq(room.medico_id))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(RoomRow::into_domain))
    }

    async fn insert(&self, new_room: NewRoom) -> Result<Room, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: RoomRow = diesel::insert_into(consultorios::table)
            .values(NewRoomRow::from(new_room))
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into_domain())
    }

    async fn update(&self, id: i32, room: NewRoom) -> Result<Option<Room>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RoomRow> = diesel::update(consultorios::table.find(id))
            .set(NewRoomRow::from(room))
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(RoomRow::into_domain))
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::delete(consultorios::table.find(id)).execute(&mut conn).await {
            Ok(0) => Ok(DeleteOutcome::NotFound),
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(error) => match map_diesel_error(error) {
                PersistenceError::ForeignKey { .. } => Ok(DeleteOutcome::Restricted),
                other => Err(other),
            },
        }
    }
}
