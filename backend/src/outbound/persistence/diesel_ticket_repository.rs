//! Diesel-backed `TicketRepository` adapter.
//!
//! Numbering and insert run inside one SERIALIZABLE transaction so two
//! concurrent issuances for the same service cannot both read the same
//! maximum; the loser surfaces as a retryable `Conflict`.

use async_trait::async_trait;
use diesel::dsl::{date, max};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::domain::ports::{TicketPersistenceError, TicketRepository};
use crate::domain::{NewTicket, NumberingScope, Ticket, TicketNumbering, next_number};

use super::diesel_error_mapping::{map_ticket_diesel_error, map_ticket_pool_error};
use super::models::{NewTicketRow, TicketRow};
use super::pool::DbPool;
use super::schema::tickets;

/// Diesel-backed implementation of the `TicketRepository` port.
#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for DieselTicketRepository {
    async fn list(&self) -> Result<Vec<Ticket>, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_ticket_pool_error)?;
        let rows: Vec<TicketRow> = tickets::table
            .order(tickets::fecha_hora.desc())
            .select(TicketRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_ticket_diesel_error)?;
        Ok(rows.into_iter().map(TicketRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_ticket_pool_error)?;
        let row: Option<TicketRow> = tickets::table
            .find(id)
            .select(TicketRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_ticket_diesel_error)?;
        Ok(row.map(TicketRow::into_domain))
    }

    async fn insert_numbered(
        &self,
        ticket: NewTicket,
        numbering: TicketNumbering,
    ) -> Result<Ticket, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_ticket_pool_error)?;
        let seed = NewTicketRow::from(ticket);

        let row: TicketRow = conn
            .build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    let current_max: Option<i32> = match numbering.scope {
                        NumberingScope::AllTime => {
                            tickets::table
                                .filter(tickets::servicio_id.eq(seed.servicio_id))
                                .select(max(tickets::numero_ticket))
                                .first(conn)
                                .await?
                        }
                        NumberingScope::CalendarDay(day) => {
                            tickets::table
                                .filter(tickets::servicio_id.eq(seed.servicio_id))
                                .filter(date(tickets::fecha_hora).eq(day))
                                .select(max(tickets::numero_ticket))
                                .first(conn)
                                .await?
                        }
                    };
                    let numero = next_number(current_max, numbering.fallback);

                    diesel::insert_into(tickets::table)
                        .values((seed, tickets::numero_ticket.eq(numero)))
                        .returning(TicketRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_ticket_diesel_error)?;
        Ok(row.into_domain())
    }

    async fn update_status(
        &self,
        id: i32,
        estado: &str,
    ) -> Result<Option<Ticket>, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_ticket_pool_error)?;
        let row: Option<TicketRow> = diesel::update(tickets::table.find(id))
            .set(tickets::estado.eq(estado))
            .returning(TicketRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_ticket_diesel_error)?;
        Ok(row.map(TicketRow::into_domain))
    }

    async fn delete(&self, id: i32) -> Result<bool, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_ticket_pool_error)?;
        let affected = diesel::delete(tickets::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_ticket_diesel_error)?;
        Ok(affected > 0)
    }
}
