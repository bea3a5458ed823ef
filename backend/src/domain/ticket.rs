//! Ticket model and the numbering rule.
//!
//! Ticket numbers are scoped to a service. The staff path numbers against
//! the whole history of the service; the public kiosk path numbers against
//! the current calendar day only. The two scopes are intentionally distinct
//! and must not be unified (see DESIGN.md).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Patient, Service};

/// Status assigned to freshly issued tickets.
pub const ESTADO_PENDIENTE: &str = "pendiente";
/// Status assigned when a ticket is called to a room.
pub const ESTADO_LLAMADO: &str = "llamado";

/// Priority assigned to tickets issued from the public kiosk.
pub const PRIORIDAD_PUBLICA: i32 = 1;

/// Queued service request with its assigned sequence number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    /// Surrogate key assigned by storage.
    pub id: i32,
    /// Sequence number within the service.
    pub numero_ticket: i32,
    /// Patient the ticket belongs to.
    pub paciente_id: i32,
    /// Service the ticket queues for.
    pub servicio_id: i32,
    /// Priority tag.
    pub prioridad_id: i32,
    /// Free-form status; `pendiente` and `llamado` are the well-known values.
    pub estado: String,
    /// Creation timestamp assigned by storage.
    pub fecha_hora: NaiveDateTime,
}

/// Fields of a ticket before a number is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Patient the ticket belongs to.
    pub paciente_id: i32,
    /// Service the ticket queues for.
    pub servicio_id: i32,
    /// Priority tag.
    pub prioridad_id: i32,
    /// Initial status.
    pub estado: String,
}

/// Rows considered when computing the next ticket number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingScope {
    /// All tickets ever issued for the service.
    AllTime,
    /// Only tickets issued for the service on the given calendar day.
    CalendarDay(NaiveDate),
}

/// Numbering rule handed to the ticket repository.
///
/// `fallback` is the number assigned when no ticket exists in scope. The
/// staff path seeds it with the service's `numero_inicial`; the public path
/// seeds it with `numero_inicial + 1`, preserving the original intake
/// behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketNumbering {
    /// Which rows participate in the max computation.
    pub scope: NumberingScope,
    /// Number used when the scope is empty.
    pub fallback: i32,
}

/// Next number in a sequence: one past the maximum, or the fallback when the
/// scope holds no tickets yet.
pub fn next_number(current_max: Option<i32>, fallback: i32) -> i32 {
    current_max.map_or(fallback, |max| max + 1)
}

/// Ticket enriched for the public kiosk display.
///
/// The kiosk prints the ticket immediately, so the broadcast carries the
/// denormalized patient and service plus preformatted date and time strings.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PublicTicket {
    /// The issued ticket.
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Patient details for the printout.
    pub paciente: Patient,
    /// Service details for the printout.
    pub servicio: Service,
    /// Service letter, duplicated for display convenience.
    pub letra: String,
    /// Issue date formatted as `DD/MM/YYYY`.
    pub fecha: String,
    /// Issue time formatted as `HH:MM:SS`.
    pub hora: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 100, 100)]
    #[case(Some(100), 100, 101)]
    #[case(Some(250), 100, 251)]
    #[case(None, 1, 1)]
    fn next_number_advances_or_seeds(
        #[case] current_max: Option<i32>,
        #[case] fallback: i32,
        #[case] expected: i32,
    ) {
        assert_eq!(next_number(current_max, fallback), expected);
    }
}
