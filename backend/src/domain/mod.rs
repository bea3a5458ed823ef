//! Domain layer: entities, validation, the ticket issuance engine, and the
//! ports adapters implement. Everything here is transport agnostic.

mod doctor;
mod error;
mod events;
mod identity;
mod patient;
pub mod ports;
mod priority;
mod room;
mod service;
mod ticket;
mod tickets;
mod user;

pub use doctor::{Doctor, NewDoctor};
pub use error::{Error, ErrorCode};
pub use events::{
    EVENT_NUEVO_TICKET, EVENT_TICKET_ACTUALIZADO, EVENT_TICKET_LLAMADO, TicketEvent,
};
pub use identity::{Claims, TOKEN_TTL_SECS};
pub use patient::{IDENTITY_DIGITS, IdentityNumber, NewPatient, Patient, PatientValidationError};
pub use priority::{NewPriority, Priority};
pub use room::{NewRoom, Room};
pub use service::{NewService, Service};
pub use ticket::{
    ESTADO_LLAMADO, ESTADO_PENDIENTE, NewTicket, NumberingScope, PRIORIDAD_PUBLICA, PublicTicket,
    Ticket, TicketNumbering, next_number,
};
pub use tickets::{IssueRequest, TicketService};
pub use user::{CredentialRecord, Email, NewUser, User, UserValidationError, validate_registration};
