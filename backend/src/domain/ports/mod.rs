//! Domain ports: the contracts adapters implement.

pub(crate) mod macros;

mod clock;
mod doctors;
mod event_sink;
mod patients;
mod persistence;
mod priorities;
mod rooms;
mod security;
mod services;
mod tickets;
mod users;

pub use clock::Clock;
pub use doctors::DoctorRepository;
pub use event_sink::TicketEventSink;
pub use patients::PatientRepository;
pub use persistence::{DeleteOutcome, PersistenceError};
pub use priorities::PriorityRepository;
pub use rooms::RoomRepository;
pub use security::{IdentityError, PasswordHasher, TokenCodec};
pub use services::ServiceRepository;
pub use tickets::{TicketPersistenceError, TicketRepository};
pub use users::UserRepository;
