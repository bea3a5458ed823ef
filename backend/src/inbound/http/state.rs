//! Shared HTTP adapter state.
//!
//! Handlers depend on domain ports instead of constructing adapters
//! directly, so the whole HTTP surface is testable with deterministic
//! doubles.

use std::sync::Arc;

use crate::domain::TicketService;
use crate::domain::ports::{
    DoctorRepository, PasswordHasher, PatientRepository, PriorityRepository, RoomRepository,
    ServiceRepository, TokenCodec, UserRepository,
};

/// Dependency bundle handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    /// User registry storage.
    pub users: Arc<dyn UserRepository>,
    /// Patient registry storage.
    pub patients: Arc<dyn PatientRepository>,
    /// Doctor registry storage.
    pub doctors: Arc<dyn DoctorRepository>,
    /// Service registry storage.
    pub services: Arc<dyn ServiceRepository>,
    /// Priority registry storage.
    pub priorities: Arc<dyn PriorityRepository>,
    /// Room registry storage.
    pub rooms: Arc<dyn RoomRepository>,
    /// Ticket issuance engine.
    pub tickets: TicketService,
    /// Password hashing primitive.
    pub hasher: Arc<dyn PasswordHasher>,
    /// Bearer-token codec.
    pub tokens: Arc<dyn TokenCodec>,
}
