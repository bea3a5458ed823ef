//! Persistence adapters: Diesel repositories over a shared async pool.

mod diesel_doctor_repository;
mod diesel_error_mapping;
mod diesel_patient_repository;
mod diesel_priority_repository;
mod diesel_room_repository;
mod diesel_service_repository;
mod diesel_ticket_repository;
mod diesel_user_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_doctor_repository::DieselDoctorRepository;
pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_priority_repository::DieselPriorityRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_service_repository::DieselServiceRepository;
pub use diesel_ticket_repository::DieselTicketRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
