//! HTTP adapter: handlers, the bearer guard, and the error envelope.
//!
//! Route layout follows the original contract: Spanish resource names at
//! the root, with registration, login, and the public kiosk intake left
//! unauthenticated.

use actix_web::web;

pub mod auth;
pub mod consultorios;
pub mod error;
pub mod health;
pub mod medicos;
pub mod pacientes;
pub mod prioridades;
pub mod servicios;
pub mod state;
pub mod tickets;
pub mod usuarios;

pub use auth::AuthenticatedUser;
pub use error::{ApiError, ApiResult, ErrorBody, MessageBody};
pub use state::AppState;

/// Register every resource scope on the application.
///
/// Literal segments (`/perfil`, `/publico`, `/llamar`) are registered
/// before their `/{id}` siblings so they stay reachable.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(usuarios::register)
            .service(usuarios::login),
    )
    .service(
        web::scope("/usuarios")
            .service(usuarios::register)
            .service(usuarios::login)
            .service(usuarios::perfil)
            .service(usuarios::list)
            .service(usuarios::create)
            .service(usuarios::get_by_id)
            .service(usuarios::remove),
    )
    .service(
        web::scope("/pacientes")
            .service(pacientes::list)
            .service(pacientes::create)
            .service(pacientes::get_by_id)
            .service(pacientes::remove),
    )
    .service(
        web::scope("/medicos")
            .service(medicos::list)
            .service(medicos::create)
            .service(medicos::get_by_id)
            .service(medicos::update)
            .service(medicos::remove),
    )
    .service(
        web::scope("/consultorios")
            .service(consultorios::list)
            .service(consultorios::create)
            .service(consultorios::get_by_id)
            .service(consultorios::update)
            .service(consultorios::remove),
    )
    .service(
        web::scope("/servicios")
            .service(servicios::list)
            .service(servicios::create)
            .service(servicios::get_by_id)
            .service(servicios::remove),
    )
    .service(
        web::scope("/prioridades")
            .service(prioridades::list)
            .service(prioridades::create)
            .service(prioridades::get_by_id)
            .service(prioridades::update)
            .service(prioridades::remove),
    )
    .service(
        web::scope("/tickets")
            .service(tickets::intake_public)
            .service(tickets::call)
            .service(tickets::list)
            .service(tickets::create)
            .service(tickets::set_status)
            .service(tickets::get_by_id)
            .service(tickets::remove),
    );
}
