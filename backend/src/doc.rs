//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::OpenApi;

/// Aggregated OpenAPI surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::usuarios::register,
        crate::inbound::http::usuarios::create,
        crate::inbound::http::usuarios::login,
        crate::inbound::http::usuarios::perfil,
        crate::inbound::http::usuarios::list,
        crate::inbound::http::usuarios::get_by_id,
        crate::inbound::http::usuarios::remove,
        crate::inbound::http::pacientes::list,
        crate::inbound::http::pacientes::create,
        crate::inbound::http::pacientes::get_by_id,
        crate::inbound::http::pacientes::remove,
        crate::inbound::http::medicos::list,
        crate::inbound::http::medicos::create,
        crate::inbound::http::medicos::get_by_id,
        crate::inbound::http::medicos::update,
        crate::inbound::http::medicos::remove,
        crate::inbound::http::consultorios::list,
        crate::inbound::http::consultorios::create,
        crate::inbound::http::consultorios::get_by_id,
        crate::inbound::http::consultorios::update,
        crate::inbound::http::consultorios::remove,
        crate::inbound::http::servicios::list,
        crate::inbound::http::servicios::create,
        crate::inbound::http::servicios::get_by_id,
        crate::inbound::http::servicios::remove,
        crate::inbound::http::prioridades::list,
        crate::inbound::http::prioridades::create,
        crate::inbound::http::prioridades::get_by_id,
        crate::inbound::http::prioridades::update,
        crate::inbound::http::prioridades::remove,
        crate::inbound::http::tickets::list,
        crate::inbound::http::tickets::create,
        crate::inbound::http::tickets::intake_public,
        crate::inbound::http::tickets::call,
        crate::inbound::http::tickets::get_by_id,
        crate::inbound::http::tickets::set_status,
        crate::inbound::http::tickets::remove,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::User,
        crate::domain::Patient,
        crate::domain::Doctor,
        crate::domain::Service,
        crate::domain::Priority,
        crate::domain::Room,
        crate::domain::Ticket,
        crate::domain::PublicTicket,
        crate::domain::Claims,
        crate::inbound::http::usuarios::RegisterRequest,
        crate::inbound::http::usuarios::LoginRequest,
        crate::inbound::http::usuarios::LoginResponse,
        crate::inbound::http::pacientes::RegisterPatientRequest,
        crate::inbound::http::medicos::DoctorRequest,
        crate::inbound::http::consultorios::RoomRequest,
        crate::inbound::http::servicios::ServiceRequest,
        crate::inbound::http::prioridades::PriorityRequest,
        crate::inbound::http::tickets::CreateTicketRequest,
        crate::inbound::http::tickets::PublicIntakeRequest,
        crate::inbound::http::tickets::CallRequest,
        crate::inbound::http::tickets::StatusRequest,
        crate::inbound::http::ErrorBody,
        crate::inbound::http::MessageBody,
    )),
    tags(
        (name = "usuarios", description = "Accounts and authentication"),
        (name = "pacientes", description = "Patient registry"),
        (name = "medicos", description = "Doctor registry"),
        (name = "consultorios", description = "Consulting rooms"),
        (name = "servicios", description = "Care services"),
        (name = "prioridades", description = "Priority levels"),
        (name = "tickets", description = "Ticket issuance and lifecycle"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
