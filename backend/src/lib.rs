//! Hospital queue-management backend.
//!
//! Registers patients, doctors, services, consulting rooms, and priority
//! levels, issues sequentially numbered tickets per service, and pushes
//! ticket lifecycle events to WebSocket listeners. Laid out hexagonally:
//! the domain owns entities, the issuance engine, and ports; inbound
//! adapters speak HTTP and WebSocket; outbound adapters speak Diesel,
//! bcrypt, and HS256 tokens.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
