//! Server wiring: migrations, pool, adapters, and the HTTP application.

pub mod config;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use color_eyre::eyre::eyre;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::TicketService;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::{self, AppState};
use crate::inbound::ws::{self, WsState};
use crate::outbound::broadcast::TicketBroadcaster;
use crate::outbound::persistence::{
    DbPool, DieselDoctorRepository, DieselPatientRepository, DieselPriorityRepository,
    DieselRoomRepository, DieselServiceRepository, DieselTicketRepository, DieselUserRepository,
    PoolConfig,
};
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenCodec, SystemClock};

pub use config::{ConfigError, ServerConfig};

/// Migrations compiled into the binary and applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Build the shared HTTP state on top of the Diesel adapters.
pub fn build_state(pool: DbPool, broadcaster: TicketBroadcaster, jwt_secret: &str) -> AppState {
    let patients = Arc::new(DieselPatientRepository::new(pool.clone()));
    let services = Arc::new(DieselServiceRepository::new(pool.clone()));
    let tickets = TicketService::new(
        Arc::new(DieselTicketRepository::new(pool.clone())),
        patients.clone(),
        services.clone(),
        Arc::new(broadcaster),
        Arc::new(SystemClock),
    );

    AppState {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        patients,
        doctors: Arc::new(DieselDoctorRepository::new(pool.clone())),
        services,
        priorities: Arc::new(DieselPriorityRepository::new(pool.clone())),
        rooms: Arc::new(DieselRoomRepository::new(pool)),
        tickets,
        hasher: Arc::new(BcryptPasswordHasher::default()),
        tokens: Arc::new(JwtTokenCodec::new(jwt_secret)),
    }
}

/// Apply pending migrations on a blocking thread.
async fn run_migrations(database_url: String) -> color_eyre::Result<()> {
    tokio::task::spawn_blocking(move || -> color_eyre::Result<()> {
        use diesel::Connection;

        let mut conn = diesel::PgConnection::establish(&database_url)?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| eyre!("migrations failed: {err}"))?;
        Ok(())
    })
    .await??;
    Ok(())
}

/// Run the server until shutdown.
pub async fn run(config: ServerConfig) -> color_eyre::Result<()> {
    let database_url = config.database_url();
    run_migrations(database_url.clone()).await?;

    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    let broadcaster = TicketBroadcaster::new();
    let state = build_state(pool, broadcaster.clone(), &config.jwt_secret);
    let ws_state = WsState::new(broadcaster);
    let health_state = web::Data::new(HealthState::new());

    let server_health = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(ws_state.clone()))
            .app_data(server_health.clone())
            .service(ws::ws_entry)
            .service(http::health::ready)
            .service(http::health::live)
            .configure(http::configure);

        #[cfg(debug_assertions)]
        let app = app.service(
            utoipa_swagger_ui::SwaggerUi::new("/docs/{_:.*}")
                .url("/api-docs/openapi.json", {
                    use utoipa::OpenApi;
                    crate::doc::ApiDoc::openapi()
                }),
        );

        app
    })
    .bind(("0.0.0.0", config.port))?;

    health_state.mark_ready();
    info!(port = config.port, "servidor escuchando");
    server.run().await?;
    Ok(())
}
