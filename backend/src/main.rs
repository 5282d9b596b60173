//! Scheduler entry-point: loads configuration, prepares storage and serves
//! the HTTP interface.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use scheduler::inbound::http::health::HealthState;
use scheduler::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{
    BuildMode, ServerConfig, ServerSettings, SessionConfigError, SettingsError, create_server,
    session_settings_from_env,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_validated().map_err(settings_error)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(session_error)?;

    let mut config = ServerConfig::new(session, settings.bind_addr());
    if let Some(database_url) = settings.database_url.as_deref() {
        if settings.run_migrations {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(std::io::Error::other)?;
        info!(max_connections = settings.db_max_connections(), "database pool ready");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

fn settings_error(err: SettingsError) -> std::io::Error {
    std::io::Error::other(format!("invalid server settings: {err}"))
}

fn session_error(err: SessionConfigError) -> std::io::Error {
    std::io::Error::other(format!("invalid session configuration: {err}"))
}
