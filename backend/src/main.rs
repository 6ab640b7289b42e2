//! Leavedesk entry-point: loads configuration, prepares persistence, and
//! serves the REST API.

mod server;

use std::time::Duration;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use leavedesk::inbound::http::health::HealthState;
use leavedesk::inbound::http::session_config::{BuildMode, session_settings_from_env};
use leavedesk::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Apply migrations and open the pool when a database URL is configured.
async fn connect_database(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url.as_deref() else {
        return Ok(None);
    };
    run_migrations(url)
        .await
        .map_err(|err| std::io::Error::other(format!("database migration failed: {err}")))?;
    let config = PoolConfig::new(url)
        .with_max_size(settings.pool_size())
        .with_connection_timeout(Duration::from_secs(10));
    let pool = DbPool::new(config)
        .await
        .map_err(|err| std::io::Error::other(format!("database pool failed: {err}")))?;
    info!(pool_size = settings.pool_size(), "database ready");
    Ok(Some(pool))
}

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

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("configuration failed: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| std::io::Error::other(format!("session configuration failed: {err}")))?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
