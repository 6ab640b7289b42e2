//! HTTP server configuration: layered settings and the built server config.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use leavedesk::inbound::http::session_config::SessionSettings;
use leavedesk::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Start-up settings layered from defaults, files, `LEAVEDESK_*` environment
/// variables, and CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEAVEDESK")]
pub struct AppSettings {
    /// Socket address to listen on, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps state in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_size: u32,
}

impl AppSettings {
    /// Resolve the listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`std::io::ErrorKind::InvalidInput`] when the configured value
    /// is not a socket address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid LEAVEDESK_BIND_ADDR `{raw}`: {err}"),
            )
        })
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Combine validated session settings with the listen address.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool so the Diesel adapters are used
    /// instead of the in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
