//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `SCHEDULER_*` environment variables over an
//! optional configuration file.

use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {message}")]
    Load { message: String },
    #[error("db_max_connections must be at least 1")]
    EmptyPool,
}

/// Process-level settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SCHEDULER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string. Without it the server runs on fixture
    /// adapters that persist nothing.
    pub database_url: Option<String>,
    /// Upper bound of the connection pool.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Load settings from the process arguments and environment.
    pub fn load_validated() -> Result<Self, SettingsError> {
        let settings = Self::load().map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.db_max_connections == Some(0) {
            return Err(SettingsError::EmptyPool);
        }
        Ok(self)
    }

    /// Configured bind address, or `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Configured pool size, or 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}
