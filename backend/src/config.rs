//! Service settings loaded via OrthoConfig.
//!
//! Values come from `BOILERPLATE_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_ENVIRONMENT;
use crate::outbound::persistence::DEFAULT_MAX_SIZE;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Configuration values for the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOILERPLATE")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Postgres connection URL; the fallback store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Environment the service runs in, consulted by the business rule.
    pub environment: Option<String>,
}

impl AppSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Socket address built from host and port.
    ///
    /// # Errors
    /// Returns [`std::net::AddrParseError`] when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host(), self.port()).parse()
    }

    /// Database URL with blank values treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE)
    }

    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }
}
