//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use boilerplate::domain::DEFAULT_ENVIRONMENT;
use boilerplate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) environment: String,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            environment: DEFAULT_ENVIRONMENT.to_owned(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the health endpoints report the fallback snapshot.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Set the environment the service believes it runs in.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }
}
