//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use unbothered_backend::domain::DEFAULT_GENERATION_TIMEOUT;
use unbothered_backend::outbound::ollama::OllamaSettings;
use unbothered_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) ollama: OllamaSettings,
    pub(crate) generation_timeout: Duration,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, ollama: OllamaSettings) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            ollama,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one, entries are kept in process memory and lost on restart.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Bound each generation call, including the time spent reading the
    /// reply.
    #[must_use]
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }
}
