//! HTTP server configuration object and helpers.

use std::net::{Ipv4Addr, SocketAddr};

use contacts_backend::outbound::persistence::DbPool;

use super::settings::AppSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) settings: AppSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Listen on every interface at the configured port.
    #[must_use]
    pub fn new(settings: AppSettings) -> Self {
        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port));
        Self {
            settings,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool. Without one the server stores
    /// everything in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
