//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) record_cache_capacity: Option<u64>,
    pub(crate) search_cache_capacity: Option<u64>,
}

impl ServerConfig {
    /// Configuration with the in-memory store and unbounded caches.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            record_cache_capacity: None,
            search_cache_capacity: None,
        }
    }

    /// Back the restaurant store with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Bound the by-id and search caches by entry count.
    #[must_use]
    pub fn with_cache_capacities(mut self, records: Option<u64>, searches: Option<u64>) -> Self {
        self.record_cache_capacity = records;
        self.search_cache_capacity = searches;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
