//! Builders wiring the restaurant store and caches into HTTP state.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::RestaurantService;
use crate::domain::ports::RestaurantRepository;
use crate::inbound::http::state::HttpState;
use crate::outbound::cache::{MokaRestaurantCache, MokaSearchCache};
use crate::outbound::persistence::{DieselRestaurantRepository, InMemoryRestaurantRepository};

use super::ServerConfig;

/// Wrap `repository` in a cached restaurant service.
pub fn service_state<R>(
    repository: Arc<R>,
    record_cache_capacity: Option<u64>,
    search_cache_capacity: Option<u64>,
) -> HttpState
where
    R: RestaurantRepository + 'static,
{
    let service = RestaurantService::new(
        repository,
        Arc::new(MokaRestaurantCache::new(record_cache_capacity)),
        Arc::new(MokaSearchCache::new(search_cache_capacity)),
    );
    HttpState::from_service(Arc::new(service))
}

/// Build HTTP state using PostgreSQL when a pool is configured, otherwise
/// the in-memory store.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    let records = config.record_cache_capacity;
    let searches = config.search_cache_capacity;
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL restaurant store");
            service_state(
                Arc::new(DieselRestaurantRepository::new(pool.clone())),
                records,
                searches,
            )
        }
        None => {
            warn!("no database configured; restaurants are kept in memory");
            service_state(
                Arc::new(InMemoryRestaurantRepository::new()),
                records,
                searches,
            )
        }
    }
}
