//! Restaurant search entry-point: loads settings, prepares the store and
//! serves the REST API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use restaurant_search::inbound::http::health::HealthState;
use restaurant_search::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use restaurant_search::server::{ServerConfig, create_server};
use restaurant_search::settings::ServerSettings;

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

    let settings =
        ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let config = ServerConfig::new(bind_addr).with_cache_capacities(
        settings.record_cache_capacity,
        settings.search_cache_capacity,
    );
    let config = match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let max_connections = settings
                .db_max_connections()
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_connections))
                .await
                .map_err(std::io::Error::other)?;
            config.with_db_pool(pool)
        }
        None => config,
    };

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "restaurant search listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
