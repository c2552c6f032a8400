//! Backend entry-point: loads settings, wires REST endpoints and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use boilerplate::config::AppSettings;
use boilerplate::inbound::http::health::HealthState;
use boilerplate::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, create_server};

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
        AppSettings::load_from_iter(std::env::args_os()).map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid bind address {}:{}: {e}", settings.host(), settings.port()),
        )
    })?;

    let mut config = ServerConfig::new(bind_addr).with_environment(settings.environment());
    match settings.database_url() {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => info!("BOILERPLATE_DATABASE_URL not set; application details use the fallback"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
