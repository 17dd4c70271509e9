//! Backend entry-point: loads settings, prepares storage, and serves the
//! journal API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use unbothered_backend::inbound::http::health::HealthState;
use unbothered_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use unbothered_backend::settings::AppSettings;

async fn connect_store(database_url: &str, max_connections: u32) -> io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(io::Error::other)?;
    info!(applied, "database migrations applied");

    DbPool::new(PoolConfig::new(database_url).with_max_size(max_connections))
        .await
        .map_err(io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| io::Error::other(format!("configuration load failed: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let ollama = settings.ollama().map_err(io::Error::other)?;

    let generation_timeout = settings.generation_timeout().map_err(io::Error::other)?;

    let mut config =
        ServerConfig::new(bind_addr, ollama).with_generation_timeout(generation_timeout);
    if let Some(database_url) = settings.database_url() {
        let pool = connect_store(database_url, settings.db_max_connections()).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "journal API listening");
    server.await
}
