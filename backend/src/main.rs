//! DevHunt backend entry-point: loads settings, prepares persistence and runs
//! the HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use devhunt::inbound::http::health::HealthState;
use devhunt::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, create_server, load_session_key};

fn io_error(context: &str, error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {error}"))
}

async fn connect_database(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url() else {
        warn!("DEVHUNT_DATABASE_URL not set; running without persistence");
        return Ok(None);
    };

    if settings.run_migrations() {
        let applied = run_pending_migrations(url)
            .await
            .map_err(|e| io_error("database migrations failed", e))?;
        info!(applied, "database schema up to date");
    }

    let config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config)
        .await
        .map_err(|e| io_error("database pool setup failed", e))?;
    Ok(Some(pool))
}

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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io_error("failed to load settings", e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io_error("invalid settings", e))?;
    let key = load_session_key(&settings.session_key_file(), settings.allow_ephemeral_key())
        .map_err(|e| io_error("session key unavailable", e))?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), bind_addr)
        .with_fallback(settings.fallback_enabled())
        .with_demo_login(settings.demo_login_enabled());
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }
    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(server::build_prometheus(settings.metrics_enabled())?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await
}
