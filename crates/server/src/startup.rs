use std::{io, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Where the running configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// No config file; defaults plus environment.
    Env,
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise defaults plus
/// `SERVER_HOST` / `SERVER_PORT` / `DATABASE_URL`.
///
/// Runs before logging is set up, so the caller reports the source.
pub fn load_config() -> anyhow::Result<(AppConfig, ConfigSource)> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok((cfg, ConfigSource::File)),
        Err(e) if is_missing_file(&e) => Ok((AppConfig::from_env()?, ConfigSource::Env)),
        Err(e) => Err(StartupError::InvalidConfig(e.to_string()).into()),
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .map(|io| io.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, draining connections");
}

/// Connect, migrate, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_with_config(&DatabaseConfig::from(&cfg.database))
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migration failed: {e}")))?;
        info!("migrations applied");
    }

    let app: Router = routes::build_router(AppState::from_db(db), build_cors());

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}: {e}", cfg.server.bind_addr())))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "querydesk listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
