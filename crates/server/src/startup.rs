use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router with the standard CORS policy, as served by [`run`].
pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Create the configured admin account if it does not exist yet.
async fn bootstrap_admin(state: &ServerState, cfg: &AppConfig) -> Result<(), StartupError> {
    let auth_cfg = &cfg.auth;
    let (Some(email), Some(password)) = (&auth_cfg.bootstrap_admin_email, &auth_cfg.bootstrap_admin_password) else {
        if auth_cfg.bootstrap_admin_email.is_some() {
            warn!("ADMIN_EMAIL set without ADMIN_PASSWORD; skipping admin bootstrap");
        }
        return Ok(());
    };
    match state.auth.bootstrap_admin(email, password, &auth_cfg.bootstrap_admin_name).await {
        Ok(Some(user)) => info!(user_id = %user.id, email = %user.email, "bootstrap admin created"),
        Ok(None) => info!(email = %email, "bootstrap admin already present"),
        Err(e) => return Err(StartupError::Bootstrap(e.to_string())),
    }
    Ok(())
}

/// Connect, migrate and bootstrap; returns the state handlers run against.
pub async fn prepare(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db: DatabaseConnection = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migration failed: {e}")))?;
        info!("migrations applied");
    }
    let state = ServerState::new(db, cfg);
    bootstrap_admin(&state, cfg).await?;
    Ok(state)
}

/// Public entry: load configuration, build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = prepare(&cfg).await?;
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    info!(%addr, environment = %cfg.server.environment, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
