use std::sync::Arc;

use configs::AppConfig;
use sea_orm::DatabaseConnection;
use service::auth::{repo::SeaOrmAuthRepository, service::AuthConfig, AuthService};

/// Facts about the running configuration that handlers report or act on.
#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub environment: String,
    pub cookie_secure: bool,
    pub database_url_set: bool,
    pub jwt_secret_set: bool,
    pub admin_email_set: bool,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub settings: ServerSettings,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let auth = AuthService::new(repo, AuthConfig::new(cfg.auth.jwt_secret.clone(), cfg.auth.session_ttl_hours));
        Self {
            db,
            auth: Arc::new(auth),
            settings: ServerSettings {
                environment: cfg.server.environment.clone(),
                cookie_secure: cfg.auth.cookie_secure,
                database_url_set: !cfg.database.url.trim().is_empty(),
                jwt_secret_set: cfg.auth.has_custom_secret(),
                admin_email_set: cfg.auth.bootstrap_admin_email.is_some(),
            },
        }
    }
}
