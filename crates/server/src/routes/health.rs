use axum::{extract::State, Json};
use chrono::Utc;
use common::types::{presence, Health};
use serde_json::{json, Value};

use crate::state::ServerState;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service status and configuration flags")
    )
)]
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    let connected = models::db::ping(&state.db).await;
    let s = &state.settings;
    Json(Health::ok(&s.environment, connected).with_config_flags(s.database_url_set, s.jwt_secret_set))
}

#[utoipa::path(
    get,
    path = "/api/debug",
    tag = "health",
    responses((status = 200, description = "Which settings are present"))
)]
pub async fn debug(State(state): State<ServerState>) -> Json<Value> {
    let s = &state.settings;
    Json(json!({
        "message": "Debug endpoint working",
        "environment": {
            "APP_ENV": s.environment,
            "DATABASE_URL": presence(s.database_url_set, "SET", "NOT SET"),
            "JWT_SECRET": presence(s.jwt_secret_set, "SET", "NOT SET"),
            "ADMIN_EMAIL": presence(s.admin_email_set, "SET", "NOT SET"),
        },
        "timestamp": Utc::now(),
    }))
}
