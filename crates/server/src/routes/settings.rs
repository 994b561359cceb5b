use axum::{extract::State, Json};
use serde_json::Value;
use service::db::settings_service::{self, Section, SettingsView};

use crate::{
    auth::{AdminOnly, RequireRole},
    errors::ApiError,
    extract::{ApiJson, ApiPath},
    state::ServerState,
};

#[utoipa::path(
    get,
    path = "/api/admin/settings",
    tag = "settings",
    responses(
        (status = 200, description = "All sections, SMTP password redacted"),
        (status = 401, description = "Admins only")
    )
)]
pub async fn get(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
) -> Result<Json<SettingsView>, ApiError> {
    let settings = settings_service::load(&state.db).await.map_err(ApiError::op("Failed to fetch settings"))?;
    Ok(Json(settings.view()))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings/{section}",
    tag = "settings",
    params(
        ("section" = String, Path, description = "site, contact, email, notifications, security or integrations")
    ),
    responses(
        (status = 200, description = "Saved; returns all sections"),
        (status = 400, description = "Unknown section or invalid fields")
    )
)]
pub async fn update(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
    ApiPath(section): ApiPath<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<SettingsView>, ApiError> {
    let section: Section = section.parse().map_err(ApiError::op("Failed to save settings"))?;
    let view = settings_service::update_section(&state.db, section, body)
        .await
        .map_err(ApiError::op("Failed to save settings"))?;
    Ok(Json(view))
}
