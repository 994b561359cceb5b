use axum::{extract::State, Json};
use serde_json::{json, Value};
use service::db::dashboard_service;

use crate::{auth::{ContentTeam, RequireRole}, errors::ApiError, state::ServerState};

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Headline counts"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn stats(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
) -> Result<Json<Value>, ApiError> {
    let stats = dashboard_service::stats(&state.db)
        .await
        .map_err(ApiError::op("Failed to fetch dashboard stats"))?;
    Ok(Json(json!({"stats": stats})))
}
