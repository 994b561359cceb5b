use axum::{extract::State, http::StatusCode, Json};
use models::user::{self, Role};
use serde::Deserialize;
use serde_json::{json, Value};
use service::{auth::domain::RegisterInput, user_service::{self, UserUpdate}};
use uuid::Uuid;

use crate::{
    auth::{AdminOnly, RequireRole},
    errors::ApiError,
    extract::{ApiJson, ApiPath},
    state::ServerState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "users",
    responses(
        (status = 200, description = "All back-office users"),
        (status = 401, description = "Admins only")
    )
)]
pub async fn list(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
) -> Result<Json<Value>, ApiError> {
    let users = user_service::list_users(&state.db).await.map_err(ApiError::op("Failed to fetch users"))?;
    Ok(Json(json!({"users": users})))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid input or email taken")
    )
)]
pub async fn create(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<CreateUser>,
) -> Result<(StatusCode, Json<user::Model>), ApiError> {
    let input = RegisterInput { email: body.email, name: body.name, password: body.password, role: body.role };
    let created = user_service::create_user(&state.db, state.auth.as_ref(), input)
        .await
        .map_err(ApiError::op("Failed to create user"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = crate::openapi::UpdateUserRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(changes): ApiJson<UserUpdate>,
) -> Result<Json<user::Model>, ApiError> {
    let updated = user_service::update_user(&state.db, state.auth.as_ref(), id, changes)
        .await
        .map_err(ApiError::op("Failed to update user"))?;
    Ok(Json(updated))
}
