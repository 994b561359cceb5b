//! Admin management of the service catalogue.

use axum::{extract::State, http::StatusCode, Json};
use common::{pagination::Pagination, types::Message};
use models::{offering::{self, Features, NewOffering, Pricing}, status::{self, ContentStatus}};
use serde::Deserialize;
use serde_json::{json, Value};
use service::db::offering_service::{self, OfferingUpdate};
use uuid::Uuid;

use crate::{
    auth::{AdminOnly, ContentTeam, RequireRole},
    errors::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    routes::{IdQuery, ListQuery},
    state::ServerState,
};

const ID_REQUIRED: &str = "Service ID is required";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateService {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub features: Option<Features>,
    pub pricing: Option<Pricing>,
    pub image: Option<String>,
    pub status: Option<ContentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateServiceBody {
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub changes: OfferingUpdate,
}

#[utoipa::path(
    get,
    path = "/api/admin/services",
    tag = "services",
    params(crate::routes::ListQuery),
    responses(
        (status = 200, description = "One page of services"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let filter = status::parse_filter::<ContentStatus>(q.status.as_deref())?;
    let paged = offering_service::list_offerings(&state.db, Pagination::from_query(q.page, q.limit), filter)
        .await
        .map_err(ApiError::op("Failed to fetch services"))?;
    Ok(Json(json!({"services": paged.items, "pagination": paged.info})))
}

#[utoipa::path(
    get,
    path = "/api/admin/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 200, description = "The service"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<offering::Model>, ApiError> {
    let svc = offering_service::get_offering(&state.db, id).await.map_err(ApiError::op("Failed to fetch service"))?;
    Ok(Json(svc))
}

#[utoipa::path(
    post,
    path = "/api/admin/services",
    tag = "services",
    request_body = crate::openapi::ServiceRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing fields or duplicate slug")
    )
)]
pub async fn create(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<CreateService>,
) -> Result<(StatusCode, Json<offering::Model>), ApiError> {
    let input = NewOffering {
        name: body.name,
        slug: body.slug,
        description: body.description,
        features: body.features.unwrap_or_default(),
        pricing: body.pricing.unwrap_or_default(),
        image: body.image,
        status: body.status.unwrap_or_default(),
    };
    let created = offering_service::create_offering(&state.db, input)
        .await
        .map_err(ApiError::op("Failed to create service"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn apply_update(
    state: &ServerState,
    id: Uuid,
    changes: OfferingUpdate,
) -> Result<Json<offering::Model>, ApiError> {
    let updated = offering_service::update_offering(&state.db, id, changes)
        .await
        .map_err(ApiError::op("Failed to update service"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    put,
    path = "/api/admin/services",
    tag = "services",
    request_body = crate::openapi::ServiceRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update_by_body(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<UpdateServiceBody>,
) -> Result<Json<offering::Model>, ApiError> {
    let id = body.id.ok_or_else(|| ApiError::Validation(ID_REQUIRED.into()))?;
    apply_update(&state, id, body.changes).await
}

#[utoipa::path(
    put,
    path = "/api/admin/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service id")),
    request_body = crate::openapi::ServiceRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateServiceBody>,
) -> Result<Json<offering::Model>, ApiError> {
    apply_update(&state, id, body.changes).await
}

async fn remove(state: &ServerState, id: Uuid) -> Result<Json<Message>, ApiError> {
    offering_service::delete_offering(&state.db, id)
        .await
        .map_err(ApiError::op("Failed to delete service"))?;
    Ok(Json(Message::new("Service deleted successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/services",
    tag = "services",
    params(crate::routes::IdQuery),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Admins only")
    )
)]
pub async fn delete_by_query(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<IdQuery>,
) -> Result<Json<Message>, ApiError> {
    let id = q.id.ok_or_else(|| ApiError::Validation(ID_REQUIRED.into()))?;
    remove(&state, id).await
}

#[utoipa::path(
    delete,
    path = "/api/admin/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Admins only"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn delete(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, ApiError> {
    remove(&state, id).await
}
