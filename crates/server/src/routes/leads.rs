use axum::{extract::State, http::StatusCode, Json};
use common::{pagination::Pagination, types::Message};
use models::{lead::{self, LeadStatus}, status};
use serde::Deserialize;
use serde_json::{json, Value};
use service::db::lead_service::{self, LeadUpdate, LeadView};
use uuid::Uuid;

use crate::{
    auth::{AdminOnly, LeadTeam, RequireRole},
    errors::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    routes::{public::IntakeForm, IdQuery, ListQuery},
    state::ServerState,
};

const ID_REQUIRED: &str = "Lead ID is required";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchLeadBody {
    pub lead_id: Option<Uuid>,
    #[serde(flatten)]
    pub changes: LeadUpdate,
}

#[utoipa::path(
    get,
    path = "/api/admin/leads",
    tag = "leads",
    params(crate::routes::ListQuery),
    responses(
        (status = 200, description = "One page of leads, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list(
    _: RequireRole<LeadTeam>,
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let filter = status::parse_filter::<LeadStatus>(q.status.as_deref())?;
    let paged = lead_service::list_leads(&state.db, Pagination::from_query(q.page, q.limit), filter)
        .await
        .map_err(ApiError::op("Failed to fetch leads"))?;
    Ok(Json(json!({"leads": paged.items, "pagination": paged.info})))
}

#[utoipa::path(
    get,
    path = "/api/admin/leads/{id}",
    tag = "leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "The lead"),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn get(
    _: RequireRole<LeadTeam>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<LeadView>, ApiError> {
    let lead = lead_service::get_lead(&state.db, id).await.map_err(ApiError::op("Failed to fetch lead"))?;
    Ok(Json(lead))
}

/// Record a lead taken over the phone or by email.
#[utoipa::path(
    post,
    path = "/api/admin/leads",
    tag = "leads",
    request_body = crate::openapi::IntakeRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn create(
    _: RequireRole<LeadTeam>,
    State(state): State<ServerState>,
    ApiJson(form): ApiJson<IntakeForm>,
) -> Result<(StatusCode, Json<lead::Model>), ApiError> {
    let created = lead_service::submit_lead(&state.db, form.into_new_lead())
        .await
        .map_err(ApiError::op("Failed to create lead"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn apply_update(
    state: &ServerState,
    id: Uuid,
    changes: LeadUpdate,
) -> Result<Json<LeadView>, ApiError> {
    let lead = lead_service::update_lead(&state.db, id, changes)
        .await
        .map_err(ApiError::op("Failed to update lead"))?;
    Ok(Json(lead))
}

/// `PATCH /api/admin/leads` with `leadId` in the body.
#[utoipa::path(
    patch,
    path = "/api/admin/leads",
    tag = "leads",
    request_body = crate::openapi::LeadPatchRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn update_by_body(
    _: RequireRole<LeadTeam>,
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<PatchLeadBody>,
) -> Result<Json<LeadView>, ApiError> {
    let id = body.lead_id.ok_or_else(|| ApiError::Validation(ID_REQUIRED.into()))?;
    apply_update(&state, id, body.changes).await
}

#[utoipa::path(
    patch,
    path = "/api/admin/leads/{id}",
    tag = "leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    request_body = crate::openapi::LeadPatchRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn update(
    _: RequireRole<LeadTeam>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<PatchLeadBody>,
) -> Result<Json<LeadView>, ApiError> {
    apply_update(&state, id, body.changes).await
}

async fn remove(state: &ServerState, id: Uuid) -> Result<Json<Message>, ApiError> {
    lead_service::delete_lead(&state.db, id)
        .await
        .map_err(ApiError::op("Failed to delete lead"))?;
    Ok(Json(Message::new("Lead deleted successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/leads",
    tag = "leads",
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
    path = "/api/admin/leads/{id}",
    tag = "leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Admins only"),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn delete(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, ApiError> {
    remove(&state, id).await
}
