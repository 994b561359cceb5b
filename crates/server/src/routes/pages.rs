use axum::{extract::State, http::StatusCode, Json};
use common::{pagination::Pagination, types::Message};
use models::{page::NewPage, status::{self, ContentStatus}};
use serde::Deserialize;
use serde_json::{json, Value};
use service::db::page_service::{self, PageUpdate, PageView};
use uuid::Uuid;

use crate::{
    auth::{AdminOnly, ContentTeam, RequireRole},
    errors::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    routes::{IdQuery, ListQuery},
    state::ServerState,
};

const ID_REQUIRED: &str = "Page ID is required";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePage {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_desc: Option<String>,
    pub status: Option<ContentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePageBody {
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub changes: PageUpdate,
}

#[utoipa::path(
    get,
    path = "/api/admin/pages",
    tag = "pages",
    params(crate::routes::ListQuery),
    responses(
        (status = 200, description = "One page of pages"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let filter = status::parse_filter::<ContentStatus>(q.status.as_deref())?;
    let paged = page_service::list_pages(&state.db, Pagination::from_query(q.page, q.limit), filter)
        .await
        .map_err(ApiError::op("Failed to fetch pages"))?;
    Ok(Json(json!({"pages": paged.items, "pagination": paged.info})))
}

#[utoipa::path(
    get,
    path = "/api/admin/pages/{id}",
    tag = "pages",
    params(("id" = Uuid, Path, description = "Page id")),
    responses(
        (status = 200, description = "The page"),
        (status = 404, description = "Page not found")
    )
)]
pub async fn get(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<PageView>, ApiError> {
    let page = page_service::get_page(&state.db, id).await.map_err(ApiError::op("Failed to fetch page"))?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/admin/pages",
    tag = "pages",
    request_body = crate::openapi::PageRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing fields or duplicate slug")
    )
)]
pub async fn create(
    session: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<CreatePage>,
) -> Result<(StatusCode, Json<PageView>), ApiError> {
    let input = NewPage {
        title: body.title,
        slug: body.slug,
        content: body.content,
        meta_title: body.meta_title,
        meta_desc: body.meta_desc,
        status: body.status.unwrap_or_default(),
    };
    let page = page_service::create_page(&state.db, input, session.user.id)
        .await
        .map_err(ApiError::op("Failed to create page"))?;
    Ok((StatusCode::CREATED, Json(page)))
}

async fn apply_update(
    state: &ServerState,
    id: Uuid,
    changes: PageUpdate,
) -> Result<Json<PageView>, ApiError> {
    let page = page_service::update_page(&state.db, id, changes)
        .await
        .map_err(ApiError::op("Failed to update page"))?;
    Ok(Json(page))
}

/// `PUT /api/admin/pages` with the id in the body.
#[utoipa::path(
    put,
    path = "/api/admin/pages",
    tag = "pages",
    request_body = crate::openapi::PageRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Page not found")
    )
)]
pub async fn update_by_body(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<UpdatePageBody>,
) -> Result<Json<PageView>, ApiError> {
    let id = body.id.ok_or_else(|| ApiError::Validation(ID_REQUIRED.into()))?;
    apply_update(&state, id, body.changes).await
}

#[utoipa::path(
    put,
    path = "/api/admin/pages/{id}",
    tag = "pages",
    params(("id" = Uuid, Path, description = "Page id")),
    request_body = crate::openapi::PageRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Page not found")
    )
)]
pub async fn update(
    _: RequireRole<ContentTeam>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdatePageBody>,
) -> Result<Json<PageView>, ApiError> {
    apply_update(&state, id, body.changes).await
}

async fn remove(state: &ServerState, id: Uuid) -> Result<Json<Message>, ApiError> {
    page_service::delete_page(&state.db, id)
        .await
        .map_err(ApiError::op("Failed to delete page"))?;
    Ok(Json(Message::new("Page deleted successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/pages",
    tag = "pages",
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
    path = "/api/admin/pages/{id}",
    tag = "pages",
    params(("id" = Uuid, Path, description = "Page id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Admins only"),
        (status = 404, description = "Page not found")
    )
)]
pub async fn delete(
    _: RequireRole<AdminOnly>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, ApiError> {
    remove(&state, id).await
}
