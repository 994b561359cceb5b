//! OpenAPI document for the HTTP surface, served at `/api-docs/openapi.json`.
//!
//! Request bodies are described with small doc-only structs so the wire
//! types stay free of schema derives.

use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PageRequest {
    /// Required on `PUT /api/admin/pages`.
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_desc: Option<String>,
    /// DRAFT, PUBLISHED or ARCHIVED.
    pub status: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PricingDoc {
    pub amount: f64,
    pub currency: String,
    pub billing_type: String,
}

#[derive(ToSchema)]
pub struct ServiceRequest {
    /// Required on `PUT /api/admin/services`.
    pub id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub features: Vec<String>,
    pub pricing: Option<PricingDoc>,
    pub image: Option<String>,
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct IntakeRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: String,
    pub message: String,
    pub source: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LeadPatchRequest {
    /// Required on `PATCH /api/admin/leads`.
    pub lead_id: Option<Uuid>,
    /// NEW, CONTACTED, QUALIFIED, CONVERTED or CLOSED.
    pub status: Option<String>,
    /// `null` clears the assignee.
    pub assigned_to: Option<Uuid>,
}

#[derive(ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::health::debug,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::public::services,
        crate::routes::public::contact,
        crate::routes::public::submit_lead,
        crate::routes::dashboard::stats,
        crate::routes::pages::list,
        crate::routes::pages::get,
        crate::routes::pages::create,
        crate::routes::pages::update_by_body,
        crate::routes::pages::update,
        crate::routes::pages::delete_by_query,
        crate::routes::pages::delete,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::services::update_by_body,
        crate::routes::services::update,
        crate::routes::services::delete_by_query,
        crate::routes::services::delete,
        crate::routes::leads::list,
        crate::routes::leads::get,
        crate::routes::leads::create,
        crate::routes::leads::update_by_body,
        crate::routes::leads::update,
        crate::routes::leads::delete_by_query,
        crate::routes::leads::delete,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::settings::get,
        crate::routes::settings::update,
    ),
    components(
        schemas(
            LoginRequest,
            PageRequest,
            PricingDoc,
            ServiceRequest,
            IntakeRequest,
            LeadPatchRequest,
            CreateUserRequest,
            UpdateUserRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "public"),
        (name = "dashboard"),
        (name = "pages"),
        (name = "services"),
        (name = "leads"),
        (name = "users"),
        (name = "settings")
    )
)]
pub struct ApiDoc;
