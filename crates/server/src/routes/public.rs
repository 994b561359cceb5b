//! Unauthenticated catalogue and intake endpoints.

use axum::{extract::State, http::StatusCode, Json};
use models::lead::NewLead;
use serde::Deserialize;
use serde_json::{json, Value};
use service::db::{lead_service, offering_service};

use crate::{errors::ApiError, extract::ApiJson, state::ServerState};

/// Contact and service-request form body. Missing fields are caught by
/// lead validation so the client gets one readable message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: String,
    pub message: String,
    pub source: Option<String>,
}

impl IntakeForm {
    pub fn into_new_lead(self) -> NewLead {
        NewLead {
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            service: self.service,
            message: self.message,
            source: self.source,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/services",
    tag = "public",
    responses((status = 200, description = "Published services"))
)]
pub async fn services(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let services = offering_service::list_published(&state.db)
        .await
        .map_err(ApiError::op("Failed to fetch services"))?;
    Ok(Json(json!({"services": services})))
}

async fn intake(state: &ServerState, lead: NewLead) -> Result<(StatusCode, Json<Value>), ApiError> {
    let lead = lead_service::submit_lead(&state.db, lead)
        .await
        .map_err(ApiError::op("Failed to submit inquiry"))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Thank you! We'll get back to you within 24 hours.", "lead": lead})),
    ))
}

/// Contact page form; always recorded with the default source.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "public",
    request_body = crate::openapi::IntakeRequest,
    responses(
        (status = 201, description = "Lead recorded"),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn contact(
    State(state): State<ServerState>,
    ApiJson(form): ApiJson<IntakeForm>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let lead = NewLead { source: None, ..form.into_new_lead() };
    intake(&state, lead).await
}

/// Service request form; may name its own `source`.
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "public",
    request_body = crate::openapi::IntakeRequest,
    responses(
        (status = 201, description = "Lead recorded"),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn submit_lead(
    State(state): State<ServerState>,
    ApiJson(form): ApiJson<IntakeForm>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    intake(&state, form.into_new_lead()).await
}
