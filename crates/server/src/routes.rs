use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::{IntoParams, OpenApi};
use uuid::Uuid;

use crate::{auth::authenticate, openapi::ApiDoc, state::ServerState};

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod leads;
pub mod pages;
pub mod public;
pub mod services;
pub mod settings;
pub mod users;

/// `?page=&limit=&status=` on admin lists. `status=ALL` means no filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
}

/// `?id=` on collection-level deletes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    pub id: Option<Uuid>,
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public endpoints plus the session-gated
/// admin API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/debug", get(health::debug))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/services", get(public::services))
        .route("/api/contact", post(public::contact))
        .route("/api/leads", post(public::submit_lead))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Every route here needs a valid session; roles are checked per handler.
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/admin/dashboard", get(dashboard::stats))
        .route(
            "/api/admin/pages",
            get(pages::list)
                .post(pages::create)
                .put(pages::update_by_body)
                .delete(pages::delete_by_query),
        )
        .route("/api/admin/pages/:id", get(pages::get).put(pages::update).delete(pages::delete))
        .route(
            "/api/admin/services",
            get(services::list)
                .post(services::create)
                .put(services::update_by_body)
                .delete(services::delete_by_query),
        )
        .route("/api/admin/services/:id", get(services::get).put(services::update).delete(services::delete))
        .route(
            "/api/admin/leads",
            get(leads::list)
                .post(leads::create)
                .patch(leads::update_by_body)
                .delete(leads::delete_by_query),
        )
        .route("/api/admin/leads/:id", get(leads::get).patch(leads::update).delete(leads::delete))
        .route("/api/admin/users", get(users::list).post(users::create))
        .route("/api/admin/users/:id", axum::routing::patch(users::update))
        .route("/api/admin/settings", get(settings::get))
        .route("/api/admin/settings/:section", put(settings::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
