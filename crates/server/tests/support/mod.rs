#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use configs::{AppConfig, DatabaseConfig};
use models::user::Role;
use serde_json::Value;
use server::{startup, state::ServerState};
use service::auth::domain::RegisterInput;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@eagleminds.test";
pub const ADMIN_PASSWORD: &str = "admin-pass-123";
pub const STAFF_PASSWORD: &str = "staff-pass-123";

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig::in_memory();
    cfg.auth.jwt_secret = "test-secret".into();
    cfg.auth.bootstrap_admin_email = Some(ADMIN_EMAIL.into());
    cfg.auth.bootstrap_admin_password = Some(ADMIN_PASSWORD.into());
    cfg
}

/// Fresh in-memory database with the bootstrap admin in place.
pub async fn test_state() -> ServerState {
    startup::prepare(&test_config()).await.expect("prepare state")
}

pub async fn test_app() -> (Router, ServerState) {
    let state = test_state().await;
    (startup::build_app(state.clone()), state)
}

pub async fn add_staff(state: &ServerState, email: &str, role: Role) {
    state
        .auth
        .register(RegisterInput { email: email.into(), name: "Staff".into(), password: STAFF_PASSWORD.into(), role })
        .await
        .expect("register staff");
}

pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, json) = send_raw(app, method, uri, token, body).await;
    (status, json)
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&b).expect("encode body"))),
        None => req.body(Body::empty()),
    }
    .expect("build request");
    let resp = app.clone().oneshot(req).await.expect("call app");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("read body");
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, headers, json)
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(app, "POST", "/api/auth/login", None, Some(serde_json::json!({"email": email, "password": password}))).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token").to_string()
}
