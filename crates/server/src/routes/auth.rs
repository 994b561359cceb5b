use axum::{extract::State, http::StatusCode, Json};
use common::types::Message;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use service::auth::domain::LoginInput;
use tracing::info;

use crate::{
    auth::{AnySession, RequireRole, SESSION_COOKIE},
    errors::ApiError,
    extract::ApiJson,
    state::ServerState,
};

fn session_cookie(token: String, state: &ServerState) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.settings.cookie_secure);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Session issued"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let session = state
        .auth
        .login(input)
        .await
        .map_err(|e| ApiError::from_auth(e, "Login failed"))?;
    let jar = jar.add(session_cookie(session.token.clone(), &state));
    Ok((jar, Json(json!({"user": session.user, "token": session.token, "expiresAt": session.expires_at}))))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses((status = 200, description = "Session cookie cleared"))
)]
pub async fn logout(jar: CookieJar) -> (StatusCode, CookieJar, Json<Message>) {
    // Always emitted, even when the request carried no cookie.
    let mut expired = Cookie::build((SESSION_COOKIE, "")).path("/").http_only(true).build();
    expired.make_removal();
    let jar = jar.add(expired);
    info!("logout");
    (StatusCode::OK, jar, Json(Message::new("Logged out")))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current session user"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(session: RequireRole<AnySession>) -> Json<Value> {
    Json(json!({"user": session.user}))
}
