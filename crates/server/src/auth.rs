//! Session authentication and role gating.
//!
//! `authenticate` runs in front of every protected route: it reads the
//! session token from `Authorization: Bearer ...` or the `auth_token`
//! cookie, verifies it, and stores the [`SessionUser`] in the request
//! extensions. Handlers then declare the roles they accept with a
//! [`RequireRole`] argument.

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use models::user::Role;
use service::auth::domain::AuthUser;
use tracing::{debug, warn};

use crate::{errors::ApiError, state::ServerState};

pub const SESSION_COOKIE: &str = "auth_token";

/// The verified user behind the current request.
#[derive(Clone, Debug)]
pub struct SessionUser(pub AuthUser);

fn bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn cookie_token(req: &Request) -> Option<String> {
    CookieJar::from_headers(req.headers())
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = bearer_token(&req).or_else(|| cookie_token(&req)) else {
        debug!(%path, "no session token");
        return Err(ApiError::unauthorized());
    };
    let user = state.auth.verify_token(&token).map_err(|e| {
        warn!(%path, error = %e, "session rejected");
        ApiError::unauthorized()
    })?;
    req.extensions_mut().insert(SessionUser(user));
    Ok(next.run(req).await)
}

/// A set of roles allowed through a [`RequireRole`] guard.
pub trait RolePolicy: Send + Sync + 'static {
    fn allows(role: Role) -> bool;
}

/// Pages, services, dashboard.
pub struct ContentTeam;
/// Lead reading and editing.
pub struct LeadTeam;
/// Deletes, settings, user administration.
pub struct AdminOnly;
/// Any signed-in user.
pub struct AnySession;

impl RolePolicy for ContentTeam {
    fn allows(role: Role) -> bool {
        role.is_one_of(Role::CONTENT_TEAM)
    }
}

impl RolePolicy for LeadTeam {
    fn allows(role: Role) -> bool {
        role.is_one_of(Role::LEAD_TEAM)
    }
}

impl RolePolicy for AdminOnly {
    fn allows(role: Role) -> bool {
        role.is_one_of(Role::ADMIN_ONLY)
    }
}

impl RolePolicy for AnySession {
    fn allows(_: Role) -> bool {
        true
    }
}

/// Extractor that admits the request only if the session role satisfies `P`.
pub struct RequireRole<P: RolePolicy> {
    pub user: AuthUser,
    _policy: PhantomData<fn() -> P>,
}

#[async_trait]
impl<S, P> FromRequestParts<S> for RequireRole<P>
where
    S: Send + Sync,
    P: RolePolicy,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(SessionUser(user)) = parts.extensions.get::<SessionUser>().cloned() else {
            return Err(ApiError::unauthorized());
        };
        if !P::allows(user.role) {
            warn!(user_id = %user.id, role = %user.role, path = %parts.uri.path(), "role not permitted");
            return Err(ApiError::unauthorized());
        }
        Ok(Self { user, _policy: PhantomData })
    }
}
