use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{auth::errors::AuthError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// Every failure a handler can return; rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    /// Duplicate slug or email. Reported as 400 like other bad input.
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    /// Details are logged, the client only sees the operation that failed.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".into())
    }

    /// Map a service failure, hiding storage details behind `failed`
    /// (e.g. "Failed to create page").
    pub fn from_service(err: ServiceError, failed: &'static str) -> Self {
        match err {
            ServiceError::Validation(m) => Self::Validation(m),
            ServiceError::Conflict(m) => Self::Conflict(m),
            ServiceError::NotFound(m) => Self::NotFound(m),
            ServiceError::Auth(e) => Self::from_auth(e, failed),
            ServiceError::Db(detail) => {
                error!(error = %detail, operation = failed, "database failure");
                Self::Internal(failed)
            }
        }
    }

    pub fn from_auth(err: AuthError, failed: &'static str) -> Self {
        match err {
            AuthError::Validation(m) => Self::Validation(m),
            AuthError::Conflict => Self::Conflict(err.to_string()),
            AuthError::NotFound => Self::NotFound(err.to_string()),
            AuthError::InvalidCredentials | AuthError::Unauthorized => Self::Unauthorized(err.to_string()),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                error!(error = %err, code = err.code(), operation = failed, "auth failure");
                Self::Internal(failed)
            }
        }
    }

    /// Closure form for `map_err`.
    pub fn op(failed: &'static str) -> impl Fn(ServiceError) -> ApiError {
        move |e| ApiError::from_service(e, failed)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<models::errors::ModelError> for ApiError {
    fn from(err: models::errors::ModelError) -> Self {
        ApiError::from_service(err.into(), "Request failed")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("bootstrap admin failed: {0}")]
    Bootstrap(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(ApiError::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Conflict("dup".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        let internal = ApiError::from_service(ServiceError::Db("connection reset".into()), "Failed to fetch pages");
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.to_string(), "Failed to fetch pages");
    }

    #[test]
    fn bad_credentials_are_unauthorized() {
        let e = ApiError::from_auth(AuthError::InvalidCredentials, "Login failed");
        assert_eq!(e.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(e.to_string(), "Invalid email or password");
    }
}
