use std::sync::Arc;

use chrono::{Duration, Utc};
use models::{user::Role, validate};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;
use super::token::{self, Claims};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub password_algorithm: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, session_ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), session_ttl_hours, password_algorithm: password::ALGORITHM.into() }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    pub fn session_ttl(&self) -> Duration { Duration::hours(self.cfg.session_ttl_hours) }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use models::user::Role;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::new("secret", 12));
    /// let input = RegisterInput { email: "user@example.com".into(), name: "Test".into(), password: "Secret123".into(), role: Role::ContentManager };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, role = %input.role))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        validate::validate_email(&input.email)?;
        models::user::validate_name(&input.name)?;
        password::check_strength(&input.password)?;
        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let hash = password::hash_password(&input.password)?;
        let user = self.repo.create_user(&input.email, &input.name, input.role).await?;
        self.repo.upsert_password(user.id, hash, self.cfg.password_algorithm.clone()).await?;
        info!(user_id = %user.id, email = %user.email, role = %user.role, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a session token.
    ///
    /// Unknown email, missing credentials and wrong password all return
    /// `AuthError::InvalidCredentials`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use models::user::Role;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig::new("secret", 12));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), name: "N".into(), password: "Passw0rd".into(), role: Role::Admin }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let Some(user) = self.repo.find_user_by_email(&input.email).await? else {
            password::dummy_verify(&input.password);
            warn!("login_failed");
            return Err(AuthError::InvalidCredentials);
        };

        let Some(cred) = self.repo.get_credentials(user.id).await? else {
            password::dummy_verify(&input.password);
            warn!(user_id = %user.id, "login_failed: no credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(&input.password, &cred.password_hash)? {
            warn!(user_id = %user.id, "login_failed");
            return Err(AuthError::InvalidCredentials);
        }

        let issued_at = Utc::now();
        let claims = Claims::new(&user, issued_at, self.session_ttl());
        let token = token::issue(&claims, &self.cfg.jwt_secret)?;
        info!(user_id = %user.id, role = %user.role, "login_succeeded");
        Ok(AuthSession { user, token, expires_at: issued_at + self.session_ttl() })
    }

    /// Resolve a session token to the user it was issued for.
    pub fn verify_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        token::verify(token, &self.cfg.jwt_secret).map(|c| c.user())
    }

    /// Replace a user's password.
    #[instrument(skip(self, new_password))]
    pub async fn set_password(&self, user_id: Uuid, new_password: &str) -> Result<(), AuthError> {
        password::check_strength(new_password)?;
        let hash = password::hash_password(new_password)?;
        self.repo.upsert_password(user_id, hash, self.cfg.password_algorithm.clone()).await?;
        info!(%user_id, "password_changed");
        Ok(())
    }

    /// Create the configured first administrator unless that email already
    /// exists. Returns the user when one was created.
    #[instrument(skip(self, password, name))]
    pub async fn bootstrap_admin(&self, email: &str, password: &str, name: &str) -> Result<Option<AuthUser>, AuthError> {
        if self.repo.find_user_by_email(email).await?.is_some() {
            debug!("bootstrap admin already present");
            return Ok(None);
        }
        let input = RegisterInput { email: email.to_string(), name: name.to_string(), password: password.to_string(), role: Role::Admin };
        self.register(input).await.map(Some)
    }
}
