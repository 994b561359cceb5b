//! Back-office user administration. Users are never deleted.

use uuid::Uuid;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use tracing::{info, instrument};

use models::{timestamps, user::{self, Role}};
use crate::{
    auth::{domain::RegisterInput, password, repository::AuthRepository, AuthService},
    errors::ServiceError,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
}

/// List users, oldest first. Credentials live in their own table and are
/// never part of this.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    Ok(user::list(db).await?)
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))
}

/// Create a user with a password.
pub async fn create_user<R: AuthRepository>(db: &DatabaseConnection, auth: &AuthService<R>, input: RegisterInput) -> Result<user::Model, ServiceError> {
    let created = auth.register(input).await?;
    get_user(db, created.id).await
}

/// Change name, role and/or password.
#[instrument(skip(db, auth, changes))]
pub async fn update_user<R: AuthRepository>(
    db: &DatabaseConnection,
    auth: &AuthService<R>,
    id: Uuid,
    changes: UserUpdate,
) -> Result<user::Model, ServiceError> {
    let existing = get_user(db, id).await?;
    if let Some(pw) = &changes.password {
        password::check_strength(pw)?;
    }

    let updated = if changes.name.is_some() || changes.role.is_some() {
        let prev_updated = existing.updated_at;
        let mut am: user::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            user::validate_name(&name)?;
            am.name = Set(name.trim().to_string());
        }
        if let Some(role) = changes.role {
            am.role = Set(role);
        }
        am.updated_at = Set(timestamps::after(&prev_updated));
        am.update(db).await?
    } else {
        existing
    };

    if let Some(pw) = changes.password {
        auth.set_password(id, &pw).await?;
    }
    info!(user_id = %id, role = %updated.role, "user_updated");
    Ok(updated)
}
