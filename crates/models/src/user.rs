use std::{fmt, str::FromStr};

use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, timestamps, validate};

/// Back-office role. Which admin operations a session may perform is
/// decided by membership in one of the role sets below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "CONTENT_MANAGER")]
    ContentManager,
    #[sea_orm(string_value = "MARKETING_MANAGER")]
    MarketingManager,
    #[sea_orm(string_value = "SUPPORT_STAFF")]
    SupportStaff,
    #[default]
    #[sea_orm(string_value = "USER")]
    User,
}

impl Role {
    /// Pages, services, dashboard.
    pub const CONTENT_TEAM: &'static [Role] = &[Role::Admin, Role::ContentManager];
    /// Reading and editing leads.
    pub const LEAD_TEAM: &'static [Role] = &[Role::Admin, Role::ContentManager, Role::MarketingManager];
    /// Deletes, settings, user administration.
    pub const ADMIN_ONLY: &'static [Role] = &[Role::Admin];

    pub fn is_one_of(self, allowed: &[Role]) -> bool {
        allowed.contains(&self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::ContentManager => "CONTENT_MANAGER",
            Self::MarketingManager => "MARKETING_MANAGER",
            Self::SupportStaff => "SUPPORT_STAFF",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "CONTENT_MANAGER" => Ok(Self::ContentManager),
            "MARKETING_MANAGER" => Ok(Self::MarketingManager),
            "SUPPORT_STAFF" => Ok(Self::SupportStaff),
            "USER" => Ok(Self::User),
            other => Err(ModelError::Validation(format!("unknown role: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// `{ id, name, email }` attached to pages (author) and leads (assignee).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Model> for UserSummary {
    fn from(m: Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email }
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if validate::is_blank(name) { return Err(ModelError::Validation("name required".into())); }
    if name.len() > 128 { return Err(ModelError::Validation("name too long".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, email: &str, name: &str, role: Role) -> Result<Model, ModelError> {
    validate::validate_email(email)?;
    validate_name(name)?;
    let now = timestamps::now();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.trim().to_lowercase()),
        name: Set(name.trim().to_string()),
        role: Set(role),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::from_write(e, "user already exists"))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::CreatedAt).all(db).await?)
}

