use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, status::ContentStatus, timestamps, user, validate};

pub const REQUIRED_FIELDS_MSG: &str = "Title, slug, and content are required";
pub const SLUG_TAKEN_MSG: &str = "Page with this slug already exists";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "page")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub meta_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_desc: Option<String>,
    pub status: ContentStatus,
    pub author_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default)]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_desc: Option<String>,
    pub status: ContentStatus,
}

/// Whether another page already uses `slug`; `exclude` skips the page being edited.
pub async fn slug_taken(db: &DatabaseConnection, slug: &str, exclude: Option<Uuid>) -> Result<bool, ModelError> {
    let mut q = Entity::find().filter(Column::Slug.eq(slug));
    if let Some(id) = exclude {
        q = q.filter(Column::Id.ne(id));
    }
    Ok(q.one(db).await?.is_some())
}

pub async fn create(db: &DatabaseConnection, new: NewPage, author_id: Uuid) -> Result<Model, ModelError> {
    validate::require_all(&[&new.title, &new.slug, &new.content], REQUIRED_FIELDS_MSG)?;
    let slug = new.slug.trim().to_string();
    validate::validate_slug(&slug)?;
    if slug_taken(db, &slug, None).await? {
        return Err(ModelError::Conflict(SLUG_TAKEN_MSG.into()));
    }
    let now = timestamps::now();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(new.title.trim().to_string()),
        slug: Set(slug),
        content: Set(new.content),
        meta_title: Set(validate::non_empty(new.meta_title)),
        meta_desc: Set(validate::non_empty(new.meta_desc)),
        status: Set(new.status),
        author_id: Set(author_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::from_write(e, SLUG_TAKEN_MSG))
}
