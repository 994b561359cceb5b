//! One JSON document per settings section, keyed by section name.

use sea_orm::{entity::prelude::*, sea_query::OnConflict, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, timestamps};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "setting")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub value: Json,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find(db: &DatabaseConnection, key: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(key.to_string()).one(db).await?)
}

pub async fn all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().all(db).await?)
}

/// Insert or replace the document stored under `key`.
pub async fn upsert(db: &DatabaseConnection, key: &str, value: Json) -> Result<Model, ModelError> {
    if key.trim().is_empty() {
        return Err(ModelError::Validation("setting key required".into()));
    }
    let am = ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
        updated_at: Set(timestamps::now()),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_columns([Column::Value, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;
    find(db, key)
        .await?
        .ok_or_else(|| ModelError::Db(format!("setting {key} missing after upsert")))
}
