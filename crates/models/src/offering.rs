//! The agency's service catalogue (`service` table).
//!
//! Named `offering` in Rust to keep it apart from the service layer crate.

use sea_orm::{entity::prelude::*, FromJsonQueryResult, Set, DatabaseConnection};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, status::ContentStatus, timestamps, validate};

pub const REQUIRED_FIELDS_MSG: &str = "Name, slug, and description are required";
pub const SLUG_TAKEN_MSG: &str = "Service with this slug already exists";

/// Ordered feature bullet list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Features(pub Vec<String>);

impl Features {
    /// Drop blank entries, keep order.
    pub fn cleaned(self) -> Self {
        Self(self.0.into_iter().map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default, alias = "startingPrice", alias = "price")]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_billing_type")]
    pub billing_type: String,
}

fn default_currency() -> String { "USD".into() }
fn default_billing_type() -> String { "one-time".into() }

impl Default for Pricing {
    fn default() -> Self {
        Self { amount: 0.0, currency: default_currency(), billing_type: default_billing_type() }
    }
}

impl Pricing {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ModelError::Validation("Pricing amount must be a non-negative number".into()));
        }
        if validate::is_blank(&self.currency) {
            return Err(ModelError::Validation("Pricing currency required".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub features: Features,
    #[sea_orm(column_type = "JsonBinary")]
    pub pricing: Pricing,
    pub image: Option<String>,
    pub status: ContentStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default)]
pub struct NewOffering {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub features: Features,
    pub pricing: Pricing,
    pub image: Option<String>,
    pub status: ContentStatus,
}

pub async fn slug_taken(db: &DatabaseConnection, slug: &str, exclude: Option<Uuid>) -> Result<bool, ModelError> {
    let mut q = Entity::find().filter(Column::Slug.eq(slug));
    if let Some(id) = exclude {
        q = q.filter(Column::Id.ne(id));
    }
    Ok(q.one(db).await?.is_some())
}

pub async fn create(db: &DatabaseConnection, new: NewOffering) -> Result<Model, ModelError> {
    validate::require_all(&[&new.name, &new.slug, &new.description], REQUIRED_FIELDS_MSG)?;
    let slug = new.slug.trim().to_string();
    validate::validate_slug(&slug)?;
    new.pricing.validate()?;
    if slug_taken(db, &slug, None).await? {
        return Err(ModelError::Conflict(SLUG_TAKEN_MSG.into()));
    }
    let now = timestamps::now();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(new.name.trim().to_string()),
        slug: Set(slug),
        description: Set(new.description),
        features: Set(new.features.cleaned()),
        pricing: Set(new.pricing),
        image: Set(validate::non_empty(new.image)),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::from_write(e, SLUG_TAKEN_MSG))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_accepts_legacy_keys_and_defaults() {
        let p: Pricing = serde_json::from_str(r#"{"startingPrice": 2500}"#).unwrap();
        assert_eq!(p.amount, 2500.0);
        assert_eq!(p.currency, "USD");
        assert_eq!(p.billing_type, "one-time");

        let p: Pricing = serde_json::from_str(r#"{"price": 99.5, "currency": "EUR", "billingType": "monthly"}"#).unwrap();
        assert_eq!(p.amount, 99.5);
        assert_eq!(p.billing_type, "monthly");

        let v = serde_json::to_value(Pricing::default()).unwrap();
        assert_eq!(v, serde_json::json!({"amount": 0.0, "currency": "USD", "billingType": "one-time"}));
    }

    #[test]
    fn negative_price_rejected() {
        let p = Pricing { amount: -1.0, ..Pricing::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn features_are_a_plain_list() {
        let f: Features = serde_json::from_str(r#"["SEO", " ", "Hosting"]"#).unwrap();
        assert_eq!(f.cleaned().0, vec!["SEO".to_string(), "Hosting".to_string()]);
    }
}
