//! Catalogue management for the `service` table.

use uuid::Uuid;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, Set, QueryFilter, QueryOrder, ColumnTrait, PaginatorTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{errors::ModelError, offering::{self, Features, Pricing}, status::ContentStatus, timestamps, validate};
use common::pagination::{Paged, Pagination};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub features: Option<Features>,
    pub pricing: Option<Pricing>,
    pub image: Option<String>,
    pub status: Option<ContentStatus>,
}

/// What the public catalogue exposes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicService {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub features: Features,
    pub pricing: Pricing,
    pub image: Option<String>,
    pub status: ContentStatus,
}

impl From<offering::Model> for PublicService {
    fn from(m: offering::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            features: m.features,
            pricing: m.pricing,
            image: m.image,
            status: m.status,
        }
    }
}

#[instrument(skip(db))]
pub async fn list_offerings(db: &DatabaseConnection, opts: Pagination, status: Option<ContentStatus>) -> Result<Paged<offering::Model>, ServiceError> {
    let mut q = offering::Entity::find();
    if let Some(s) = status {
        q = q.filter(offering::Column::Status.eq(s));
    }
    let paginator = q.order_by_desc(offering::Column::UpdatedAt).paginate(db, opts.limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(opts.page_index()).await?;
    Ok(Paged::new(items, opts, total))
}

/// Published services in catalogue order (oldest first).
pub async fn list_published(db: &DatabaseConnection) -> Result<Vec<PublicService>, ServiceError> {
    let rows = offering::Entity::find()
        .filter(offering::Column::Status.eq(ContentStatus::Published))
        .order_by_asc(offering::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(PublicService::from).collect())
}

pub async fn get_offering(db: &DatabaseConnection, id: Uuid) -> Result<offering::Model, ServiceError> {
    offering::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service"))
}

#[instrument(skip(db, input), fields(slug = %input.slug))]
pub async fn create_offering(db: &DatabaseConnection, input: offering::NewOffering) -> Result<offering::Model, ServiceError> {
    let created = offering::create(db, input).await?;
    info!(service_id = %created.id, "service_created");
    Ok(created)
}

#[instrument(skip(db, changes))]
pub async fn update_offering(db: &DatabaseConnection, id: Uuid, changes: OfferingUpdate) -> Result<offering::Model, ServiceError> {
    let existing = get_offering(db, id).await?;
    let prev_updated = existing.updated_at;
    let mut am: offering::ActiveModel = existing.into();
    let required = || ServiceError::Validation(offering::REQUIRED_FIELDS_MSG.into());

    if let Some(name) = changes.name {
        if validate::is_blank(&name) { return Err(required()); }
        am.name = Set(name.trim().to_string());
    }
    if let Some(slug) = changes.slug {
        if validate::is_blank(&slug) { return Err(required()); }
        let slug = slug.trim().to_string();
        validate::validate_slug(&slug)?;
        if offering::slug_taken(db, &slug, Some(id)).await? {
            return Err(ServiceError::Conflict(offering::SLUG_TAKEN_MSG.into()));
        }
        am.slug = Set(slug);
    }
    if let Some(description) = changes.description {
        if validate::is_blank(&description) { return Err(required()); }
        am.description = Set(description);
    }
    if let Some(features) = changes.features { am.features = Set(features.cleaned()); }
    if let Some(pricing) = changes.pricing {
        pricing.validate()?;
        am.pricing = Set(pricing);
    }
    if let Some(image) = changes.image { am.image = Set(validate::non_empty(Some(image))); }
    if let Some(status) = changes.status { am.status = Set(status); }
    am.updated_at = Set(timestamps::after(&prev_updated));

    let updated = am
        .update(db)
        .await
        .map_err(|e| ModelError::from_write(e, offering::SLUG_TAKEN_MSG))?;
    info!(service_id = %id, "service_updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_offering(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = offering::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service"));
    }
    info!(service_id = %id, "service_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn new_offering(name: &str, slug: &str, status: ContentStatus) -> offering::NewOffering {
        offering::NewOffering {
            name: name.into(),
            slug: slug.into(),
            description: format!("{name} for growing businesses"),
            features: Features(vec!["Discovery".into(), "Delivery".into()]),
            status,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn public_catalogue_only_shows_published() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let web = create_offering(&db, new_offering("Web Development", "web-development", ContentStatus::Published)).await?;
        create_offering(&db, new_offering("Legacy Hosting", "legacy-hosting", ContentStatus::Archived)).await?;
        create_offering(&db, new_offering("AI Consulting", "ai-consulting", ContentStatus::Draft)).await?;
        let seo = create_offering(&db, new_offering("SEO", "seo", ContentStatus::Published)).await?;

        let public = list_published(&db).await?;
        assert_eq!(public.len(), 2);
        assert!(public.iter().all(|s| s.status == ContentStatus::Published));
        let ids: Vec<Uuid> = public.iter().map(|s| s.id).collect();
        assert!(ids.contains(&web.id) && ids.contains(&seo.id));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts_on_create_and_update() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_offering(&db, new_offering("Web", "web", ContentStatus::Draft)).await?;
        let other = create_offering(&db, new_offering("Apps", "apps", ContentStatus::Draft)).await?;

        let err = create_offering(&db, new_offering("Web 2", "web", ContentStatus::Draft)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == offering::SLUG_TAKEN_MSG));

        let err = update_offering(&db, other.id, OfferingUpdate { slug: Some("web".into()), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let total = list_offerings(&db, Pagination::default(), None).await?.info.total;
        assert_eq!(total, 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_pricing_and_features() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_offering(&db, new_offering("Web", "web", ContentStatus::Draft)).await?;
        let changes = OfferingUpdate {
            features: Some(Features(vec!["Only one".into()])),
            pricing: Some(Pricing { amount: 4999.0, currency: "EUR".into(), billing_type: "project".into() }),
            status: Some(ContentStatus::Published),
            ..Default::default()
        };
        let u = update_offering(&db, s.id, changes).await?;
        assert_eq!(u.features.0, vec!["Only one".to_string()]);
        assert_eq!(u.pricing.currency, "EUR");
        assert!(u.updated_at > s.updated_at);

        let bad = OfferingUpdate { pricing: Some(Pricing { amount: -5.0, ..Pricing::default() }), ..Default::default() };
        assert!(matches!(update_offering(&db, s.id, bad).await, Err(ServiceError::Validation(_))));
        Ok(())
    }
}
