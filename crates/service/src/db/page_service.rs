use uuid::Uuid;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, Set, QueryFilter, QueryOrder, ColumnTrait, PaginatorTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{errors::ModelError, page, status::ContentStatus, timestamps, user::{self, UserSummary}, validate};
use common::pagination::{Paged, Pagination};
use crate::errors::ServiceError;

/// A page with its author resolved for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    #[serde(flatten)]
    pub page: page::Model,
    pub author: Option<UserSummary>,
}

impl PageView {
    fn new(page: page::Model, author: Option<user::Model>) -> Self {
        Self { page, author: author.map(UserSummary::from) }
    }
}

/// Partial update; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_desc: Option<String>,
    pub status: Option<ContentStatus>,
}

/// List pages, newest edits first.
#[instrument(skip(db))]
pub async fn list_pages(db: &DatabaseConnection, opts: Pagination, status: Option<ContentStatus>) -> Result<Paged<PageView>, ServiceError> {
    let mut q = page::Entity::find();
    if let Some(s) = status {
        q = q.filter(page::Column::Status.eq(s));
    }
    let paginator = q
        .order_by_desc(page::Column::UpdatedAt)
        .find_also_related(user::Entity)
        .paginate(db, opts.limit);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(opts.page_index()).await?;
    let items = rows.into_iter().map(|(p, a)| PageView::new(p, a)).collect();
    Ok(Paged::new(items, opts, total))
}

/// Get page by id.
pub async fn get_page(db: &DatabaseConnection, id: Uuid) -> Result<PageView, ServiceError> {
    let (p, author) = page::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Page"))?;
    Ok(PageView::new(p, author))
}

/// Create a page authored by the session user.
#[instrument(skip(db, input), fields(slug = %input.slug))]
pub async fn create_page(db: &DatabaseConnection, input: page::NewPage, author_id: Uuid) -> Result<PageView, ServiceError> {
    let created = page::create(db, input, author_id).await?;
    info!(page_id = %created.id, "page_created");
    get_page(db, created.id).await
}

/// Apply a partial update. A new slug must stay unique among other pages.
#[instrument(skip(db, changes))]
pub async fn update_page(db: &DatabaseConnection, id: Uuid, changes: PageUpdate) -> Result<PageView, ServiceError> {
    let existing = page::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Page"))?;
    let prev_updated = existing.updated_at;
    let mut am: page::ActiveModel = existing.into();

    if let Some(title) = changes.title {
        if validate::is_blank(&title) { return Err(ServiceError::Validation(page::REQUIRED_FIELDS_MSG.into())); }
        am.title = Set(title.trim().to_string());
    }
    if let Some(slug) = changes.slug {
        if validate::is_blank(&slug) { return Err(ServiceError::Validation(page::REQUIRED_FIELDS_MSG.into())); }
        let slug = slug.trim().to_string();
        validate::validate_slug(&slug)?;
        if page::slug_taken(db, &slug, Some(id)).await? {
            return Err(ServiceError::Conflict(page::SLUG_TAKEN_MSG.into()));
        }
        am.slug = Set(slug);
    }
    if let Some(content) = changes.content {
        if validate::is_blank(&content) { return Err(ServiceError::Validation(page::REQUIRED_FIELDS_MSG.into())); }
        am.content = Set(content);
    }
    if let Some(meta_title) = changes.meta_title { am.meta_title = Set(validate::non_empty(Some(meta_title))); }
    if let Some(meta_desc) = changes.meta_desc { am.meta_desc = Set(validate::non_empty(Some(meta_desc))); }
    if let Some(status) = changes.status { am.status = Set(status); }
    am.updated_at = Set(timestamps::after(&prev_updated));

    am.update(db)
        .await
        .map_err(|e| ModelError::from_write(e, page::SLUG_TAKEN_MSG))?;
    info!(page_id = %id, "page_updated");
    get_page(db, id).await
}

/// Delete page.
#[instrument(skip(db))]
pub async fn delete_page(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = page::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Page"));
    }
    info!(page_id = %id, "page_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::user::Role;
    use crate::test_support::{get_db, seed_user};

    fn new_page(title: &str, slug: &str) -> page::NewPage {
        page::NewPage { title: title.into(), slug: slug.into(), content: "Body".into(), ..Default::default() }
    }

    #[tokio::test]
    async fn page_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let author = seed_user(&db, "writer@example.com", Role::ContentManager).await?;

        let created = create_page(&db, new_page("About", "about"), author.id).await?;
        assert_eq!(created.author.as_ref().map(|a| a.id), Some(author.id));
        assert_eq!(created.page.status, ContentStatus::Draft);

        let found = get_page(&db, created.page.id).await?;
        assert_eq!(found.page.slug, "about");

        let updated = update_page(&db, created.page.id, PageUpdate { status: Some(ContentStatus::Published), ..Default::default() }).await?;
        assert_eq!(updated.page.status, ContentStatus::Published);
        assert!(updated.page.updated_at > created.page.updated_at);

        delete_page(&db, created.page.id).await?;
        assert!(matches!(get_page(&db, created.page.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_page(&db, created.page.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn updates_strictly_increase_updated_at() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let author = seed_user(&db, "writer@example.com", Role::Admin).await?;
        let created = create_page(&db, new_page("Team", "team"), author.id).await?;

        let mut last = created.page.updated_at;
        for i in 0..5 {
            let v = update_page(&db, created.page.id, PageUpdate { title: Some(format!("Team {i}")), ..Default::default() }).await?;
            assert!(v.page.updated_at > last);
            last = v.page.updated_at;
        }
        Ok(())
    }

    #[tokio::test]
    async fn slug_change_rechecks_uniqueness_excluding_self() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let author = seed_user(&db, "writer@example.com", Role::Admin).await?;
        let about = create_page(&db, new_page("About", "about"), author.id).await?;
        let contact = create_page(&db, new_page("Contact", "contact"), author.id).await?;

        // keeping its own slug is fine
        update_page(&db, about.page.id, PageUpdate { slug: Some("about".into()), ..Default::default() }).await?;

        let err = update_page(&db, contact.page.id, PageUpdate { slug: Some("about".into()), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(get_page(&db, contact.page.id).await?.page.slug, "contact");

        let err = update_page(&db, Uuid::new_v4(), PageUpdate::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_status_and_paginates() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let author = seed_user(&db, "writer@example.com", Role::Admin).await?;
        for i in 0..3 {
            create_page(&db, new_page(&format!("P{i}"), &format!("p-{i}")), author.id).await?;
        }
        let published = create_page(&db, page::NewPage { status: ContentStatus::Published, ..new_page("Live", "live") }, author.id).await?;

        let all = list_pages(&db, Pagination::from_query(Some(1), Some(2)), None).await?;
        assert_eq!(all.info.total, 4);
        assert_eq!(all.info.pages, 2);
        assert_eq!(all.items.len(), 2);

        let live = list_pages(&db, Pagination::default(), Some(ContentStatus::Published)).await?;
        assert_eq!(live.info.total, 1);
        assert_eq!(live.items[0].page.id, published.page.id);
        assert!(live.items[0].author.is_some());
        Ok(())
    }
}
