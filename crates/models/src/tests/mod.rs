//! Entity tests against a freshly migrated in-memory SQLite database.

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::json;

use crate::{
    db::connect_with_config,
    errors::ModelError,
    lead, offering, page, setting,
    status::ContentStatus,
    user::{self, Role},
    user_credentials,
};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&configs::DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn about_page() -> page::NewPage {
    page::NewPage {
        title: "About".into(),
        slug: "about".into(),
        content: "We build websites.".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn user_email_is_unique_and_lowercased() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, "Admin@Example.com", "Admin", Role::Admin).await?;
    assert_eq!(u.email, "admin@example.com");

    let err = user::create(&db, "admin@example.com", "Other", Role::User).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)));

    let found = user::find_by_email(&db, "ADMIN@example.com").await?.unwrap();
    assert_eq!(found.id, u.id);
    Ok(())
}

#[tokio::test]
async fn credentials_upsert_replaces_hash() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, "editor@example.com", "Editor", Role::ContentManager).await?;
    let first = user_credentials::upsert_password(&db, u.id, "hash-one".into(), "argon2").await?;
    let second = user_credentials::upsert_password(&db, u.id, "hash-two".into(), "argon2").await?;
    assert_eq!(first.id, second.id);
    assert_eq!(second.password_hash, "hash-two");
    assert_eq!(user_credentials::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn duplicate_page_slug_is_conflict_and_inserts_nothing() -> Result<()> {
    let db = setup_test_db().await?;
    let author = user::create(&db, "author@example.com", "Author", Role::ContentManager).await?;
    let original = page::create(&db, about_page(), author.id).await?;
    assert_eq!(original.status, ContentStatus::Draft);

    let dup = page::NewPage { title: "About Us".into(), ..about_page() };
    let err = page::create(&db, dup, author.id).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(ref m) if m == page::SLUG_TAKEN_MSG));

    assert_eq!(page::Entity::find().count(&db).await?, 1);
    let still = page::Entity::find_by_id(original.id).one(&db).await?.unwrap();
    assert_eq!(still.title, "About");
    assert_eq!(still.author_id, author.id);
    Ok(())
}

#[tokio::test]
async fn page_requires_fields_and_url_safe_slug() -> Result<()> {
    let db = setup_test_db().await?;
    let author = user::create(&db, "author@example.com", "Author", Role::Admin).await?;

    let err = page::create(&db, page::NewPage { content: "  ".into(), ..about_page() }, author.id).await.unwrap_err();
    assert_eq!(err.to_string(), page::REQUIRED_FIELDS_MSG);

    let err = page::create(&db, page::NewPage { slug: "About Us".into(), ..about_page() }, author.id).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn slug_taken_excludes_own_row() -> Result<()> {
    let db = setup_test_db().await?;
    let svc = offering::create(
        &db,
        offering::NewOffering {
            name: "Web Development".into(),
            slug: "web-development".into(),
            description: "Sites".into(),
            ..Default::default()
        },
    )
    .await?;
    assert!(offering::slug_taken(&db, "web-development", None).await?);
    assert!(!offering::slug_taken(&db, "web-development", Some(svc.id)).await?);
    Ok(())
}

#[tokio::test]
async fn offering_json_columns_survive_storage() -> Result<()> {
    let db = setup_test_db().await?;
    let created = offering::create(
        &db,
        offering::NewOffering {
            name: "SEO".into(),
            slug: "seo".into(),
            description: "Search".into(),
            features: offering::Features(vec!["Audit".into(), "Keywords".into()]),
            pricing: offering::Pricing { amount: 1200.0, ..Default::default() },
            status: ContentStatus::Published,
            ..Default::default()
        },
    )
    .await?;
    let loaded = offering::Entity::find_by_id(created.id).one(&db).await?.unwrap();
    assert_eq!(loaded.features.0, vec!["Audit".to_string(), "Keywords".to_string()]);
    assert_eq!(loaded.pricing.amount, 1200.0);
    assert_eq!(loaded.pricing.billing_type, "one-time");
    Ok(())
}

#[tokio::test]
async fn lead_defaults_status_and_source() -> Result<()> {
    let db = setup_test_db().await?;
    let l = lead::create(
        &db,
        lead::NewLead {
            name: "John Smith".into(),
            email: "john@x.com".into(),
            service: "Web Development".into(),
            message: "Need a site".into(),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(l.status, lead::LeadStatus::New);
    assert_eq!(l.source, lead::DEFAULT_SOURCE);
    assert!(l.assigned_to.is_none());

    let err = lead::create(&db, lead::NewLead { name: "x".into(), ..Default::default() }).await.unwrap_err();
    assert_eq!(err.to_string(), lead::REQUIRED_FIELDS_MSG);
    Ok(())
}

#[tokio::test]
async fn setting_upsert_overwrites() -> Result<()> {
    let db = setup_test_db().await?;
    setting::upsert(&db, "site", json!({"name": "One"})).await?;
    let second = setting::upsert(&db, "site", json!({"name": "Two"})).await?;
    assert_eq!(second.value["name"], "Two");
    assert_eq!(setting::all(&db).await?.len(), 1);
    assert!(setting::find(&db, "email").await?.is_none());
    Ok(())
}
