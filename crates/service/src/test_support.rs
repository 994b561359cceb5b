#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::{db::connect_with_config, user::{self, Role}};
use configs::DatabaseConfig;

/// A private, fully migrated in-memory database for one test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, role: Role) -> Result<user::Model, anyhow::Error> {
    Ok(user::create(db, email, "Seed User", role).await?)
}
