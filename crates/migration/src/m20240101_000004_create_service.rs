//! Create `service` table.
//! Agency service offerings; `features` and `pricing` are JSON documents.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(string_len(Service::Name, 255).not_null())
                    .col(string_len(Service::Slug, 255).unique_key().not_null())
                    .col(text(Service::Description).not_null())
                    .col(json_binary(Service::Features).not_null())
                    .col(json_binary(Service::Pricing).not_null())
                    .col(string_len_null(Service::Image, 512))
                    .col(string_len(Service::Status, 32).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Features,
    Pricing,
    Image,
    Status,
    CreatedAt,
    UpdatedAt,
}
