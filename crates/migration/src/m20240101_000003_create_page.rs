//! Create `page` table.
//! CMS pages; `slug` is unique and is the conflict source of truth.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Page::Table)
                    .if_not_exists()
                    .col(uuid(Page::Id).primary_key())
                    .col(string_len(Page::Title, 255).not_null())
                    .col(string_len(Page::Slug, 255).unique_key().not_null())
                    .col(text(Page::Content).not_null())
                    .col(string_len_null(Page::MetaTitle, 255))
                    .col(text_null(Page::MetaDesc))
                    .col(string_len(Page::Status, 32).not_null())
                    .col(uuid(Page::AuthorId).not_null())
                    .col(timestamp_with_time_zone(Page::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Page::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_page_author")
                            .from(Page::Table, Page::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Page::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Page {
    Table,
    Id,
    Title,
    Slug,
    Content,
    MetaTitle,
    MetaDesc,
    Status,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
