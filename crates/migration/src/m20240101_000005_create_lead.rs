//! Create `lead` table.
//! Inquiries from the public forms; `assigned_to` is cleared if the user goes away.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lead::Table)
                    .if_not_exists()
                    .col(uuid(Lead::Id).primary_key())
                    .col(string_len(Lead::Name, 128).not_null())
                    .col(string_len(Lead::Email, 255).not_null())
                    .col(string_len_null(Lead::Phone, 64))
                    .col(string_len_null(Lead::Company, 255))
                    .col(string_len(Lead::Service, 255).not_null())
                    .col(text(Lead::Message).not_null())
                    .col(string_len(Lead::Status, 32).not_null())
                    .col(string_len(Lead::Source, 64).not_null())
                    .col(uuid_null(Lead::AssignedTo))
                    .col(timestamp_with_time_zone(Lead::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Lead::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lead_assignee")
                            .from(Lead::Table, Lead::AssignedTo)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Lead::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Lead {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Company,
    Service,
    Message,
    Status,
    Source,
    AssignedTo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
