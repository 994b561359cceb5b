use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pages: admin list filters by status and sorts by updated_at
        manager
            .create_index(
                Index::create()
                    .name("idx_page_status_updated")
                    .table(Page::Table)
                    .col(Page::Status)
                    .col(Page::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        // Services: public catalogue reads published rows only
        manager
            .create_index(
                Index::create()
                    .name("idx_service_status_updated")
                    .table(Service::Table)
                    .col(Service::Status)
                    .col(Service::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        // Leads: status filter + created_at ordering, dashboard counts
        manager
            .create_index(
                Index::create()
                    .name("idx_lead_status_created")
                    .table(Lead::Table)
                    .col(Lead::Status)
                    .col(Lead::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lead_assigned_to")
                    .table(Lead::Table)
                    .col(Lead::AssignedTo)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_lead_assigned_to").table(Lead::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_lead_status_created").table(Lead::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_service_status_updated").table(Service::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_page_status_updated").table(Page::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Page { Table, Status, UpdatedAt }

#[derive(DeriveIden)]
enum Service { Table, Status, UpdatedAt }

#[derive(DeriveIden)]
enum Lead { Table, Status, CreatedAt, AssignedTo }
