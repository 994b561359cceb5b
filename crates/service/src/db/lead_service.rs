use uuid::Uuid;
use chrono::Duration;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, Set, QueryFilter, QueryOrder, ColumnTrait, PaginatorTrait};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, instrument};

use models::{lead::{self, LeadStatus}, timestamps, user::{self, UserSummary}};
use common::pagination::{Paged, Pagination};
use crate::errors::ServiceError;

/// A lead with its assignee resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadView {
    #[serde(flatten)]
    pub lead: lead::Model,
    pub assignee: Option<UserSummary>,
}

impl LeadView {
    fn new(lead: lead::Model, assignee: Option<user::Model>) -> Self {
        Self { lead, assignee: assignee.map(UserSummary::from) }
    }
}

/// Status and assignment changes. `assignedTo: null` clears the assignee,
/// leaving the key out keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    pub status: Option<LeadStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_to: Option<Option<Uuid>>,
}

fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[instrument(skip(db))]
pub async fn list_leads(db: &DatabaseConnection, opts: Pagination, status: Option<LeadStatus>) -> Result<Paged<LeadView>, ServiceError> {
    let mut q = lead::Entity::find();
    if let Some(s) = status {
        q = q.filter(lead::Column::Status.eq(s));
    }
    let paginator = q
        .order_by_desc(lead::Column::CreatedAt)
        .find_also_related(user::Entity)
        .paginate(db, opts.limit);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(opts.page_index()).await?;
    let items = rows.into_iter().map(|(l, a)| LeadView::new(l, a)).collect();
    Ok(Paged::new(items, opts, total))
}

pub async fn get_lead(db: &DatabaseConnection, id: Uuid) -> Result<LeadView, ServiceError> {
    let (l, assignee) = lead::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Lead"))?;
    Ok(LeadView::new(l, assignee))
}

/// Record an inquiry. Always starts as `NEW`; source defaults to `website`.
#[instrument(skip(db, input), fields(service = %input.service))]
pub async fn submit_lead(db: &DatabaseConnection, input: lead::NewLead) -> Result<lead::Model, ServiceError> {
    let created = lead::create(db, input).await?;
    info!(lead_id = %created.id, source = %created.source, "lead_received");
    Ok(created)
}

#[instrument(skip(db, changes))]
pub async fn update_lead(db: &DatabaseConnection, id: Uuid, changes: LeadUpdate) -> Result<LeadView, ServiceError> {
    let existing = lead::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Lead"))?;
    let prev_updated = existing.updated_at;
    let mut am: lead::ActiveModel = existing.into();

    if let Some(status) = changes.status {
        am.status = Set(status);
    }
    if let Some(assignee) = changes.assigned_to {
        if let Some(uid) = assignee {
            if user::Entity::find_by_id(uid).one(db).await?.is_none() {
                return Err(ServiceError::Validation("Assigned user does not exist".into()));
            }
        }
        am.assigned_to = Set(assignee);
    }
    am.updated_at = Set(timestamps::after(&prev_updated));
    am.update(db).await?;
    info!(lead_id = %id, "lead_updated");
    get_lead(db, id).await
}

#[instrument(skip(db))]
pub async fn delete_lead(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = lead::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Lead"));
    }
    info!(lead_id = %id, "lead_deleted");
    Ok(())
}

/// Leads created within `window` of now.
pub async fn count_recent(db: &DatabaseConnection, window: Duration) -> Result<u64, ServiceError> {
    let since = timestamps::now() - window;
    Ok(lead::Entity::find().filter(lead::Column::CreatedAt.gte(since)).count(db).await?)
}
