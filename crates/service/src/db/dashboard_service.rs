use chrono::Duration;
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, ColumnTrait, PaginatorTrait};
use serde::Serialize;
use tracing::instrument;

use models::{lead::{self, LeadStatus}, offering, page, status::ContentStatus};
use crate::{db::lead_service, errors::ServiceError};

/// Leads newer than this count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_pages: u64,
    pub total_services: u64,
    pub active_services: u64,
    pub total_leads: u64,
    pub new_leads: u64,
    pub converted_leads: u64,
    pub recent_leads: u64,
    pub conversion_rate: u64,
}

/// Percentage of leads converted, rounded to the nearest whole number.
pub fn conversion_rate(total: u64, converted: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (converted as f64 / total as f64 * 100.0).round() as u64
}

#[instrument(skip(db))]
pub async fn stats(db: &DatabaseConnection) -> Result<DashboardStats, ServiceError> {
    let total_pages = page::Entity::find().count(db).await?;
    let total_services = offering::Entity::find().count(db).await?;
    let active_services = offering::Entity::find()
        .filter(offering::Column::Status.eq(ContentStatus::Published))
        .count(db)
        .await?;
    let total_leads = lead::Entity::find().count(db).await?;
    let new_leads = lead::Entity::find().filter(lead::Column::Status.eq(LeadStatus::New)).count(db).await?;
    let converted_leads = lead::Entity::find()
        .filter(lead::Column::Status.eq(LeadStatus::Converted))
        .count(db)
        .await?;
    let recent_leads = lead_service::count_recent(db, Duration::days(RECENT_WINDOW_DAYS)).await?;

    Ok(DashboardStats {
        total_pages,
        total_services,
        active_services,
        total_leads,
        new_leads,
        converted_leads,
        recent_leads,
        conversion_rate: conversion_rate(total_leads, converted_leads),
    })
}
