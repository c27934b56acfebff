//! Diesel row models for recurring task template persistence.

use super::schema::recurring_task_templates;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for template records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recurring_task_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TemplateRow {
    /// Template identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Project generated instances land in.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: String,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional due time.
    pub due_time: Option<NaiveTime>,
    /// Recurrence pattern payload.
    pub pattern: Value,
    /// Activity flag.
    pub is_active: bool,
    /// Most recent generation date.
    pub last_generated_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for template records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = recurring_task_templates)]
#[diesel(treat_none_as_null = true)]
pub struct NewTemplateRow {
    /// Template identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Project generated instances land in.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: String,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional due time.
    pub due_time: Option<NaiveTime>,
    /// Recurrence pattern payload.
    pub pattern: Value,
    /// Activity flag.
    pub is_active: bool,
    /// Most recent generation date.
    pub last_generated_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
