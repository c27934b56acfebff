//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Owning user identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub owner_id: uuid::Uuid,
    /// Owning project identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub project_id: uuid::Uuid,
    /// Optional parent task reference.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub parent_task_id: Option<uuid::Uuid>,
    /// Optional template provenance.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub template_id: Option<uuid::Uuid>,
    /// Display name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Optional description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Lifecycle status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Derived completion flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub completed: bool,
    /// Completion timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Prerequisite identifiers as a JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub dependency_task_ids: Value,
    /// Sub-task completion requirement.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub sub_task_completion_required: bool,
    /// Kanban column.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub kanban_column: String,
    /// Recurrence configuration payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub recurrence: Value,
    /// Priority level.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Optional category label.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub category: Option<String>,
    /// Optional calendar due date.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Date>)]
    pub due_date: Option<NaiveDate>,
    /// Optional due time.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Time>)]
    pub due_time: Option<NaiveTime>,
    /// Manual ordering position.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub sort_order: i64,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Optional parent task reference.
    pub parent_task_id: Option<uuid::Uuid>,
    /// Optional template provenance.
    pub template_id: Option<uuid::Uuid>,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Derived completion flag.
    pub completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Prerequisite identifiers as a JSON array.
    pub dependency_task_ids: Value,
    /// Sub-task completion requirement.
    pub sub_task_completion_required: bool,
    /// Kanban column.
    pub kanban_column: String,
    /// Recurrence configuration payload.
    pub recurrence: Value,
    /// Priority level.
    pub priority: String,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional calendar due date.
    pub due_date: Option<NaiveDate>,
    /// Optional due time.
    pub due_time: Option<NaiveTime>,
    /// Manual ordering position.
    pub sort_order: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
