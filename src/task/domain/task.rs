//! Task aggregate root and related lifecycle types.

use super::{
    KanbanColumn, OwnerId, ParsePriorityError, ProjectId, TaskDomainError, TaskId, TaskStatus,
};
use crate::recurrence::domain::{Recurrence, TemplateId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority level copied from templates onto generated instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// High priority.
    High,
    /// Urgent priority.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Parameter object describing a task to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    owner_id: OwnerId,
    project_id: ProjectId,
    name: String,
    description: Option<String>,
    parent_task_id: Option<TaskId>,
    template_id: Option<TemplateId>,
    dependency_task_ids: Vec<TaskId>,
    sub_task_completion_required: bool,
    recurrence: Recurrence,
    priority: Priority,
    category: Option<String>,
    due_date: Option<NaiveDate>,
    due_time: Option<NaiveTime>,
    sort_order: i64,
}

impl NewTask {
    /// Creates a draft with required fields and empty optional state.
    #[must_use]
    pub fn new(owner_id: OwnerId, project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            project_id,
            name: name.into(),
            description: None,
            parent_task_id: None,
            template_id: None,
            dependency_task_ids: Vec::new(),
            sub_task_completion_required: false,
            recurrence: Recurrence::None,
            priority: Priority::default(),
            category: None,
            due_date: None,
            due_time: None,
            sort_order: 0,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks this task as a sub-task of `parent`.
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent_task_id = Some(parent);
        self
    }

    /// Records the template this task was materialized from.
    #[must_use]
    pub const fn with_template(mut self, template: TemplateId) -> Self {
        self.template_id = Some(template);
        self
    }

    /// Sets the prerequisite task identifiers.
    #[must_use]
    pub fn with_dependencies(mut self, ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.dependency_task_ids = ids.into_iter().collect();
        self
    }

    /// Requires all direct sub-tasks to complete before this task can.
    #[must_use]
    pub const fn with_sub_task_completion_required(mut self, required: bool) -> Self {
        self.sub_task_completion_required = required;
        self
    }

    /// Sets the recurrence configuration.
    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the calendar due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the time-of-day component of the due date.
    #[must_use]
    pub const fn with_due_time(mut self, due_time: NaiveTime) -> Self {
        self.due_time = Some(due_time);
        self
    }

    /// Sets the manual ordering position within the project.
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Task aggregate root.
///
/// Status-derived state (`completed`, `completed_at`, `kanban_column`) is
/// mutated only through [`Task::apply_status`], keeping those fields
/// consistent in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    project_id: ProjectId,
    parent_task_id: Option<TaskId>,
    template_id: Option<TemplateId>,
    name: String,
    description: Option<String>,
    status: TaskStatus,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    dependency_task_ids: Vec<TaskId>,
    sub_task_completion_required: bool,
    kanban_column: KanbanColumn,
    recurrence: Recurrence,
    priority: Priority,
    category: Option<String>,
    due_date: Option<NaiveDate>,
    due_time: Option<NaiveTime>,
    sort_order: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner_id: OwnerId,
    /// Persisted project reference.
    pub project_id: ProjectId,
    /// Persisted parent task reference, if this task is a sub-task.
    pub parent_task_id: Option<TaskId>,
    /// Persisted template provenance, if generated from a template.
    pub template_id: Option<TemplateId>,
    /// Persisted display name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted prerequisite identifiers.
    pub dependency_task_ids: Vec<TaskId>,
    /// Persisted sub-task completion requirement.
    pub sub_task_completion_required: bool,
    /// Persisted recurrence configuration.
    pub recurrence: Recurrence,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted category label.
    pub category: Option<String>,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted due time.
    pub due_time: Option<NaiveTime>,
    /// Persisted manual ordering position.
    pub sort_order: i64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name trims to
    /// nothing, or [`TaskDomainError::SelfDependency`] when the draft's
    /// dependency list references the new task itself (impossible for a
    /// fresh id, kept for parity with [`Task::set_dependencies`]).
    pub fn new(draft: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if draft.name.trim().is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }

        let timestamp = clock.utc();
        let mut task = Self {
            id: TaskId::new(),
            owner_id: draft.owner_id,
            project_id: draft.project_id,
            parent_task_id: draft.parent_task_id,
            template_id: draft.template_id,
            name: draft.name,
            description: draft.description,
            status: TaskStatus::Todo,
            completed: false,
            completed_at: None,
            dependency_task_ids: Vec::new(),
            sub_task_completion_required: draft.sub_task_completion_required,
            kanban_column: TaskStatus::Todo.column(),
            recurrence: draft.recurrence,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            due_time: draft.due_time,
            sort_order: draft.sort_order,
            created_at: timestamp,
            updated_at: timestamp,
        };
        task.set_dependencies(draft.dependency_task_ids, clock)?;
        task.updated_at = timestamp;
        Ok(task)
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// The derived `completed` flag and `kanban_column` are recomputed
    /// from the persisted status so a stale row can never resurrect an
    /// inconsistent combination.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            project_id: data.project_id,
            parent_task_id: data.parent_task_id,
            template_id: data.template_id,
            name: data.name,
            description: data.description,
            status: data.status,
            completed: data.status.is_completed(),
            completed_at: data.completed_at,
            dependency_task_ids: data.dependency_task_ids,
            sub_task_completion_required: data.sub_task_completion_required,
            kanban_column: data.status.column(),
            recurrence: data.recurrence,
            priority: data.priority,
            category: data.category,
            due_date: data.due_date,
            due_time: data.due_time,
            sort_order: data.sort_order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the owning project's identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the parent task reference when this task is a sub-task.
    #[must_use]
    pub const fn parent_task_id(&self) -> Option<TaskId> {
        self.parent_task_id
    }

    /// Returns the template this task was materialized from, if any.
    #[must_use]
    pub const fn template_id(&self) -> Option<TemplateId> {
        self.template_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the stored completion flag.
    ///
    /// Always equal to `status().is_completed()`.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the completion timestamp, set while the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the ordered prerequisite identifiers.
    #[must_use]
    pub fn dependency_task_ids(&self) -> &[TaskId] {
        &self.dependency_task_ids
    }

    /// Returns whether completion requires all direct sub-tasks done.
    #[must_use]
    pub const fn sub_task_completion_required(&self) -> bool {
        self.sub_task_completion_required
    }

    /// Returns the kanban column; always the image of the status under
    /// the fixed map.
    #[must_use]
    pub const fn kanban_column(&self) -> KanbanColumn {
        self.kanban_column
    }

    /// Returns the recurrence configuration.
    #[must_use]
    pub const fn recurrence(&self) -> &Recurrence {
        &self.recurrence
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the category label, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the calendar due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the time-of-day component of the due date, if any.
    #[must_use]
    pub const fn due_time(&self) -> Option<NaiveTime> {
        self.due_time
    }

    /// Returns the manual ordering position within the project.
    #[must_use]
    pub const fn sort_order(&self) -> i64 {
        self.sort_order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies an accepted status change, recomputing derived state.
    ///
    /// `completed` tracks the new status, `completed_at` is set on
    /// entering `Completed` (preserved when already completed) and
    /// cleared otherwise, and `kanban_column` follows the fixed map.
    /// Gate checks belong to the transition guard; this method assumes
    /// the change was already accepted.
    pub fn apply_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.completed = status.is_completed();
        if status.is_completed() {
            if self.completed_at.is_none() {
                self.completed_at = Some(clock.utc());
            }
        } else {
            self.completed_at = None;
        }
        self.kanban_column = status.column();
        self.touch(clock);
    }

    /// Replaces the prerequisite list.
    ///
    /// Duplicates are dropped, first occurrence wins, order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfDependency`] when the list contains
    /// this task's own identifier.
    pub fn set_dependencies(
        &mut self,
        ids: Vec<TaskId>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if ids.contains(&self.id) {
            return Err(TaskDomainError::SelfDependency(self.id));
        }
        let mut deduped = Vec::with_capacity(ids.len());
        for id in ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        self.dependency_task_ids = deduped;
        self.touch(clock);
        Ok(())
    }

    /// Removes a single prerequisite if present; used by the deletion
    /// cascade.
    pub fn remove_dependency(&mut self, id: TaskId, clock: &impl Clock) {
        if self.dependency_task_ids.contains(&id) {
            self.dependency_task_ids.retain(|dep| *dep != id);
            self.touch(clock);
        }
    }

    /// Sets the manual ordering position.
    pub fn set_sort_order(&mut self, sort_order: i64, clock: &impl Clock) {
        self.sort_order = sort_order;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
