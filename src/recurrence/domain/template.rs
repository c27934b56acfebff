//! Recurring task template aggregate root.

use super::{RecurrenceDomainError, RecurrencePattern, TemplateId};
use crate::task::domain::{OwnerId, Priority, ProjectId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Parameter object describing a template to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplate {
    owner_id: OwnerId,
    project_id: ProjectId,
    name: String,
    description: Option<String>,
    priority: Priority,
    category: Option<String>,
    due_time: Option<NaiveTime>,
    pattern: RecurrencePattern,
}

impl NewTemplate {
    /// Creates a draft with required fields.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        project_id: ProjectId,
        name: impl Into<String>,
        pattern: RecurrencePattern,
    ) -> Self {
        Self {
            owner_id,
            project_id,
            name: name.into(),
            description: None,
            priority: Priority::default(),
            category: None,
            due_time: None,
            pattern,
        }
    }

    /// Sets the description copied onto generated instances.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority copied onto generated instances.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the category copied onto generated instances.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the due time copied onto generated instances.
    #[must_use]
    pub const fn with_due_time(mut self, due_time: NaiveTime) -> Self {
        self.due_time = Some(due_time);
        self
    }
}

/// Recurring task template aggregate root.
///
/// A template is the recurring rule; the scheduler materializes concrete
/// task instances from it, one per due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTaskTemplate {
    id: TemplateId,
    owner_id: OwnerId,
    project_id: ProjectId,
    name: String,
    description: Option<String>,
    priority: Priority,
    category: Option<String>,
    due_time: Option<NaiveTime>,
    pattern: RecurrencePattern,
    is_active: bool,
    last_generated_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted template aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTemplateData {
    /// Persisted template identifier.
    pub id: TemplateId,
    /// Persisted owner identifier.
    pub owner_id: OwnerId,
    /// Persisted project reference.
    pub project_id: ProjectId,
    /// Persisted display name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted category label.
    pub category: Option<String>,
    /// Persisted due time.
    pub due_time: Option<NaiveTime>,
    /// Persisted recurrence pattern.
    pub pattern: RecurrencePattern,
    /// Persisted activity flag.
    pub is_active: bool,
    /// Persisted most recent generation date.
    pub last_generated_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl RecurringTaskTemplate {
    /// Creates a new active template.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceDomainError::EmptyTemplateName`] when the name
    /// trims to nothing.
    pub fn new(draft: NewTemplate, clock: &impl Clock) -> Result<Self, RecurrenceDomainError> {
        if draft.name.trim().is_empty() {
            return Err(RecurrenceDomainError::EmptyTemplateName);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TemplateId::new(),
            owner_id: draft.owner_id,
            project_id: draft.project_id,
            name: draft.name,
            description: draft.description,
            priority: draft.priority,
            category: draft.category,
            due_time: draft.due_time,
            pattern: draft.pattern,
            is_active: true,
            last_generated_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a template from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTemplateData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            project_id: data.project_id,
            name: data.name,
            description: data.description,
            priority: data.priority,
            category: data.category,
            due_time: data.due_time,
            pattern: data.pattern,
            is_active: data.is_active,
            last_generated_date: data.last_generated_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the template identifier.
    #[must_use]
    pub const fn id(&self) -> TemplateId {
        self.id
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the project generated instances land in.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
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

    /// Returns the priority copied onto generated instances.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the category copied onto generated instances, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the due time copied onto generated instances, if any.
    #[must_use]
    pub const fn due_time(&self) -> Option<NaiveTime> {
        self.due_time
    }

    /// Returns the recurrence pattern.
    #[must_use]
    pub const fn pattern(&self) -> &RecurrencePattern {
        &self.pattern
    }

    /// Returns whether the template still generates instances.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the most recent generation date, if any.
    #[must_use]
    pub const fn last_generated_date(&self) -> Option<NaiveDate> {
        self.last_generated_date
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

    /// Records a successful generation for `date`, the scheduler's
    /// same-date idempotence anchor.
    pub fn mark_generated(&mut self, date: NaiveDate, clock: &impl Clock) {
        self.last_generated_date = Some(date);
        self.touch(clock);
    }

    /// Activates or deactivates instance generation.
    pub fn set_active(&mut self, active: bool, clock: &impl Clock) {
        self.is_active = active;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
