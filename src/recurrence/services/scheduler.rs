//! Recurring task instance generation.

use crate::recurrence::{
    domain::{Recurrence, RecurringTaskTemplate, TemplateId, schedule},
    ports::{TemplateStore, TemplateStoreError},
};
use crate::task::{
    domain::{NewTask, OwnerId, Task, TaskDomainError},
    ports::{TaskStore, TaskStoreError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors for instance generation.
#[derive(Debug, Clone, Error)]
pub enum ScheduleError {
    /// The template does not exist for this owner.
    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),

    /// Materializing the instance failed domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task store failure.
    #[error(transparent)]
    Tasks(#[from] TaskStoreError),

    /// Template store failure.
    #[error(transparent)]
    Templates(#[from] TemplateStoreError),
}

/// Decides whether a template is due to generate an instance for a date.
///
/// `instances_generated` is the count of tasks already materialized from
/// this template; callers obtain it from the task store. The pattern's
/// activity, cutoff, cap, and same-date idempotence guards run before
/// the calendar math.
#[must_use]
pub fn should_generate(
    template: &RecurringTaskTemplate,
    instances_generated: u64,
    as_of: NaiveDate,
) -> bool {
    if !template.is_active() {
        return false;
    }
    let pattern = template.pattern();
    if pattern.end_date().is_some_and(|end_date| as_of > end_date) {
        return false;
    }
    if pattern
        .max_instances()
        .is_some_and(|cap| instances_generated >= u64::from(cap))
    {
        return false;
    }
    if template.last_generated_date() == Some(as_of) {
        return false;
    }
    schedule::occurs_on(
        pattern,
        template.created_at().date_naive(),
        template.last_generated_date(),
        as_of,
    )
}

/// Materializes task instances from recurring templates.
///
/// Invoked by an external periodic trigger (or a manual request for a
/// single template); the scheduler never schedules itself.
#[derive(Clone)]
pub struct RecurrenceScheduler<S, T, C>
where
    S: TaskStore,
    T: TemplateStore,
    C: Clock + Send + Sync,
{
    tasks: Arc<S>,
    templates: Arc<T>,
    clock: Arc<C>,
}

impl<S, T, C> RecurrenceScheduler<S, T, C>
where
    S: TaskStore,
    T: TemplateStore,
    C: Clock + Send + Sync,
{
    /// Creates a new scheduler.
    #[must_use]
    pub const fn new(tasks: Arc<S>, templates: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            templates,
            clock,
        }
    }

    /// Generates the instance due for `as_of` from a single template.
    ///
    /// Idempotent per calendar date: a second call with the same date
    /// produces nothing. Returns the materialized tasks (at most one per
    /// call).
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::TemplateNotFound`] for an unknown
    /// template, and store or domain errors from materialization.
    pub async fn generate_due_instances(
        &self,
        owner: OwnerId,
        template_id: TemplateId,
        as_of: NaiveDate,
    ) -> Result<Vec<Task>, ScheduleError> {
        let template = self
            .templates
            .find_by_id(owner, template_id)
            .await?
            .ok_or(ScheduleError::TemplateNotFound(template_id))?;
        self.generate_for(owner, template, as_of).await
    }

    /// Runs a generation pass over every active template.
    ///
    /// Best-effort: a failure while processing one template is logged
    /// and does not block generation for the others. Returns every task
    /// materialized during the pass.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Templates`] when the active-template
    /// query itself fails.
    pub async fn run_generation_pass(
        &self,
        owner: OwnerId,
        as_of: NaiveDate,
    ) -> Result<Vec<Task>, ScheduleError> {
        let active = self.templates.list_active(owner).await?;
        let mut created = Vec::new();
        for template in active {
            let template_id = template.id();
            match self.generate_for(owner, template, as_of).await {
                Ok(mut instances) => created.append(&mut instances),
                Err(err) => {
                    tracing::warn!(
                        template_id = %template_id,
                        error = %err,
                        "instance generation failed; continuing pass",
                    );
                }
            }
        }
        Ok(created)
    }

    /// Materializes an instance from `template` when it is due.
    async fn generate_for(
        &self,
        owner: OwnerId,
        mut template: RecurringTaskTemplate,
        as_of: NaiveDate,
    ) -> Result<Vec<Task>, ScheduleError> {
        let instances_generated = self
            .tasks
            .count_template_instances(owner, template.id())
            .await?;
        if !should_generate(&template, instances_generated, as_of) {
            return Ok(Vec::new());
        }

        let sort_order = self.next_sort_order(owner, &template).await?;
        let mut draft = NewTask::new(owner, template.project_id(), template.name())
            .with_template(template.id())
            .with_priority(template.priority())
            .with_due_date(as_of)
            .with_sort_order(sort_order)
            .with_recurrence(Recurrence::Structured(template.pattern().clone()));
        if let Some(description) = template.description() {
            draft = draft.with_description(description);
        }
        if let Some(category) = template.category() {
            draft = draft.with_category(category);
        }
        if let Some(due_time) = template.due_time() {
            draft = draft.with_due_time(due_time);
        }

        let task = Task::new(draft, &*self.clock)?;
        self.tasks.insert(&task).await?;

        template.mark_generated(as_of, &*self.clock);
        self.templates.update(&template).await?;

        Ok(vec![task])
    }

    /// Returns the sort order appending at the end of the template's
    /// project.
    async fn next_sort_order(
        &self,
        owner: OwnerId,
        template: &RecurringTaskTemplate,
    ) -> Result<i64, ScheduleError> {
        let siblings = self
            .tasks
            .list_by_project(owner, template.project_id())
            .await?;
        let highest = siblings
            .iter()
            .map(Task::sort_order)
            .max()
            .unwrap_or_default();
        Ok(highest.saturating_add(1))
    }
}
