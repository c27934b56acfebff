//! Sub-task completion propagation: bottom-up aggregation of sub-task
//! state into the parent task.

use crate::task::{
    domain::{OwnerId, TaskId, TaskStatus},
    ports::{TaskEventSink, TaskStore, TaskStoreResult},
};
use mockable::Clock;
use std::sync::Arc;

use super::dependency;

/// Recomputes a parent task's completion state after a sub-task event.
///
/// Propagation is single-level: completing a sub-task updates its
/// immediate parent only, never a grandparent.
#[derive(Clone)]
pub struct SubtaskPropagation<S, E, C>
where
    S: TaskStore,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    events: Arc<E>,
    clock: Arc<C>,
}

impl<S, E, C> SubtaskPropagation<S, E, C>
where
    S: TaskStore,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    /// Creates a new propagation engine.
    #[must_use]
    pub const fn new(store: Arc<S>, events: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            store,
            events,
            clock,
        }
    }

    /// Recomputes the parent's completion state from its sub-tasks.
    ///
    /// Idempotent and safe to invoke redundantly: a missing parent, a
    /// parent without the completion requirement, and a parent with no
    /// sub-tasks are all no-ops. Sub-task state is re-fetched here, never
    /// taken from the caller, so a concurrent completion cannot be
    /// missed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::ports::TaskStoreError`] when a store
    /// operation fails.
    pub async fn on_subtask_status_changed(
        &self,
        owner: OwnerId,
        parent_task_id: TaskId,
    ) -> TaskStoreResult<()> {
        let Some(mut parent) = self.store.find_by_id(owner, parent_task_id).await? else {
            return Ok(());
        };
        if !parent.sub_task_completion_required() {
            return Ok(());
        }

        let subtasks = self.store.list_subtasks(owner, parent_task_id).await?;
        if subtasks.is_empty() {
            return Ok(());
        }
        let all_done = subtasks
            .iter()
            .all(|subtask| subtask.status().is_completed());

        if all_done && !parent.status().is_completed() {
            // The sub-task gate is this engine's own authority, but the
            // parent's dependency gate still applies.
            let resolution = dependency::resolve(&*self.store, owner, &parent).await?;
            if !resolution.can_start() {
                tracing::debug!(
                    task_id = %parent.id(),
                    "skipping auto-complete: parent dependencies incomplete",
                );
                return Ok(());
            }
            parent.apply_status(TaskStatus::Completed, &*self.clock);
            self.store.update(&parent).await?;
            dependency::notify_unblocked_dependents(
                &*self.store,
                &*self.events,
                owner,
                parent.id(),
            )
            .await?;
        } else if !all_done && parent.status().is_completed() {
            // A previously-completed sub-task was reopened. Reverting to
            // in_progress preserves "work is ongoing" rather than
            // resetting to todo.
            parent.apply_status(TaskStatus::InProgress, &*self.clock);
            self.store.update(&parent).await?;
        }

        Ok(())
    }
}
