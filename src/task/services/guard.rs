//! Status transition guard: validates requested status changes against
//! dependency and sub-task gates before committing them.

use crate::task::{
    domain::{OwnerId, Task, TaskId, TaskStatus},
    ports::{TaskEventSink, TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use super::dependency::{self, BlockingTask};
use super::propagation::SubtaskPropagation;

/// Typed rejection reasons and faults for transition attempts.
///
/// The gate variants are expected, user-correctable outcomes the caller
/// surfaces verbatim; only [`TransitionError::Store`] is a system fault.
#[derive(Debug, Clone, Error)]
pub enum TransitionError {
    /// The target task does not exist for this owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Prerequisites are incomplete; the task may not leave `todo`.
    #[error("dependencies incomplete: complete {} first", blocking_list(.blocking))]
    DependenciesIncomplete {
        /// The status that was requested.
        requested: TaskStatus,
        /// The incomplete prerequisites, in dependency-list order.
        blocking: Vec<BlockingTask>,
    },

    /// Completion requires all direct sub-tasks to be completed first.
    #[error("{} sub-task(s) are not completed yet", .incomplete.len())]
    SubtasksIncomplete {
        /// Identifiers of the incomplete sub-tasks.
        incomplete: Vec<TaskId>,
    },

    /// Persistence-layer failure.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Renders blocking tasks as `'name', 'name'` for error messages.
fn blocking_list(blocking: &[BlockingTask]) -> String {
    blocking
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Dependency- and sub-task-gated status transition service.
///
/// The guard does not restrict which statuses flow to which; every
/// status is reachable from every other. It restricts whether a task may
/// leave `todo` at all, based on its prerequisite and sub-task gates.
#[derive(Clone)]
pub struct TransitionGuard<S, E, C>
where
    S: TaskStore,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    events: Arc<E>,
    clock: Arc<C>,
    propagation: SubtaskPropagation<S, E, C>,
}

impl<S, E, C> TransitionGuard<S, E, C>
where
    S: TaskStore,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    /// Creates a new transition guard.
    #[must_use]
    pub fn new(store: Arc<S>, events: Arc<E>, clock: Arc<C>) -> Self {
        let propagation =
            SubtaskPropagation::new(Arc::clone(&store), Arc::clone(&events), Arc::clone(&clock));
        Self {
            store,
            events,
            clock,
            propagation,
        }
    }

    /// Attempts to change a task's status.
    ///
    /// Rules, evaluated in order: returning to `todo` is always allowed;
    /// any other target first requires every prerequisite completed, and
    /// `completed` additionally requires every direct sub-task completed
    /// when the task demands it. On acceptance the status-derived state
    /// is recomputed, the change persisted, newly-unblocked dependents
    /// notified, and the parent's completion state repropagated.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotFound`] for an unknown task,
    /// [`TransitionError::DependenciesIncomplete`] or
    /// [`TransitionError::SubtasksIncomplete`] when a gate rejects the
    /// change, and [`TransitionError::Store`] on persistence failures.
    pub async fn attempt_transition(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        requested: TaskStatus,
    ) -> Result<Task, TransitionError> {
        let task = self
            .store
            .find_by_id(owner, task_id)
            .await?
            .ok_or(TransitionError::NotFound(task_id))?;

        if requested != TaskStatus::Todo {
            let resolution = dependency::resolve(&*self.store, owner, &task).await?;
            if !resolution.can_start() {
                return Err(TransitionError::DependenciesIncomplete {
                    requested,
                    blocking: resolution.into_blocking_tasks(),
                });
            }

            if requested == TaskStatus::Completed && task.sub_task_completion_required() {
                let incomplete: Vec<TaskId> = self
                    .store
                    .list_subtasks(owner, task_id)
                    .await?
                    .iter()
                    .filter(|subtask| !subtask.status().is_completed())
                    .map(Task::id)
                    .collect();
                if !incomplete.is_empty() {
                    return Err(TransitionError::SubtasksIncomplete { incomplete });
                }
            }
        }

        self.accept(owner, task, requested).await
    }

    /// Commits an accepted transition: applies the status, persists the
    /// task, emits unblock events, and repropagates to the parent.
    async fn accept(
        &self,
        owner: OwnerId,
        mut task: Task,
        requested: TaskStatus,
    ) -> Result<Task, TransitionError> {
        let was_completed = task.status().is_completed();
        task.apply_status(requested, &*self.clock);
        self.store.update(&task).await?;

        if task.status().is_completed() && !was_completed {
            dependency::notify_unblocked_dependents(&*self.store, &*self.events, owner, task.id())
                .await?;
        }

        if let Some(parent_task_id) = task.parent_task_id() {
            self.propagation
                .on_subtask_status_changed(owner, parent_task_id)
                .await?;
        }

        Ok(task)
    }
}
