//! Dependency resolution: decides whether a task's prerequisites allow
//! it to leave `todo`.

use crate::task::{
    domain::{OwnerId, Task, TaskId, TaskStatus},
    ports::{TaskEventSink, TaskStore, TaskStoreResult, TaskUnblocked},
};
use std::fmt;
use std::sync::Arc;

/// A prerequisite that is not yet completed, carrying the display name
/// for user-facing error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingTask {
    /// Identifier of the blocking task.
    pub id: TaskId,
    /// Display name; the raw identifier when the reference is dangling.
    pub name: String,
}

impl fmt::Display for BlockingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.name)
    }
}

/// Outcome of resolving a task's prerequisite list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyResolution {
    blocking_tasks: Vec<BlockingTask>,
}

impl DependencyResolution {
    /// Returns whether every prerequisite is completed.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.blocking_tasks.is_empty()
    }

    /// Returns the incomplete prerequisites in dependency-list order.
    #[must_use]
    pub fn blocking_tasks(&self) -> &[BlockingTask] {
        &self.blocking_tasks
    }

    /// Consumes the resolution, yielding the blocking list.
    #[must_use]
    pub fn into_blocking_tasks(self) -> Vec<BlockingTask> {
        self.blocking_tasks
    }
}

/// Read-only dependency resolution service.
#[derive(Clone)]
pub struct DependencyResolver<S>
where
    S: TaskStore,
{
    store: Arc<S>,
}

impl<S> DependencyResolver<S>
where
    S: TaskStore,
{
    /// Creates a new resolver over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves the task's prerequisite list.
    ///
    /// A reference that does not resolve within the owner's scope is
    /// treated as blocking (fails closed, not open).
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::ports::TaskStoreError`] when a store read
    /// fails.
    pub async fn resolve(
        &self,
        owner: OwnerId,
        task: &Task,
    ) -> TaskStoreResult<DependencyResolution> {
        resolve(&*self.store, owner, task).await
    }
}

/// Resolves `task`'s prerequisites against `store`; see
/// [`DependencyResolver::resolve`].
pub(crate) async fn resolve<S>(
    store: &S,
    owner: OwnerId,
    task: &Task,
) -> TaskStoreResult<DependencyResolution>
where
    S: TaskStore + ?Sized,
{
    let mut blocking_tasks = Vec::new();
    for dependency_id in task.dependency_task_ids() {
        match store.find_by_id(owner, *dependency_id).await? {
            Some(dependency) if dependency.status().is_completed() => {}
            Some(dependency) => blocking_tasks.push(BlockingTask {
                id: dependency.id(),
                name: dependency.name().to_owned(),
            }),
            None => blocking_tasks.push(BlockingTask {
                id: *dependency_id,
                name: dependency_id.to_string(),
            }),
        }
    }
    Ok(DependencyResolution { blocking_tasks })
}

/// Emits `task_unblocked` for every dependent of `unblocking` whose
/// dependency gate just opened.
///
/// Only dependents still in `todo` are notified; dispatch failures are
/// logged and never fail the triggering transition.
pub(crate) async fn notify_unblocked_dependents<S, E>(
    store: &S,
    events: &E,
    owner: OwnerId,
    unblocking: TaskId,
) -> TaskStoreResult<()>
where
    S: TaskStore + ?Sized,
    E: TaskEventSink + ?Sized,
{
    let dependents = store.list_dependents(owner, unblocking).await?;
    for dependent in dependents {
        if dependent.status() != TaskStatus::Todo {
            continue;
        }
        let resolution = resolve(store, owner, &dependent).await?;
        if !resolution.can_start() {
            continue;
        }
        let event = TaskUnblocked {
            task_id: dependent.id(),
            unblocking_task_id: unblocking,
        };
        if let Err(err) = events.task_unblocked(event).await {
            tracing::warn!(
                task_id = %dependent.id(),
                unblocking_task_id = %unblocking,
                error = %err,
                "failed to dispatch task_unblocked event",
            );
        }
    }
    Ok(())
}
