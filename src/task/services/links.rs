//! Dependency-list editing and task deletion with reference cleanup.

use crate::task::{
    domain::{OwnerId, Task, TaskDomainError, TaskId},
    ports::{TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors for dependency-list updates and task deletion.
#[derive(Debug, Clone, Error)]
pub enum DependencyUpdateError {
    /// The target task does not exist for this owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Domain validation failed (self-dependency).
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A dependency id does not resolve within the owner's scope.
    #[error("invalid task reference: {0}")]
    InvalidReference(TaskId),

    /// Persistence-layer failure.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Service maintaining prerequisite links between tasks.
#[derive(Clone)]
pub struct DependencyLinks<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> DependencyLinks<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new dependency-link service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Replaces a task's prerequisite list.
    ///
    /// Rejects self-reference outright and requires every id to resolve
    /// within the owner's scope before any write happens.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyUpdateError::NotFound`] for an unknown target,
    /// [`DependencyUpdateError::Domain`] on self-dependency,
    /// [`DependencyUpdateError::InvalidReference`] for an unresolvable
    /// dependency id, and [`DependencyUpdateError::Store`] on
    /// persistence failures.
    pub async fn replace_dependencies(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        dependency_ids: Vec<TaskId>,
    ) -> Result<Task, DependencyUpdateError> {
        let mut task = self
            .store
            .find_by_id(owner, task_id)
            .await?
            .ok_or(DependencyUpdateError::NotFound(task_id))?;

        for dependency_id in &dependency_ids {
            if *dependency_id == task_id {
                // Let the domain report it as the typed self-dependency
                // error rather than an invalid reference.
                continue;
            }
            if self.store.find_by_id(owner, *dependency_id).await?.is_none() {
                return Err(DependencyUpdateError::InvalidReference(*dependency_id));
            }
        }

        task.set_dependencies(dependency_ids, &*self.clock)?;
        self.store.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task and strips it from every dependent's prerequisite
    /// list.
    ///
    /// The delete commits first; if the cleanup is interrupted the
    /// remaining dangling references resolve as blocking (fail closed),
    /// the safer partial state.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyUpdateError::NotFound`] for an unknown target
    /// and [`DependencyUpdateError::Store`] on persistence failures.
    pub async fn delete_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
    ) -> Result<(), DependencyUpdateError> {
        let dependents = self.store.list_dependents(owner, task_id).await?;

        self.store.delete(owner, task_id).await.map_err(|err| {
            if let TaskStoreError::NotFound(missing) = err {
                DependencyUpdateError::NotFound(missing)
            } else {
                DependencyUpdateError::Store(err)
            }
        })?;

        for mut dependent in dependents {
            dependent.remove_dependency(task_id, &*self.clock);
            self.store.update(&dependent).await?;
        }
        Ok(())
    }
}
