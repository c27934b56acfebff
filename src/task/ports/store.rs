//! Store port for task persistence, lookup, and scoped queries.

use crate::recurrence::domain::TemplateId;
use crate::task::domain::{OwnerId, ProjectId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Every method is scoped by an explicit [`OwnerId`]; implementations
/// must never return another owner's records. Read-your-writes
/// consistency within a single owner scope is assumed.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the task ID already
    /// exists.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskStoreResult<()>;

    /// Finds a task by identifier within the owner's scope.
    ///
    /// Returns `None` when the task does not exist for this owner.
    async fn find_by_id(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns all tasks in the given project.
    async fn list_by_project(
        &self,
        owner: OwnerId,
        project: ProjectId,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Returns the direct sub-tasks of the given parent.
    async fn list_subtasks(&self, owner: OwnerId, parent: TaskId) -> TaskStoreResult<Vec<Task>>;

    /// Returns every task whose dependency list references `dependency`.
    async fn list_dependents(
        &self,
        owner: OwnerId,
        dependency: TaskId,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Counts the instances materialized from the given template.
    async fn count_template_instances(
        &self,
        owner: OwnerId,
        template: TemplateId,
    ) -> TaskStoreResult<u64>;

    /// Deletes a task within the owner's scope.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found within the owner's scope.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
