//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// A dependency list update included the task's own identifier.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing kanban columns from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown kanban column: {0}")]
pub struct ParseKanbanColumnError(pub String);

/// Error returned while parsing priorities from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
