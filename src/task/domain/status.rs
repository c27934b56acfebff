//! Task status and kanban column enumerations with the fixed bijection
//! between them.
//!
//! Both enumerations are closed: values outside the set are rejected at
//! the parsing boundary, never deep inside service logic.

use super::{ParseKanbanColumnError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// Every status is reachable from every other status; the transition
/// guard restricts *whether* a task may leave `Todo`, not which statuses
/// flow to which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started; the safe state returning is never blocked to.
    Todo,
    /// Task is being worked.
    InProgress,
    /// Task is awaiting review.
    Review,
    /// Task is finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
        }
    }

    /// Returns the kanban column this status projects to.
    ///
    /// The mapping is fixed and bidirectional; see [`KanbanColumn::status`]
    /// for the inverse.
    #[must_use]
    pub const fn column(self) -> KanbanColumn {
        match self {
            Self::Todo => KanbanColumn::ToDo,
            Self::InProgress => KanbanColumn::InProgress,
            Self::Review => KanbanColumn::Review,
            Self::Completed => KanbanColumn::Done,
        }
    }

    /// Returns whether this status counts as finished work.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Kanban board column; a pure projection of [`TaskStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KanbanColumn {
    /// Column holding tasks in `todo`.
    ToDo,
    /// Column holding tasks in `in_progress`.
    InProgress,
    /// Column holding tasks in `review`.
    Review,
    /// Column holding tasks in `completed`.
    Done,
}

impl KanbanColumn {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "to_do",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Returns the status this column corresponds to under the fixed map.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::ToDo => TaskStatus::Todo,
            Self::InProgress => TaskStatus::InProgress,
            Self::Review => TaskStatus::Review,
            Self::Done => TaskStatus::Completed,
        }
    }
}

impl fmt::Display for KanbanColumn {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for KanbanColumn {
    type Error = ParseKanbanColumnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "to_do" => Ok(Self::ToDo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(ParseKanbanColumnError(value.to_owned())),
        }
    }
}
