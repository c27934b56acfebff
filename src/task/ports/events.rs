//! Event sink port for transition side effects consumed by an external
//! notification system.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Emitted when a transition to `completed` opens a dependent task's
/// dependency gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUnblocked {
    /// The task whose dependencies are now all complete.
    pub task_id: TaskId,
    /// The task whose completion opened the gate.
    pub unblocking_task_id: TaskId,
}

/// Result type for event sink operations.
pub type EventSinkResult = Result<(), EventSinkError>;

/// Contract for delivering engine events to an external consumer.
///
/// Delivery is best-effort: a failed dispatch is logged by the caller
/// and never fails the transition that produced the event.
#[async_trait]
pub trait TaskEventSink: Send + Sync {
    /// Delivers a [`TaskUnblocked`] event.
    ///
    /// # Errors
    ///
    /// Returns [`EventSinkError`] when the consumer rejects the event.
    async fn task_unblocked(&self, event: TaskUnblocked) -> EventSinkResult;
}

/// Errors returned by event sink implementations.
#[derive(Debug, Clone, Error)]
#[error("event dispatch failed: {0}")]
pub struct EventSinkError(Arc<dyn std::error::Error + Send + Sync>);

impl EventSinkError {
    /// Wraps a dispatch error.
    pub fn dispatch(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
