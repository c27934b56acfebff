//! In-memory event sink recording emitted events for inspection.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::ports::{EventSinkError, EventSinkResult, TaskEventSink, TaskUnblocked};

/// Thread-safe event sink that records every delivered event.
///
/// Doubles as the default sink for embedded use and as the observation
/// point for tests asserting on unblock notifications.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<RwLock<Vec<TaskUnblocked>>>,
}

impl RecordingEventSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the events delivered so far.
    ///
    /// # Errors
    ///
    /// Returns [`EventSinkError`] when the backing lock is poisoned.
    pub fn recorded(&self) -> Result<Vec<TaskUnblocked>, EventSinkError> {
        let events = self
            .events
            .read()
            .map_err(|err| EventSinkError::dispatch(std::io::Error::other(err.to_string())))?;
        Ok(events.clone())
    }
}

#[async_trait]
impl TaskEventSink for RecordingEventSink {
    async fn task_unblocked(&self, event: TaskUnblocked) -> EventSinkResult {
        let mut events = self
            .events
            .write()
            .map_err(|err| EventSinkError::dispatch(std::io::Error::other(err.to_string())))?;
        events.push(event);
        Ok(())
    }
}
