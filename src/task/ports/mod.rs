//! Port contracts for the task engine.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod events;
pub mod store;

pub use events::{EventSinkError, EventSinkResult, TaskEventSink, TaskUnblocked};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
