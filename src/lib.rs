//! Atrium: task scheduling and completion-propagation core for a
//! personal productivity system.
//!
//! This crate provides the task state machine with dependency-gated
//! transitions, bottom-up sub-task completion propagation, the kanban
//! board projection of task status, and recurring task instance
//! generation.
//!
//! # Architecture
//!
//! Atrium follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Status transitions, dependency gating, propagation, kanban
//! - [`recurrence`]: Recurring templates and instance generation

pub mod recurrence;
pub mod task;
