//! Task state and dependency resolution engine.
//!
//! Implements the dependency-gated status state machine, sub-task
//! completion propagation, the kanban board projection, and dependency
//! link maintenance. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
