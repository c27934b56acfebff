//! Step definitions for task gating behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
