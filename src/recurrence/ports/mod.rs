//! Port contracts for recurring task generation.

pub mod store;

pub use store::{TemplateStore, TemplateStoreError, TemplateStoreResult};
