//! `PostgreSQL` adapters for recurring task template persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTemplateStore;
