//! Store port for recurring task template persistence.

use crate::recurrence::domain::{RecurringTaskTemplate, TemplateId};
use crate::task::domain::OwnerId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for template store operations.
pub type TemplateStoreResult<T> = Result<T, TemplateStoreError>;

/// Template persistence contract, scoped by an explicit [`OwnerId`].
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Stores a new template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::DuplicateTemplate`] when the
    /// template ID already exists.
    async fn insert(&self, template: &RecurringTaskTemplate) -> TemplateStoreResult<()>;

    /// Persists changes to an existing template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::NotFound`] when the template does
    /// not exist.
    async fn update(&self, template: &RecurringTaskTemplate) -> TemplateStoreResult<()>;

    /// Finds a template by identifier within the owner's scope.
    ///
    /// Returns `None` when the template does not exist for this owner.
    async fn find_by_id(
        &self,
        owner: OwnerId,
        id: TemplateId,
    ) -> TemplateStoreResult<Option<RecurringTaskTemplate>>;

    /// Returns the owner's active templates, the generation pass input.
    async fn list_active(&self, owner: OwnerId) -> TemplateStoreResult<Vec<RecurringTaskTemplate>>;
}

/// Errors returned by template store implementations.
#[derive(Debug, Clone, Error)]
pub enum TemplateStoreError {
    /// A template with the same identifier already exists.
    #[error("duplicate template identifier: {0}")]
    DuplicateTemplate(TemplateId),

    /// The template was not found within the owner's scope.
    #[error("template not found: {0}")]
    NotFound(TemplateId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TemplateStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
