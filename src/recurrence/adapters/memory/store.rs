//! Thread-safe in-memory template store for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::recurrence::{
    domain::{RecurringTaskTemplate, TemplateId},
    ports::{TemplateStore, TemplateStoreError, TemplateStoreResult},
};
use crate::task::domain::OwnerId;

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    state: Arc<RwLock<HashMap<TemplateId, RecurringTaskTemplate>>>,
}

impl InMemoryTemplateStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TemplateStoreError {
    TemplateStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn insert(&self, template: &RecurringTaskTemplate) -> TemplateStoreResult<()> {
        let mut templates = self.state.write().map_err(lock_poisoned)?;
        if templates.contains_key(&template.id()) {
            return Err(TemplateStoreError::DuplicateTemplate(template.id()));
        }
        templates.insert(template.id(), template.clone());
        Ok(())
    }

    async fn update(&self, template: &RecurringTaskTemplate) -> TemplateStoreResult<()> {
        let mut templates = self.state.write().map_err(lock_poisoned)?;
        if !templates.contains_key(&template.id()) {
            return Err(TemplateStoreError::NotFound(template.id()));
        }
        templates.insert(template.id(), template.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        owner: OwnerId,
        id: TemplateId,
    ) -> TemplateStoreResult<Option<RecurringTaskTemplate>> {
        let templates = self.state.read().map_err(lock_poisoned)?;
        Ok(templates
            .get(&id)
            .filter(|template| template.owner_id() == owner)
            .cloned())
    }

    async fn list_active(&self, owner: OwnerId) -> TemplateStoreResult<Vec<RecurringTaskTemplate>> {
        let templates = self.state.read().map_err(lock_poisoned)?;
        let mut active: Vec<RecurringTaskTemplate> = templates
            .values()
            .filter(|template| template.owner_id() == owner && template.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|template| (template.created_at(), template.id().into_inner()));
        Ok(active)
    }
}
