//! Thread-safe in-memory task store for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::recurrence::domain::TemplateId;
use crate::task::{
    domain::{OwnerId, ProjectId, Task, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects owner-scoped tasks matching `filter`, in insertion-agnostic
/// but deterministic order (sorted by creation time, then id).
fn scan(
    tasks: &HashMap<TaskId, Task>,
    owner: OwnerId,
    filter: impl Fn(&Task) -> bool,
) -> Vec<Task> {
    let mut found: Vec<Task> = tasks
        .values()
        .filter(|task| task.owner_id() == owner && filter(task))
        .cloned()
        .collect();
    found.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
    found
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut tasks = self.state.write().map_err(lock_poisoned)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let mut tasks = self.state.write().map_err(lock_poisoned)?;
        if !tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::NotFound(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        Ok(tasks
            .get(&id)
            .filter(|task| task.owner_id() == owner)
            .cloned())
    }

    async fn list_by_project(
        &self,
        owner: OwnerId,
        project: ProjectId,
    ) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        Ok(scan(&tasks, owner, |task| task.project_id() == project))
    }

    async fn list_subtasks(&self, owner: OwnerId, parent: TaskId) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        Ok(scan(&tasks, owner, |task| {
            task.parent_task_id() == Some(parent)
        }))
    }

    async fn list_dependents(
        &self,
        owner: OwnerId,
        dependency: TaskId,
    ) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        Ok(scan(&tasks, owner, |task| {
            task.dependency_task_ids().contains(&dependency)
        }))
    }

    async fn count_template_instances(
        &self,
        owner: OwnerId,
        template: TemplateId,
    ) -> TaskStoreResult<u64> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        let count = tasks
            .values()
            .filter(|task| task.owner_id() == owner && task.template_id() == Some(template))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<()> {
        let mut tasks = self.state.write().map_err(lock_poisoned)?;
        let belongs = tasks
            .get(&id)
            .is_some_and(|task| task.owner_id() == owner);
        if !belongs {
            return Err(TaskStoreError::NotFound(id));
        }
        tasks.remove(&id);
        Ok(())
    }
}
