//! Shared harness for task engine unit tests.

use crate::task::{
    adapters::memory::{InMemoryTaskStore, RecordingEventSink},
    domain::{NewTask, OwnerId, ProjectId, Task, TaskStatus},
    ports::TaskStore,
    services::{
        DependencyLinks, DependencyResolver, KanbanProjector, SubtaskPropagation, TransitionGuard,
    },
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

pub type TestResult<T = ()> = Result<T, eyre::Report>;

pub type TestGuard = TransitionGuard<InMemoryTaskStore, RecordingEventSink, DefaultClock>;
pub type TestProjector = KanbanProjector<InMemoryTaskStore, RecordingEventSink, DefaultClock>;

/// A harness wiring the engine services over in-memory adapters for a
/// single owner and project.
pub struct EngineHarness {
    pub store: Arc<InMemoryTaskStore>,
    pub events: Arc<RecordingEventSink>,
    pub clock: Arc<DefaultClock>,
    pub owner: OwnerId,
    pub project: ProjectId,
}

impl EngineHarness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryTaskStore::new()),
            events: Arc::new(RecordingEventSink::new()),
            clock: Arc::new(DefaultClock),
            owner: OwnerId::new(),
            project: ProjectId::new(),
        }
    }

    pub fn guard(&self) -> TestGuard {
        TransitionGuard::new(
            Arc::clone(&self.store),
            Arc::clone(&self.events),
            Arc::clone(&self.clock),
        )
    }

    pub fn projector(&self) -> TestProjector {
        KanbanProjector::new(Arc::clone(&self.store), self.guard(), Arc::clone(&self.clock))
    }

    pub fn resolver(&self) -> DependencyResolver<InMemoryTaskStore> {
        DependencyResolver::new(Arc::clone(&self.store))
    }

    pub fn propagation(
        &self,
    ) -> SubtaskPropagation<InMemoryTaskStore, RecordingEventSink, DefaultClock> {
        SubtaskPropagation::new(
            Arc::clone(&self.store),
            Arc::clone(&self.events),
            Arc::clone(&self.clock),
        )
    }

    pub fn links(&self) -> DependencyLinks<InMemoryTaskStore, DefaultClock> {
        DependencyLinks::new(Arc::clone(&self.store), Arc::clone(&self.clock))
    }

    /// Starts a draft for a task in the harness project.
    pub fn draft(&self, name: &str) -> NewTask {
        NewTask::new(self.owner, self.project, name)
    }

    /// Creates and stores a task from the draft.
    pub async fn insert_task(&self, draft: NewTask) -> TestResult<Task> {
        let task = Task::new(draft, &*self.clock)?;
        self.store.insert(&task).await?;
        Ok(task)
    }

    /// Transitions a task through the guard, expecting acceptance.
    pub async fn transition(&self, task: &Task, status: TaskStatus) -> TestResult<Task> {
        let updated = self
            .guard()
            .attempt_transition(self.owner, task.id(), status)
            .await?;
        Ok(updated)
    }
}

#[fixture]
pub fn harness() -> EngineHarness {
    EngineHarness::new()
}
