//! Shared helpers for in-memory engine integration tests.

use atrium::recurrence::adapters::memory::InMemoryTemplateStore;
use atrium::recurrence::services::RecurrenceScheduler;
use atrium::task::{
    adapters::memory::{InMemoryTaskStore, RecordingEventSink},
    domain::{NewTask, OwnerId, ProjectId, Task, TaskStatus},
    ports::TaskStore,
    services::{KanbanProjector, TransitionGuard},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

pub type TestResult<T = ()> = Result<T, eyre::Report>;

pub type TestGuard = TransitionGuard<InMemoryTaskStore, RecordingEventSink, DefaultClock>;
pub type TestProjector = KanbanProjector<InMemoryTaskStore, RecordingEventSink, DefaultClock>;
pub type TestScheduler =
    RecurrenceScheduler<InMemoryTaskStore, InMemoryTemplateStore, DefaultClock>;

/// An engine wired over in-memory adapters for a single owner and
/// project.
pub struct Engine {
    pub store: Arc<InMemoryTaskStore>,
    pub templates: Arc<InMemoryTemplateStore>,
    pub events: Arc<RecordingEventSink>,
    pub clock: Arc<DefaultClock>,
    pub owner: OwnerId,
    pub project: ProjectId,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryTaskStore::new()),
            templates: Arc::new(InMemoryTemplateStore::new()),
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

    pub fn scheduler(&self) -> TestScheduler {
        RecurrenceScheduler::new(
            Arc::clone(&self.store),
            Arc::clone(&self.templates),
            Arc::clone(&self.clock),
        )
    }

    /// Creates and stores a task in the engine's project.
    pub async fn add_task(&self, draft: NewTask) -> TestResult<Task> {
        let task = Task::new(draft, &*self.clock)?;
        self.store.insert(&task).await?;
        Ok(task)
    }

    /// Starts a draft for a task in the engine's project.
    pub fn draft(&self, name: &str) -> NewTask {
        NewTask::new(self.owner, self.project, name)
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
pub fn engine() -> Engine {
    Engine::new()
}
