//! Shared world state for task gating BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use atrium::task::{
    adapters::memory::{InMemoryTaskStore, RecordingEventSink},
    domain::{OwnerId, ProjectId, Task, TaskId},
    services::{TransitionError, TransitionGuard},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Guard type used by the BDD world.
pub type TestGuard = TransitionGuard<InMemoryTaskStore, RecordingEventSink, DefaultClock>;

/// Scenario world for task gating behaviour tests.
pub struct TaskGatingWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub guard: TestGuard,
    pub clock: Arc<DefaultClock>,
    pub owner: OwnerId,
    pub project: ProjectId,
    pub tasks_by_name: HashMap<String, TaskId>,
    pub last_transition_result: Option<Result<Task, TransitionError>>,
}

impl TaskGatingWorld {
    /// Creates a world with empty scenario state.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let events = Arc::new(RecordingEventSink::new());
        let clock = Arc::new(DefaultClock);
        let guard = TransitionGuard::new(Arc::clone(&store), events, Arc::clone(&clock));

        Self {
            store,
            guard,
            clock,
            owner: OwnerId::new(),
            project: ProjectId::new(),
            tasks_by_name: HashMap::new(),
            last_transition_result: None,
        }
    }

    /// Looks up a scenario task id by its display name.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_name
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no scenario task named {name:?}"))
    }
}

impl Default for TaskGatingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskGatingWorld {
    TaskGatingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
