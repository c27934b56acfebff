//! Application services for the task engine.

mod board;
mod dependency;
mod guard;
mod links;
mod propagation;

pub use board::{BoardError, BoardView, KanbanProjector};
pub use dependency::{BlockingTask, DependencyResolution, DependencyResolver};
pub use guard::{TransitionError, TransitionGuard};
pub use links::{DependencyLinks, DependencyUpdateError};
pub use propagation::SubtaskPropagation;
