//! Kanban projection: the four-column board view derived from a
//! project's task list, with column moves and manual reordering.

use crate::task::{
    domain::{KanbanColumn, OwnerId, ProjectId, Task, TaskId},
    ports::{TaskEventSink, TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use super::guard::{TransitionError, TransitionGuard};

/// Errors for board operations.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// The underlying status change was rejected; a dependency-blocked
    /// drag fails exactly like the equivalent status request.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// A board operation referenced a task that does not exist for this
    /// owner.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// A reorder request referenced a task from a different project; the
    /// whole batch is aborted.
    #[error("task {task_id} belongs to a different project")]
    CrossProjectReorder {
        /// The offending task identifier.
        task_id: TaskId,
    },

    /// Persistence-layer failure.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// A project's task list grouped into the four kanban columns, each
/// ordered by `sort_order` ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    /// Tasks in the `to_do` column.
    pub to_do: Vec<Task>,
    /// Tasks in the `in_progress` column.
    pub in_progress: Vec<Task>,
    /// Tasks in the `review` column.
    pub review: Vec<Task>,
    /// Tasks in the `done` column.
    pub done: Vec<Task>,
}

/// Read-side kanban projection and board manipulation service.
#[derive(Clone)]
pub struct KanbanProjector<S, E, C>
where
    S: TaskStore,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    guard: TransitionGuard<S, E, C>,
    clock: Arc<C>,
}

impl<S, E, C> KanbanProjector<S, E, C>
where
    S: TaskStore,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    /// Creates a new projector delegating status changes to `guard`.
    #[must_use]
    pub const fn new(store: Arc<S>, guard: TransitionGuard<S, E, C>, clock: Arc<C>) -> Self {
        Self {
            store,
            guard,
            clock,
        }
    }

    /// Builds the four-column board view for a project.
    ///
    /// A pure read: groups the project's tasks by `kanban_column` and
    /// orders each group by `sort_order` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the project query fails.
    pub async fn project_board(
        &self,
        owner: OwnerId,
        project: ProjectId,
    ) -> Result<BoardView, BoardError> {
        let mut tasks = self.store.list_by_project(owner, project).await?;
        tasks.sort_by_key(Task::sort_order);

        let mut board = BoardView::default();
        for task in tasks {
            match task.kanban_column() {
                KanbanColumn::ToDo => board.to_do.push(task),
                KanbanColumn::InProgress => board.in_progress.push(task),
                KanbanColumn::Review => board.review.push(task),
                KanbanColumn::Done => board.done.push(task),
            }
        }
        Ok(board)
    }

    /// Moves a task to a column at the given position.
    ///
    /// A drag-and-drop column move is semantically a status change
    /// request: the target column translates to its status under the
    /// inverse of the fixed map and the transition guard decides. A
    /// blocked move leaves both status and column untouched. On
    /// acceptance the destination column is renumbered densely with the
    /// task at `target_position` (zero-based, clamped to the column
    /// length).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Transition`] when the guard rejects the
    /// move and [`BoardError::Store`] on persistence failures.
    pub async fn move_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        target_column: KanbanColumn,
        target_position: usize,
    ) -> Result<Task, BoardError> {
        let moved = self
            .guard
            .attempt_transition(owner, task_id, target_column.status())
            .await?;

        let mut column: Vec<Task> = self
            .store
            .list_by_project(owner, moved.project_id())
            .await?
            .into_iter()
            .filter(|task| task.kanban_column() == target_column && task.id() != moved.id())
            .collect();
        column.sort_by_key(Task::sort_order);
        let position = target_position.min(column.len());
        column.insert(position, moved);

        let mut updated_moved = None;
        for (index, task) in column.iter_mut().enumerate() {
            let order = i64::try_from(index + 1).unwrap_or(i64::MAX);
            if task.sort_order() != order {
                task.set_sort_order(order, &*self.clock);
                self.store.update(task).await?;
            }
            if task.id() == task_id {
                updated_moved = Some(task.clone());
            }
        }
        updated_moved.ok_or(BoardError::UnknownTask(task_id))
    }

    /// Reassigns `sort_order` as a dense 1..N sequence matching the
    /// given order.
    ///
    /// The entire batch is validated first: every id must exist, belong
    /// to the given project, and belong to the requesting owner.
    /// Violating any of these aborts the whole reorder with no partial
    /// writes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] or
    /// [`BoardError::CrossProjectReorder`] on validation failure and
    /// [`BoardError::Store`] on persistence failures.
    pub async fn reorder_within_project(
        &self,
        owner: OwnerId,
        project: ProjectId,
        ordered_task_ids: &[TaskId],
    ) -> Result<(), BoardError> {
        let mut validated = Vec::with_capacity(ordered_task_ids.len());
        for task_id in ordered_task_ids {
            let task = self
                .store
                .find_by_id(owner, *task_id)
                .await?
                .ok_or(BoardError::UnknownTask(*task_id))?;
            if task.project_id() != project {
                return Err(BoardError::CrossProjectReorder { task_id: *task_id });
            }
            validated.push(task);
        }

        for (index, task) in validated.iter_mut().enumerate() {
            let order = i64::try_from(index + 1).unwrap_or(i64::MAX);
            if task.sort_order() != order {
                task.set_sort_order(order, &*self.clock);
                self.store.update(task).await?;
            }
        }
        Ok(())
    }
}
