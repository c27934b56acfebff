//! Integration tests for the kanban board over the in-memory adapters.

use super::helpers::{Engine, TestResult, engine};
use atrium::task::{
    domain::{KanbanColumn, Task, TaskId, TaskStatus},
    ports::TaskStore,
    services::BoardError,
};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_drag_between_columns_is_a_status_change(engine: Engine) -> TestResult {
    let task = engine
        .add_task(engine.draft("Draggable").with_sort_order(1))
        .await?;

    let moved = engine
        .projector()
        .move_task(engine.owner, task.id(), KanbanColumn::InProgress, 0)
        .await?;
    ensure!(moved.status() == TaskStatus::InProgress);

    let board = engine
        .projector()
        .project_board(engine.owner, engine.project)
        .await?;
    ensure!(board.to_do.is_empty());
    let in_progress: Vec<TaskId> = board.in_progress.iter().map(Task::id).collect();
    ensure!(in_progress == [task.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_dependency_blocked_drag_leaves_the_board_untouched(engine: Engine) -> TestResult {
    let blocker = engine.add_task(engine.draft("Blocker")).await?;
    let blocked = engine
        .add_task(
            engine
                .draft("Blocked")
                .with_dependencies([blocker.id()])
                .with_sort_order(3),
        )
        .await?;

    let result = engine
        .projector()
        .move_task(engine.owner, blocked.id(), KanbanColumn::Done, 0)
        .await;
    match result {
        Err(BoardError::Transition(_)) => {}
        other => bail!("expected the drag to be rejected, got {other:?}"),
    }

    let stored = engine
        .store
        .find_by_id(engine.owner, blocked.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    ensure!(stored.status() == TaskStatus::Todo);
    ensure!(stored.kanban_column() == KanbanColumn::ToDo);
    ensure!(stored.sort_order() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reordering_rewrites_the_board_sequence(engine: Engine) -> TestResult {
    let a = engine.add_task(engine.draft("A").with_sort_order(1)).await?;
    let b = engine.add_task(engine.draft("B").with_sort_order(2)).await?;
    let c = engine.add_task(engine.draft("C").with_sort_order(3)).await?;

    engine
        .projector()
        .reorder_within_project(engine.owner, engine.project, &[b.id(), c.id(), a.id()])
        .await?;

    let board = engine
        .projector()
        .project_board(engine.owner, engine.project)
        .await?;
    let order: Vec<TaskId> = board.to_do.iter().map(Task::id).collect();
    ensure!(order == [b.id(), c.id(), a.id()]);
    Ok(())
}
