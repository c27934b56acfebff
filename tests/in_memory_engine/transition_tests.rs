//! Integration tests for dependency-gated transitions and sub-task
//! propagation over the in-memory adapters.

use super::helpers::{Engine, TestResult, engine};
use atrium::task::{domain::TaskStatus, ports::TaskStore, services::TransitionError};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_task_chain_completes_in_dependency_order(engine: Engine) -> TestResult {
    let outline = engine.add_task(engine.draft("Draft outline")).await?;
    let feedback = engine.add_task(engine.draft("Get feedback")).await?;
    let publish = engine
        .add_task(
            engine
                .draft("Publish")
                .with_dependencies([outline.id(), feedback.id()]),
        )
        .await?;

    let blocked = engine
        .guard()
        .attempt_transition(engine.owner, publish.id(), TaskStatus::InProgress)
        .await;
    match blocked {
        Err(TransitionError::DependenciesIncomplete { blocking, .. }) => {
            let names: Vec<&str> = blocking.iter().map(|b| b.name.as_str()).collect();
            ensure!(names == ["Draft outline", "Get feedback"]);
        }
        other => bail!("expected DependenciesIncomplete, got {other:?}"),
    }

    engine.transition(&outline, TaskStatus::Completed).await?;
    engine.transition(&feedback, TaskStatus::Completed).await?;

    let started = engine.transition(&publish, TaskStatus::InProgress).await?;
    ensure!(started.status() == TaskStatus::InProgress);

    // The second completion opened the gate, exactly once.
    let events = engine.events.recorded()?;
    let unblocks: Vec<_> = events
        .iter()
        .filter(|event| event.task_id == publish.id())
        .collect();
    ensure!(unblocks.len() == 1);
    ensure!(
        unblocks
            .first()
            .is_some_and(|event| event.unblocking_task_id == feedback.id())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_completion_rolls_up_and_back(engine: Engine) -> TestResult {
    let parent = engine
        .add_task(
            engine
                .draft("Release checklist")
                .with_sub_task_completion_required(true),
        )
        .await?;
    let parent = engine.transition(&parent, TaskStatus::InProgress).await?;
    let tests = engine
        .add_task(engine.draft("Run tests").with_parent(parent.id()))
        .await?;
    let notes = engine
        .add_task(engine.draft("Write notes").with_parent(parent.id()))
        .await?;

    engine.transition(&tests, TaskStatus::Completed).await?;
    let parent_mid = engine
        .store
        .find_by_id(engine.owner, parent.id())
        .await?
        .ok_or_else(|| eyre::eyre!("parent should exist"))?;
    ensure!(parent_mid.status() == TaskStatus::InProgress);

    engine.transition(&notes, TaskStatus::Completed).await?;
    let parent_done = engine
        .store
        .find_by_id(engine.owner, parent.id())
        .await?
        .ok_or_else(|| eyre::eyre!("parent should exist"))?;
    ensure!(parent_done.status() == TaskStatus::Completed);
    ensure!(parent_done.completed_at().is_some());

    engine.transition(&tests, TaskStatus::Todo).await?;
    let parent_reverted = engine
        .store
        .find_by_id(engine.owner, parent.id())
        .await?
        .ok_or_else(|| eyre::eyre!("parent should exist"))?;
    ensure!(parent_reverted.status() == TaskStatus::InProgress);
    ensure!(parent_reverted.completed_at().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_never_cross_owner_boundaries(engine: Engine) -> TestResult {
    let task = engine.add_task(engine.draft("Private task")).await?;
    let stranger = atrium::task::domain::OwnerId::new();

    let result = engine
        .guard()
        .attempt_transition(stranger, task.id(), TaskStatus::InProgress)
        .await;

    ensure!(matches!(result, Err(TransitionError::NotFound(_))));
    Ok(())
}
