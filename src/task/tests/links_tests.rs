//! Unit tests for dependency-list editing and deletion cleanup.

use super::support::{EngineHarness, TestResult, harness};
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskStore,
    services::DependencyUpdateError,
};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacing_dependencies_persists_the_new_list(harness: EngineHarness) -> TestResult {
    let dependency = harness.insert_task(harness.draft("Dependency")).await?;
    let task = harness.insert_task(harness.draft("Task")).await?;

    let updated = harness
        .links()
        .replace_dependencies(harness.owner, task.id(), vec![dependency.id()])
        .await?;

    ensure!(updated.dependency_task_ids() == [dependency.id()]);
    let stored = harness
        .store
        .find_by_id(harness.owner, task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    ensure!(stored.dependency_task_ids() == [dependency.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn self_dependency_is_rejected(harness: EngineHarness) -> TestResult {
    let task = harness.insert_task(harness.draft("Task")).await?;

    let result = harness
        .links()
        .replace_dependencies(harness.owner, task.id(), vec![task.id()])
        .await;
    match result {
        Err(DependencyUpdateError::Domain(TaskDomainError::SelfDependency(id))) => {
            ensure!(id == task.id());
        }
        other => bail!("expected SelfDependency, got {other:?}"),
    }

    let stored = harness
        .store
        .find_by_id(harness.owner, task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    ensure!(stored.dependency_task_ids().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unresolvable_dependency_reference_is_rejected(harness: EngineHarness) -> TestResult {
    let task = harness.insert_task(harness.draft("Task")).await?;
    let dangling = TaskId::new();

    let result = harness
        .links()
        .replace_dependencies(harness.owner, task.id(), vec![dangling])
        .await;

    match result {
        Err(DependencyUpdateError::InvalidReference(id)) => ensure!(id == dangling),
        other => bail!("expected InvalidReference, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_target_task_is_not_found(harness: EngineHarness) -> TestResult {
    let result = harness
        .links()
        .replace_dependencies(harness.owner, TaskId::new(), Vec::new())
        .await;

    ensure!(matches!(result, Err(DependencyUpdateError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_strips_it_from_dependents(harness: EngineHarness) -> TestResult {
    let doomed = harness.insert_task(harness.draft("Doomed")).await?;
    let keeper = harness.insert_task(harness.draft("Keeper")).await?;
    let dependent = harness
        .insert_task(
            harness
                .draft("Dependent")
                .with_dependencies([doomed.id(), keeper.id()]),
        )
        .await?;

    harness.links().delete_task(harness.owner, doomed.id()).await?;

    let stored = harness
        .store
        .find_by_id(harness.owner, dependent.id())
        .await?
        .ok_or_else(|| eyre::eyre!("dependent should exist"))?;
    ensure!(stored.dependency_task_ids() == [keeper.id()]);
    ensure!(
        harness
            .store
            .find_by_id(harness.owner, doomed.id())
            .await?
            .is_none()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unknown_task_is_not_found(harness: EngineHarness) -> TestResult {
    let result = harness.links().delete_task(harness.owner, TaskId::new()).await;
    ensure!(matches!(result, Err(DependencyUpdateError::NotFound(_))));
    Ok(())
}
