//! Then steps for task gating BDD scenarios.

use super::world::{TaskGatingWorld, run_async};
use atrium::task::{domain::TaskStatus, ports::TaskStore, services::TransitionError};
use rstest_bdd_macros::then;

#[then(r#"the task "{name}" has status "{status}""#)]
fn task_has_status(
    world: &TaskGatingWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status: {err}"))?;

    let task_id = world.task_id(&name)?;
    let task = run_async(world.store.find_by_id(world.owner, task_id))?
        .ok_or_else(|| eyre::eyre!("scenario task {name:?} should exist"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the move is rejected for incomplete dependencies")]
fn move_rejected_for_dependencies(world: &TaskGatingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(TransitionError::DependenciesIncomplete { .. })
    ) {
        return Err(eyre::eyre!(
            "expected DependenciesIncomplete error, got {result:?}"
        ));
    }
    Ok(())
}
