//! When steps for task gating BDD scenarios.

use super::world::{TaskGatingWorld, run_async};
use atrium::task::domain::TaskStatus;
use rstest_bdd_macros::when;

#[when(r#"the task "{name}" is moved to "{status}""#)]
fn move_task_to_status(
    world: &mut TaskGatingWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&name)?;
    let requested = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid scenario status: {err}"))?;

    let result = run_async(
        world
            .guard
            .attempt_transition(world.owner, task_id, requested),
    );
    world.last_transition_result = Some(result);
    Ok(())
}
