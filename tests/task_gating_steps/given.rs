//! Given steps for task gating BDD scenarios.

use super::world::{TaskGatingWorld, run_async};
use atrium::task::{
    domain::{NewTask, Task},
    ports::TaskStore,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a task "{name}""#)]
fn a_task(world: &mut TaskGatingWorld, name: String) -> Result<(), eyre::Report> {
    let task = Task::new(
        NewTask::new(world.owner, world.project, name.clone()),
        &*world.clock,
    )?;
    run_async(world.store.insert(&task)).wrap_err("store scenario task")?;
    world.tasks_by_name.insert(name, task.id());
    Ok(())
}

#[given(r#"a dependent task "{name}" blocked by "{dependency}""#)]
fn a_dependent_task(
    world: &mut TaskGatingWorld,
    name: String,
    dependency: String,
) -> Result<(), eyre::Report> {
    let dependency_id = world.task_id(&dependency)?;
    let task = Task::new(
        NewTask::new(world.owner, world.project, name.clone())
            .with_dependencies([dependency_id]),
        &*world.clock,
    )?;
    run_async(world.store.insert(&task)).wrap_err("store scenario task")?;
    world.tasks_by_name.insert(name, task.id());
    Ok(())
}
