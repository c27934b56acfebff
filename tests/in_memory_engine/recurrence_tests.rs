//! Integration tests for recurring instance generation over the
//! in-memory adapters.

use super::helpers::{Engine, TestResult, engine};
use atrium::recurrence::{
    domain::{NewTemplate, RecurrenceKind, RecurrencePattern, RecurringTaskTemplate},
    ports::TemplateStore,
};
use chrono::{Datelike, Days, Utc};
use eyre::ensure;
use rstest::rstest;

/// Daily template anchored at the engine clock's today.
async fn daily_template(engine: &Engine) -> TestResult<RecurringTaskTemplate> {
    let pattern = RecurrencePattern::new(RecurrenceKind::Daily, 1)?;
    let template = RecurringTaskTemplate::new(
        NewTemplate::new(engine.owner, engine.project, "Stand-up notes", pattern),
        &*engine.clock,
    )?;
    engine.templates.insert(&template).await?;
    Ok(template)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_generation_pass_is_idempotent_per_date(engine: Engine) -> TestResult {
    let template = daily_template(&engine).await?;
    let tomorrow = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .ok_or_else(|| eyre::eyre!("valid date"))?;

    let first_pass = engine
        .scheduler()
        .run_generation_pass(engine.owner, tomorrow)
        .await?;
    ensure!(first_pass.len() == 1);
    ensure!(
        first_pass
            .first()
            .is_some_and(|task| task.template_id() == Some(template.id()))
    );

    let second_pass = engine
        .scheduler()
        .run_generation_pass(engine.owner, tomorrow)
        .await?;
    ensure!(second_pass.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_instances_appear_on_the_board(engine: Engine) -> TestResult {
    let template = daily_template(&engine).await?;
    let today = Utc::now().date_naive();

    engine
        .scheduler()
        .generate_due_instances(engine.owner, template.id(), today)
        .await?;

    let board = engine
        .projector()
        .project_board(engine.owner, engine.project)
        .await?;
    ensure!(board.to_do.len() == 1);
    ensure!(
        board
            .to_do
            .first()
            .is_some_and(|task| task.name() == "Stand-up notes" && !task.completed())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_templates_only_fire_on_their_weekdays(engine: Engine) -> TestResult {
    let today = Utc::now().date_naive();
    let pattern = RecurrencePattern::new(RecurrenceKind::Weekly, 1)?.with_weekdays([
        atrium::recurrence::domain::DayOfWeek::from_chrono(today.weekday()),
    ]);
    let template = RecurringTaskTemplate::new(
        NewTemplate::new(engine.owner, engine.project, "Weekly review", pattern),
        &*engine.clock,
    )?;
    engine.templates.insert(&template).await?;

    let on_day = engine
        .scheduler()
        .generate_due_instances(engine.owner, template.id(), today)
        .await?;
    ensure!(on_day.len() == 1);

    let off_day = today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| eyre::eyre!("valid date"))?;
    let next = engine
        .scheduler()
        .generate_due_instances(engine.owner, template.id(), off_day)
        .await?;
    ensure!(next.is_empty());
    Ok(())
}
