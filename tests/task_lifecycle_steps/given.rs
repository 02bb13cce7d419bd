//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use chrono::{Duration, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskflow::{identity::domain::Role, task::services::CreateTaskRequest};

#[given(r#"a staff member named "{name}""#)]
fn staff_member(world: &mut TaskLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    world.register(&name, Role::Staff)
}

#[given(r#"a student named "{name}""#)]
fn student(world: &mut TaskLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    world.register(&name, Role::Student)
}

#[given(r#""{assigner}" has assigned a task to "{receiver}" due in {days:u32} days"#)]
fn task_assigned(
    world: &mut TaskLifecycleWorld,
    assigner: String,
    receiver: String,
    days: u32,
) -> Result<(), eyre::Report> {
    let assigner = world.actor(&assigner)?;
    let receiver = world.actor(&receiver)?;
    let request = CreateTaskRequest::new(
        "Prepare lab report",
        "Write up the week 3 lab results",
        receiver.id(),
        Utc::now() + Duration::days(i64::from(days)),
    );
    let created = run_async(world.service.create_task(&assigner, request))
        .wrap_err("create task for lifecycle scenario")?;
    world.task = Some(created);
    Ok(())
}
