//! Then steps for task lifecycle BDD scenarios.

use super::world::TaskLifecycleWorld;
use rstest_bdd_macros::then;
use taskflow::{error::ErrorKind, task::domain::TaskStatus};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.task()?.status();

    if actual != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            actual.as_str()
        ));
    }
    Ok(())
}

#[then(r#"the task receiver is "{name}""#)]
fn task_receiver_is(world: &TaskLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.actor(&name)?.id();
    if world.task()?.receiver() != expected {
        return Err(eyre::eyre!("expected the task to be received by {name}"));
    }
    Ok(())
}

#[then("the task has a completion time")]
fn task_has_completion_time(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    if world.task()?.completed_at().is_none() {
        return Err(eyre::eyre!("expected completedAt to be set"));
    }
    Ok(())
}

#[then(r#"the task remark is "{remark}""#)]
fn task_remark_is(world: &TaskLifecycleWorld, remark: String) -> Result<(), eyre::Report> {
    let actual = world.task()?.remark().map(|r| r.as_str().to_owned());
    if actual.as_deref() != Some(remark.as_str()) {
        return Err(eyre::eyre!("expected remark {remark:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the last action is rejected as unauthorized")]
fn last_action_unauthorized(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;

    match result {
        Err(err) if err.kind() == ErrorKind::Unauthorized => Ok(()),
        other => Err(eyre::eyre!("expected an unauthorized error, got {other:?}")),
    }
}
