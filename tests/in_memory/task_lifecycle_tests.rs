//! In-memory integration tests for end-to-end task lifecycles.

use super::helpers::{Org, organisation};
use eyre::{bail, ensure};
use rstest::rstest;
use taskflow::{
    error::ErrorKind,
    task::{
        domain::TaskStatus,
        ports::TaskRepository,
        services::{ApproveCompletionRequest, TaskLifecycleError},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_accept_complete_approve(organisation: eyre::Result<Org>) -> eyre::Result<()> {
    let org = organisation?;
    let task = org.alice_assigns_to_bob().await?;
    ensure!(task.status() == TaskStatus::Pending);

    let accepted = org.service.accept_task(&org.bob, task.id()).await?;
    ensure!(accepted.status() == TaskStatus::InProgress);

    let completed = org.service.mark_complete(&org.bob, task.id()).await?;
    ensure!(completed.status() == TaskStatus::Completed);

    let approved = org
        .service
        .approve_completion(
            &org.alice,
            task.id(),
            ApproveCompletionRequest::approve().with_remark("Thorough work"),
        )
        .await?;

    ensure!(approved.status() == TaskStatus::Approved);
    ensure!(approved.completed_at() == completed.completed_at());
    ensure!(approved.completed_at().is_some());
    ensure!(approved.remark().map(|r| r.as_str()) == Some("Thorough work"));
    ensure!(approved.assigner() == org.alice.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassign_in_progress_task(organisation: eyre::Result<Org>) -> eyre::Result<()> {
    let org = organisation?;
    let task = org.alice_assigns_to_bob().await?;
    org.service.accept_task(&org.bob, task.id()).await?;

    let reassigned = org
        .service
        .reassign_task(&org.alice, task.id(), org.carol.id())
        .await?;
    ensure!(reassigned.status() == TaskStatus::Pending);
    ensure!(reassigned.receiver() == org.carol.id());

    let stale = org.service.mark_complete(&org.bob, task.id()).await;
    ensure!(stale.is_err_and(|err| err.kind() == ErrorKind::Unauthorized));

    let accepted = org.service.accept_task(&org.carol, task.id()).await?;
    ensure!(accepted.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_completion_must_be_reaccepted(organisation: eyre::Result<Org>) -> eyre::Result<()> {
    let org = organisation?;
    let task = org.alice_assigns_to_bob().await?;
    org.service.accept_task(&org.bob, task.id()).await?;
    org.service.mark_complete(&org.bob, task.id()).await?;
    let rejected = org
        .service
        .approve_completion(
            &org.alice,
            task.id(),
            ApproveCompletionRequest::reject().with_remark("Missing rubric"),
        )
        .await?;
    ensure!(rejected.status() == TaskStatus::Pending);

    let accepted_again = org.service.accept_task(&org.bob, task.id()).await?;
    ensure!(accepted_again.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone(organisation: eyre::Result<Org>) -> eyre::Result<()> {
    let org = organisation?;
    let task = org.alice_assigns_to_bob().await?;
    org.service
        .add_comment(&org.bob, task.id(), "Will start Monday")
        .await?;

    let denied = org.service.delete_task(&org.bob, task.id()).await;
    ensure!(denied.is_err_and(|err| err.kind() == ErrorKind::Unauthorized));

    org.service.delete_task(&org.alice, task.id()).await?;
    ensure!(org.repository.find_by_id(task.id()).await?.is_none());

    match org.service.comments(&org.alice, task.id()).await {
        Err(TaskLifecycleError::TaskNotFound(id)) => ensure!(id == task.id()),
        other => bail!("expected task not found, got {other:?}"),
    }
    let again = org.service.delete_task(&org.alice, task.id()).await;
    ensure!(again.is_err_and(|err| err.kind() == ErrorKind::NotFound));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboards_reflect_lifecycle(organisation: eyre::Result<Org>) -> eyre::Result<()> {
    let org = organisation?;
    let task = org.alice_assigns_to_bob().await?;

    ensure!(org.service.assigned_tasks(&org.alice).await?.len() == 1);
    ensure!(org.service.accepted_tasks(&org.bob).await?.is_empty());

    org.service.accept_task(&org.bob, task.id()).await?;
    ensure!(org.service.accepted_tasks(&org.bob).await?.len() == 1);

    org.service.mark_complete(&org.bob, task.id()).await?;
    ensure!(org.service.accepted_tasks(&org.bob).await?.is_empty());
    let completed = org.service.my_completed_tasks(&org.bob).await?;
    ensure!(completed.len() == 1);
    ensure!(completed.iter().all(|view| view.receiver.name.as_deref() == Some("Bob")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn milestones_are_staff_only(organisation: eyre::Result<Org>) -> eyre::Result<()> {
    let org = organisation?;
    let denied = org.milestones.create_milestone(&org.bob, "Exam week").await;
    ensure!(denied.is_err_and(|err| err.kind() == ErrorKind::Unauthorized));

    org.milestones.create_milestone(&org.alice, "Exam week").await?;
    let listed = org.milestones.list_milestones().await?;
    ensure!(listed.len() == 1);
    ensure!(listed.iter().all(|m| m.staff_name.as_deref() == Some("Alice")));
    Ok(())
}
