//! Concurrent writers racing on the same task.

use std::sync::Arc;

use super::helpers::{Org, organisation};
use eyre::ensure;
use rstest::rstest;
use chrono::{Duration, Utc};
use taskflow::{
    error::ErrorKind,
    task::{domain::TaskStatus, ports::TaskRepository, services::CreateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_comments_never_lose_writes(organisation: eyre::Result<Org>) -> eyre::Result<()> {
    let org = organisation?;
    let task_id = org.alice_assigns_to_bob().await?.id();
    let service = Arc::new(org.service);

    let mut handles = Vec::new();
    for (n, actor) in [org.alice, org.bob].into_iter().cycle().take(16).enumerate() {
        let worker = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            worker
                .add_comment(&actor, task_id, &format!("note {n}"))
                .await
        }));
    }

    let mut succeeded = 0_usize;
    for handle in handles {
        match handle.await? {
            Ok(_) => succeeded += 1,
            Err(err) => ensure!(err.kind() == ErrorKind::Conflict, "unexpected error: {err}"),
        }
    }

    let comments = service.comments(&org.alice, task_id).await?;
    ensure!(succeeded >= 1);
    ensure!(comments.len() == succeeded);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn accept_racing_reassign_stays_consistent(organisation: eyre::Result<Org>) -> eyre::Result<()> {
    let org = organisation?;
    let service = Arc::new(org.service);

    for _ in 0..20 {
        let task_id = {
            let task = service
                .create_task(
                    &org.alice,
                    CreateTaskRequest::new(
                        "Race",
                        "Race body",
                        org.bob.id(),
                        Utc::now() + Duration::days(1),
                    ),
                )
                .await?;
            task.id()
        };

        let accept = {
            let worker = Arc::clone(&service);
            let bob = org.bob;
            tokio::spawn(async move { worker.accept_task(&bob, task_id).await })
        };
        let reassign = {
            let worker = Arc::clone(&service);
            let (alice, carol) = (org.alice, org.carol);
            tokio::spawn(async move { worker.reassign_task(&alice, task_id, carol.id()).await })
        };
        let accepted = accept.await?;
        let reassigned = reassign.await?;

        let stored = org
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| eyre::eyre!("task should still exist"))?;

        if stored.status() == TaskStatus::InProgress {
            ensure!(stored.receiver() == org.bob.id());
            ensure!(accepted.is_ok());
        } else {
            ensure!(stored.status() == TaskStatus::Pending);
        }
        if reassigned.is_ok() && accepted.is_err() {
            ensure!(stored.receiver() == org.carol.id());
        }
    }
    Ok(())
}
