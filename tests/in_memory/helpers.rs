//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskflow::{
    identity::{
        adapters::memory::InMemoryUserDirectory,
        domain::{Actor, Role, UserId, UserProfile},
    },
    milestone::{adapters::memory::InMemoryMilestoneRepository, services::MilestoneService},
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
    },
};
use tracing_subscriber::EnvFilter;

/// Task service wired to in-memory adapters.
pub type Service = TaskLifecycleService<InMemoryTaskRepository, InMemoryUserDirectory, DefaultClock>;

/// Milestone service wired to in-memory adapters.
pub type Milestones =
    MilestoneService<InMemoryMilestoneRepository, InMemoryUserDirectory, DefaultClock>;

/// A small organisation: one staff member and two students.
pub struct Org {
    pub service: Service,
    pub milestones: Milestones,
    pub repository: Arc<InMemoryTaskRepository>,
    pub alice: Actor,
    pub bob: Actor,
    pub carol: Actor,
}

impl Org {
    /// Alice assigns a task to Bob, due in a week.
    ///
    /// # Errors
    ///
    /// Returns the service error if creation fails.
    pub async fn alice_assigns_to_bob(&self) -> Result<Task, TaskLifecycleError> {
        self.service
            .create_task(
                &self.alice,
                CreateTaskRequest::new(
                    "Grade assignments",
                    "Grade the week 4 submissions",
                    self.bob.id(),
                    Utc::now() + Duration::days(7),
                ),
            )
            .await
    }
}

/// Installs a test-writer subscriber once per process; `RUST_LOG` controls
/// verbosity.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    drop(installed);
}

fn register(users: &InMemoryUserDirectory, name: &str, role: Role) -> eyre::Result<Actor> {
    let profile = UserProfile::new(
        UserId::new(),
        name,
        format!("{}@example.com", name.to_lowercase()),
        role,
    );
    let actor = profile.as_actor();
    users.insert(profile)?;
    Ok(actor)
}

/// Provides a fresh organisation for each test.
///
/// # Errors
///
/// Returns an error if a user cannot be registered.
#[fixture]
pub fn organisation() -> eyre::Result<Org> {
    init_tracing();
    let users = Arc::new(InMemoryUserDirectory::new());
    let repository = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    let alice = register(&users, "Alice", Role::Staff)?;
    let bob = register(&users, "Bob", Role::Student)?;
    let carol = register(&users, "Carol", Role::Student)?;
    Ok(Org {
        service: TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&users),
            Arc::clone(&clock),
        ),
        milestones: MilestoneService::new(
            Arc::new(InMemoryMilestoneRepository::new()),
            users,
            clock,
        ),
        repository,
        alice,
        bob,
        carol,
    })
}
