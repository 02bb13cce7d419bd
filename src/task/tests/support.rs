//! Shared fixtures for task unit tests.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, Role, UserId, UserProfile},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use chrono::{DateTime, Duration, Utc};
use mockable::{Clock, DefaultClock, MockClock};
use rstest::fixture;
use std::sync::atomic::{AtomicI64, Ordering};

/// Service wired to in-memory adapters.
pub(super) type TestService<C = DefaultClock> =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryUserDirectory, C>;

/// Service, repository and three registered users.
pub(super) struct Harness<C: Clock + Send + Sync = DefaultClock> {
    pub(super) service: TestService<C>,
    pub(super) repository: Arc<InMemoryTaskRepository>,
    pub(super) users: Arc<InMemoryUserDirectory>,
    pub(super) assigner: Actor,
    pub(super) receiver: Actor,
    pub(super) outsider: Actor,
}

impl Harness {
    pub(super) fn new() -> eyre::Result<Self> {
        Self::with_clock(DefaultClock, EngineConfig::default())
    }

    pub(super) fn with_config(config: EngineConfig) -> eyre::Result<Self> {
        Self::with_clock(DefaultClock, config)
    }
}

impl<C: Clock + Send + Sync> Harness<C> {
    pub(super) fn with_clock(clock: C, config: EngineConfig) -> eyre::Result<Self> {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let assigner = register(&users, "Asha", Role::Staff)?;
        let receiver = register(&users, "Bilal", Role::Student)?;
        let outsider = register(&users, "Chen", Role::Student)?;
        let service =
            TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&users), Arc::new(clock))
                .with_config(config);
        Ok(Self {
            service,
            repository,
            users,
            assigner,
            receiver,
            outsider,
        })
    }

    /// Registers one more user.
    pub(super) fn register(&self, name: &str, role: Role) -> eyre::Result<Actor> {
        register(&self.users, name, role)
    }

    /// Assigns a task from `assigner` to `receiver`, due in a week.
    pub(super) async fn assign(&self) -> Result<Task, TaskLifecycleError> {
        self.assign_titled("Write lab report").await
    }

    pub(super) async fn assign_titled(&self, title: &str) -> Result<Task, TaskLifecycleError> {
        self.service
            .create_task(
                &self.assigner,
                CreateTaskRequest::new(
                    title,
                    "Summarise the week's measurements",
                    self.receiver.id(),
                    in_days(7),
                ),
            )
            .await
    }
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

/// Returns a point `days` days from the real current time.
pub(super) fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

/// Clock frozen at `at`.
pub(super) fn frozen_clock(at: DateTime<Utc>) -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(at);
    clock
}

/// Clock starting at the real current time that advances one second per
/// reading.
pub(super) fn stepping_clock() -> MockClock {
    let start = Utc::now();
    let ticks = AtomicI64::new(0);
    let mut clock = MockClock::new();
    clock
        .expect_utc()
        .returning(move || start + Duration::seconds(ticks.fetch_add(1, Ordering::SeqCst)));
    clock
}

#[fixture]
pub(super) fn harness() -> eyre::Result<Harness> {
    Harness::new()
}
