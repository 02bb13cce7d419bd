//! Shared world state for task lifecycle BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use rstest::fixture;
use taskflow::{
    identity::{
        adapters::memory::InMemoryUserDirectory,
        domain::{Actor, Role, UserId, UserProfile},
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{TaskLifecycleError, TaskLifecycleService},
    },
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryUserDirectory, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestTaskService,
    pub users: Arc<InMemoryUserDirectory>,
    pub actors: HashMap<String, Actor>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world with no users and no task.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&users),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            users,
            actors: HashMap::new(),
            task: None,
            last_result: None,
        }
    }

    /// Registers a user with the directory under their display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the profile.
    pub fn register(&mut self, name: &str, role: Role) -> eyre::Result<()> {
        let profile = UserProfile::new(
            UserId::new(),
            name,
            format!("{}@example.com", name.to_lowercase()),
            role,
        );
        self.actors.insert(name.to_owned(), profile.as_actor());
        self.users.insert(profile)?;
        Ok(())
    }

    /// Looks up a registered actor by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no user with that name was registered.
    pub fn actor(&self, name: &str) -> eyre::Result<Actor> {
        self.actors
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown user {name} in scenario world"))
    }

    /// Returns the scenario's task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been assigned yet.
    pub fn task(&self) -> eyre::Result<&Task> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Records the outcome of a lifecycle call, keeping the latest task.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
