//! Engine configuration.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TASKFLOW_*` prefix)
//! 2. `taskflow.toml` in the working directory, when present
//! 3. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `TASKFLOW_COMMENT_READ_SCOPE` maps to `comment_read_scope`,
//! `TASKFLOW_MAX_COMMENT_LENGTH` to `max_comment_length`, and so on.

use crate::task::domain::ReadScope;
use chrono::Duration;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "taskflow.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TASKFLOW_";

/// Tunables for the task lifecycle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Who may read tasks and their comments.
    #[serde(default)]
    pub comment_read_scope: ReadScope,
    /// Minimum distance, in seconds, between now and any new deadline.
    #[serde(default)]
    pub min_deadline_lead_secs: u32,
    /// Upper bound on comment length in characters.
    #[serde(default = "default_max_comment_length")]
    pub max_comment_length: usize,
}

const fn default_max_comment_length() -> usize {
    2000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            comment_read_scope: ReadScope::default(),
            min_deadline_lead_secs: 0,
            max_comment_length: default_max_comment_length(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("configuration error: {0}")]
    Figment(#[source] Box<figment::Error>),

    /// A value was well-formed but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl EngineConfig {
    /// Loads configuration from [`CONFIG_FILE`] and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed or a value is out
    /// of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads configuration from `path` and the environment.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed or a value is out
    /// of range.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the provider chain.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Returns the minimum deadline lead as a duration.
    #[must_use]
    pub fn min_deadline_lead(&self) -> Duration {
        Duration::seconds(i64::from(self.min_deadline_lead_secs))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_comment_length == 0 {
            return Err(ConfigError::Invalid("max_comment_length must be positive"));
        }
        Ok(())
    }
}
