// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedrunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task `{0}` does not exist")]
    TaskNotFound(String),

    #[error("Task `{0}` is already registered")]
    DuplicateTask(String),

    #[error("Invalid task name `{0}` (expected dotted segments of [A-Za-z0-9_-])")]
    InvalidTaskName(String),

    #[error("Malformed cron expression `{expression}`: {reason}")]
    MalformedCron { expression: String, reason: String },

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("Task `{task}` failed: {detail}")]
    TaskExecution { task: String, detail: String },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure to start a child process for a due task.
///
/// Always scoped to a single task; a scheduled pass records it and moves on.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("failed to spawn process for task `{task}`: {source}")]
    Spawn {
        task: String,
        #[source]
        source: std::io::Error,
    },

    #[error("spawning process for task `{task}` did not complete within {timeout:?}")]
    Timeout { task: String, timeout: Duration },

    #[error("spawn worker for task `{task}` failed: {reason}")]
    Join { task: String, reason: String },
}

impl LaunchError {
    pub fn task(&self) -> &str {
        match self {
            LaunchError::Spawn { task, .. }
            | LaunchError::Timeout { task, .. }
            | LaunchError::Join { task, .. } => task,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SchedrunError>;
