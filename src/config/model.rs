// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::LogWriteMode;

/// Top-level configuration exactly as deserialized from TOML.
///
/// ```toml
/// [config]
/// environment = "live"
/// spawn_timeout = "5s"
///
/// [[task]]
/// name = "report.daily"
/// cmd = "./bin/report"
/// cron = "0 9 * * *"
///
/// [[task]]
/// name = "cleanup.tmp"
/// cmd = "find /tmp/app -mtime +1 -delete"
/// cron = "*/15 * * * *"
/// environments = ["live"]
/// ```
///
/// Tasks are an array of tables so their order in the file is the
/// registration order. Use [`ConfigFile::try_from`] to validate.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Environment used when neither `--env` nor `SCHEDRUN_ENV` is set.
    #[serde(default)]
    pub environment: Option<String>,

    /// Upper bound on how long spawning one child process may take
    /// (e.g. `"500ms"`, `"5s"`). Does not limit the child's run time.
    #[serde(default = "default_spawn_timeout")]
    pub spawn_timeout: String,

    /// IANA time zone for evaluating cron schedules. Local time if unset.
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_spawn_timeout() -> String {
    "5s".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            environment: None,
            spawn_timeout: default_spawn_timeout(),
            timezone: None,
        }
    }
}

/// One `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Unique dotted name, e.g. `"report.daily"`.
    pub name: String,

    /// Shell command executed by `task:run`.
    pub cmd: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Five-field cron schedule. Tasks without one only run on demand.
    #[serde(default)]
    pub cron: Option<String>,

    /// Environments this task may be scheduled in; empty means all.
    #[serde(default)]
    pub environments: Vec<String>,

    /// Optional log file receiving the task's captured output.
    #[serde(default)]
    pub log: Option<LogConfig>,

    /// Working directory for the shell command.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

/// `log = { path = "...", mode = "append" }` on a task.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub path: PathBuf,

    #[serde(default)]
    pub mode: LogWriteMode,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>`, so every task name is
/// unique and well-formed, every cron string parses and the global settings
/// are resolved.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: Vec<TaskConfig>,
    spawn_timeout: Duration,
    timezone: Option<chrono_tz::Tz>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        task: Vec<TaskConfig>,
        spawn_timeout: Duration,
        timezone: Option<chrono_tz::Tz>,
    ) -> Self {
        Self {
            config,
            task,
            spawn_timeout,
            timezone,
        }
    }

    pub fn spawn_timeout(&self) -> Duration {
        self.spawn_timeout
    }

    pub fn timezone(&self) -> Option<chrono_tz::Tz> {
        self.timezone
    }
}
