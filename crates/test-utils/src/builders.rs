#![allow(dead_code)]

use std::path::PathBuf;

use schedrun::config::{ConfigFile, ConfigSection, LogConfig, RawConfigFile, TaskConfig};
use schedrun::types::LogWriteMode;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.config.task.push(task);
        self
    }

    pub fn with_environment(mut self, env: &str) -> Self {
        self.config.config.environment = Some(env.to_string());
        self
    }

    pub fn with_spawn_timeout(mut self, timeout: &str) -> Self {
        self.config.config.spawn_timeout = timeout.to_string();
        self
    }

    pub fn with_timezone(mut self, tz: &str) -> Self {
        self.config.config.timezone = Some(tz.to_string());
        self
    }

    /// The raw, unvalidated config (for testing validation itself).
    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(name: &str, cmd: &str) -> Self {
        Self {
            task: TaskConfig {
                name: name.to_string(),
                cmd: cmd.to_string(),
                description: None,
                cron: None,
                environments: vec![],
                log: None,
                working_dir: None,
            },
        }
    }

    pub fn cron(mut self, expr: &str) -> Self {
        self.task.cron = Some(expr.to_string());
        self
    }

    pub fn environment(mut self, env: &str) -> Self {
        self.task.environments.push(env.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.task.description = Some(text.to_string());
        self
    }

    pub fn log(mut self, path: impl Into<PathBuf>, mode: LogWriteMode) -> Self {
        self.task.log = Some(LogConfig {
            path: path.into(),
            mode,
        });
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.task.working_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
