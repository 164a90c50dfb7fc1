// src/task/descriptor.rs

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::cron::CronExpression;
use crate::errors::{Result, SchedrunError};
use crate::exec::output::OutputTarget;

static TASK_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*$").expect("task name regex is valid")
});

/// A unit of work that can be run by name.
///
/// Implementations write user-facing output through the [`TaskContext`];
/// returning `Err` (or panicking) marks the run as failed without taking
/// down the runner.
pub trait Task: Send + Sync {
    fn run(&self, ctx: &mut TaskContext, args: &[String]) -> anyhow::Result<()>;
}

/// Per-invocation state handed to a [`Task`] body.
#[derive(Debug, Clone)]
pub struct TaskContext {
    task: String,
    output: Vec<String>,
}

impl TaskContext {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            output: Vec::new(),
        }
    }

    pub fn task_name(&self) -> &str {
        &self.task
    }

    /// Record one line of task output.
    pub fn writeln(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    pub fn into_output(self) -> Vec<String> {
        self.output
    }
}

/// Program plus arguments for a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Builds the command line that runs a single task in a child process.
pub trait CommandFactory: Send + Sync + fmt::Debug {
    fn command_line(&self, executable: &Path, environment: &str) -> CommandLine;
}

/// Default factory: `<exe> [--config <path>] --env=<env> task:run <name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRunCommand {
    task: String,
    config: Option<PathBuf>,
}

impl TaskRunCommand {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            config: None,
        }
    }

    /// Forward a config file path so the child loads the same registry.
    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = Some(config.into());
        self
    }
}

impl CommandFactory for TaskRunCommand {
    fn command_line(&self, executable: &Path, environment: &str) -> CommandLine {
        let mut args: Vec<OsString> = Vec::new();
        if let Some(ref config) = self.config {
            args.push("--config".into());
            args.push(config.clone().into_os_string());
        }
        args.push(format!("--env={environment}").into());
        args.push("task:run".into());
        args.push(self.task.clone().into());

        CommandLine {
            program: executable.to_path_buf(),
            args,
        }
    }
}

/// Immutable registration record for a schedulable unit of work.
///
/// Built once at bootstrap through [`TaskDescriptor::builder`] and shared
/// as `Arc<TaskDescriptor>` by the registry afterwards.
#[derive(Clone)]
pub struct TaskDescriptor {
    name: String,
    description: Option<String>,
    cron: Option<CronExpression>,
    environments: BTreeSet<String>,
    command_factory: Arc<dyn CommandFactory>,
    body: Arc<dyn Task>,
    output: Vec<OutputTarget>,
}

impl TaskDescriptor {
    pub fn builder(name: impl Into<String>, body: impl Task + 'static) -> TaskDescriptorBuilder {
        TaskDescriptorBuilder::new(name, Arc::new(body))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn cron(&self) -> Option<&CronExpression> {
        self.cron.as_ref()
    }

    pub fn environments(&self) -> &BTreeSet<String> {
        &self.environments
    }

    /// An empty environment set permits every environment.
    pub fn is_permitted_in(&self, environment: &str) -> bool {
        self.environments.is_empty() || self.environments.contains(environment)
    }

    pub fn command_line(&self, executable: &Path, environment: &str) -> CommandLine {
        self.command_factory.command_line(executable, environment)
    }

    pub fn body(&self) -> &dyn Task {
        self.body.as_ref()
    }

    pub fn output_targets(&self) -> &[OutputTarget] {
        &self.output
    }
}

impl fmt::Debug for TaskDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDescriptor")
            .field("name", &self.name)
            .field("cron", &self.cron.as_ref().map(|c| c.as_str()))
            .field("environments", &self.environments)
            .field("command_factory", &self.command_factory)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TaskDescriptor`]; validation happens in [`build`].
///
/// [`build`]: TaskDescriptorBuilder::build
pub struct TaskDescriptorBuilder {
    name: String,
    description: Option<String>,
    cron: Option<String>,
    environments: BTreeSet<String>,
    command_factory: Option<Arc<dyn CommandFactory>>,
    body: Arc<dyn Task>,
    output: Vec<OutputTarget>,
}

impl TaskDescriptorBuilder {
    pub fn new(name: impl Into<String>, body: Arc<dyn Task>) -> Self {
        Self {
            name: name.into(),
            description: None,
            cron: None,
            environments: BTreeSet::new(),
            command_factory: None,
            body,
            output: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn cron(mut self, expression: impl Into<String>) -> Self {
        self.cron = Some(expression.into());
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environments.insert(environment.into());
        self
    }

    pub fn environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments
            .extend(environments.into_iter().map(Into::into));
        self
    }

    pub fn command_factory(mut self, factory: impl CommandFactory + 'static) -> Self {
        self.command_factory = Some(Arc::new(factory));
        self
    }

    pub fn output(mut self, target: OutputTarget) -> Self {
        self.output.push(target);
        self
    }

    /// Validate the name, parse the schedule and freeze the descriptor.
    pub fn build(self) -> Result<TaskDescriptor> {
        if !TASK_NAME.is_match(&self.name) {
            return Err(SchedrunError::InvalidTaskName(self.name));
        }

        let cron = self
            .cron
            .as_deref()
            .map(CronExpression::parse)
            .transpose()?;

        let command_factory = match self.command_factory {
            Some(factory) => factory,
            None => Arc::new(TaskRunCommand::new(self.name.clone())) as Arc<dyn CommandFactory>,
        };

        Ok(TaskDescriptor {
            name: self.name,
            description: self.description,
            cron,
            environments: self.environments,
            command_factory,
            body: self.body,
            output: self.output,
        })
    }
}
