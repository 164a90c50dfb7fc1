// src/task/registry.rs

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::{Result, SchedrunError};
use crate::exec::output::OutputTarget;
use crate::task::descriptor::{TaskDescriptor, TaskRunCommand};
use crate::task::shell::ShellTask;

/// Name → descriptor mapping that remembers registration order.
///
/// Populated once at bootstrap and read-mostly afterwards. The lock only
/// matters for hosts that register and look up concurrently; readers never
/// block each other.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    ordered: Vec<Arc<TaskDescriptor>>,
    index: HashMap<String, usize>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the `[[task]]` entries of a validated config.
    ///
    /// Every task gets a [`ShellTask`] body and a command factory that
    /// forwards `config_path` to the child, so `task:run` in the child sees
    /// the same registry.
    pub fn from_config(cfg: &ConfigFile, config_path: Option<&Path>) -> Result<Self> {
        let registry = Self::new();

        for tc in cfg.task.iter() {
            let mut body = ShellTask::new(tc.cmd.clone());
            if let Some(ref dir) = tc.working_dir {
                body = body.with_working_dir(dir.clone());
            }

            let mut factory = TaskRunCommand::new(tc.name.clone());
            if let Some(path) = config_path {
                factory = factory.with_config(path);
            }

            let mut builder = TaskDescriptor::builder(tc.name.clone(), body)
                .environments(tc.environments.iter().cloned())
                .command_factory(factory);

            if let Some(ref cron) = tc.cron {
                builder = builder.cron(cron.clone());
            }
            if let Some(ref description) = tc.description {
                builder = builder.description(description.clone());
            }
            if let Some(ref log) = tc.log {
                builder = builder.output(OutputTarget::log_file(log.path.clone(), log.mode));
            }

            registry.register(builder.build()?)?;
        }

        Ok(registry)
    }

    /// Add a descriptor. Duplicate names are rejected and the existing entry
    /// is kept.
    pub fn register(&self, descriptor: TaskDescriptor) -> Result<()> {
        let mut inner = self.inner.write();

        if inner.index.contains_key(descriptor.name()) {
            return Err(SchedrunError::DuplicateTask(descriptor.name().to_string()));
        }

        debug!(task = %descriptor.name(), cron = ?descriptor.cron().map(|c| c.as_str()), "registered task");

        let position = inner.ordered.len();
        inner.index.insert(descriptor.name().to_string(), position);
        inner.ordered.push(Arc::new(descriptor));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<TaskDescriptor>> {
        let inner = self.inner.read();
        inner
            .index
            .get(name)
            .map(|&position| Arc::clone(&inner.ordered[position]))
    }

    /// Like [`get`](Self::get) but reports a missing task as an error.
    pub fn require(&self, name: &str) -> Result<Arc<TaskDescriptor>> {
        self.get(name)
            .ok_or_else(|| SchedrunError::TaskNotFound(name.to_string()))
    }

    /// All descriptors in registration order.
    pub fn all(&self) -> Vec<Arc<TaskDescriptor>> {
        self.inner.read().ordered.clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.inner
            .read()
            .ordered
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
