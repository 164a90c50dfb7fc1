use std::collections::HashSet;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use schedrun::errors::LaunchError;
use schedrun::exec::{ChildHandle, HostInvocation, ProcessLauncher};
use schedrun::task::TaskDescriptor;

/// A fake launcher that:
/// - records every launch attempt (task name + rendered command line)
/// - fails with a `LaunchError::Spawn` for the task names it was told to
/// - "launches" everything else without starting a process.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    attempts: Arc<Mutex<Vec<String>>>,
    commands: Arc<Mutex<Vec<String>>>,
    failing: HashSet<String>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make launches of `task` fail as if the executable were missing.
    pub fn failing_for(mut self, task: &str) -> Self {
        self.failing.insert(task.to_string());
        self
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn launch<'a>(
        &'a self,
        task: &'a TaskDescriptor,
        host: &'a HostInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildHandle, LaunchError>> + Send + 'a>> {
        Box::pin(async move {
            let command = task
                .command_line(&host.executable, &host.environment)
                .to_string();

            {
                let mut guard = self.attempts.lock().unwrap();
                guard.push(task.name().to_string());
            }
            {
                let mut guard = self.commands.lock().unwrap();
                guard.push(command.clone());
            }

            if self.failing.contains(task.name()) {
                return Err(LaunchError::Spawn {
                    task: task.name().to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "simulated missing executable"),
                });
            }

            Ok(ChildHandle {
                task: task.name().to_string(),
                command,
                pid: None,
            })
        })
    }
}
