// src/exec/launcher.rs

//! Pluggable process launcher abstraction.
//!
//! A scheduled pass talks to a `ProcessLauncher` instead of spawning
//! processes itself. This makes it easy to swap in a fake launcher in tests
//! while keeping the production implementation in [`DetachedLauncher`].

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::errors::LaunchError;
use crate::task::{CommandLine, TaskDescriptor};

/// Default bound on a single OS spawn.
pub const DEFAULT_SPAWN_TIMEOUT: Duration = Duration::from_secs(5);

/// The running binary and the environment children should run in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInvocation {
    pub executable: PathBuf,
    pub environment: String,
}

impl HostInvocation {
    pub fn new(executable: impl Into<PathBuf>, environment: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            environment: environment.into(),
        }
    }
}

/// A child that was started and then let go.
///
/// Nothing holds on to the OS process after `launch` returns; this is only
/// a record for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildHandle {
    pub task: String,
    pub command: String,
    pub pid: Option<u32>,
}

/// Trait abstracting how a due task is started.
///
/// Production code uses [`DetachedLauncher`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ProcessLauncher: Send + Sync {
    /// Start `task` without waiting for it to finish.
    fn launch<'a>(
        &'a self,
        task: &'a TaskDescriptor,
        host: &'a HostInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildHandle, LaunchError>> + Send + 'a>>;
}

/// The blocking OS spawn used by [`DetachedLauncher`].
pub type SpawnFn = dyn Fn(&CommandLine) -> std::io::Result<Child> + Send + Sync;

/// Spawns each task as a detached child process re-invoking the host binary.
///
/// - stdio is redirected to null so the child cannot stall the parent,
/// - on Unix the child gets its own process group, so signals aimed at the
///   scheduler (e.g. Ctrl-C in a terminal) do not reach it,
/// - the spawn itself runs on the blocking pool under `spawn_timeout`.
///
/// The `tokio::process::Child` is dropped right after spawning without
/// `kill_on_drop`, which leaves the process running and hands reaping to
/// Tokio's background orphan reaper.
#[derive(Clone)]
pub struct DetachedLauncher {
    spawn_timeout: Duration,
    spawner: Arc<SpawnFn>,
}

impl DetachedLauncher {
    pub fn new(spawn_timeout: Duration) -> Self {
        Self::with_spawner(spawn_timeout, spawn_detached)
    }

    /// Replace the OS spawn step. The timeout and error mapping stay the same.
    pub fn with_spawner<F>(spawn_timeout: Duration, spawner: F) -> Self
    where
        F: Fn(&CommandLine) -> std::io::Result<Child> + Send + Sync + 'static,
    {
        Self {
            spawn_timeout,
            spawner: Arc::new(spawner),
        }
    }

    pub fn spawn_timeout(&self) -> Duration {
        self.spawn_timeout
    }
}

impl fmt::Debug for DetachedLauncher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetachedLauncher")
            .field("spawn_timeout", &self.spawn_timeout)
            .finish_non_exhaustive()
    }
}

impl Default for DetachedLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_TIMEOUT)
    }
}

impl ProcessLauncher for DetachedLauncher {
    fn launch<'a>(
        &'a self,
        task: &'a TaskDescriptor,
        host: &'a HostInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildHandle, LaunchError>> + Send + 'a>> {
        let command_line = task.command_line(&host.executable, &host.environment);
        let name = task.name().to_string();
        let timeout = self.spawn_timeout;
        let spawner = Arc::clone(&self.spawner);

        Box::pin(async move {
            let rendered = command_line.to_string();
            info!(task = %name, cmd = %rendered, "launching detached task process");

            // If the timeout fires first the blocking spawn may still
            // succeed later; that child then runs unobserved.
            let spawn = tokio::task::spawn_blocking(move || spawner(&command_line));

            let child = match tokio::time::timeout(timeout, spawn).await {
                Err(_) => return Err(LaunchError::Timeout { task: name, timeout }),
                Ok(Err(join_err)) => {
                    return Err(LaunchError::Join {
                        task: name,
                        reason: join_err.to_string(),
                    });
                }
                Ok(Ok(Err(source))) => return Err(LaunchError::Spawn { task: name, source }),
                Ok(Ok(Ok(child))) => child,
            };

            let pid = child.id();
            debug!(task = %name, ?pid, "child process started; releasing handle");
            drop(child);

            Ok(ChildHandle {
                task: name,
                command: rendered,
                pid,
            })
        })
    }
}

/// Default spawn: null stdio, own process group on Unix, no `kill_on_drop`.
pub fn spawn_detached(command_line: &CommandLine) -> std::io::Result<Child> {
    let mut cmd = Command::new(&command_line.program);
    cmd.args(&command_line.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(false);

    #[cfg(unix)]
    cmd.process_group(0);

    cmd.spawn()
}
