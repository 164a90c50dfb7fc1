// src/schedule/pass.rs

//! One scheduled pass: select due tasks and launch each of them.

use chrono::{DateTime, FixedOffset, TimeZone};
use tracing::{error, info};

use crate::cron::truncate_to_minute;
use crate::exec::{HostInvocation, ProcessLauncher};
use crate::schedule::selector::select_due;
use crate::task::TaskRegistry;

/// What happened when a due task was handed to the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched { pid: Option<u32>, command: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassEntry {
    pub task: String,
    pub outcome: LaunchOutcome,
}

/// Ordered per-task outcomes of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Evaluation minute.
    pub evaluated_at: DateTime<FixedOffset>,
    pub environment: String,
    pub entries: Vec<PassEntry>,
}

impl PassReport {
    /// True when no task was due.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn launched(&self) -> impl Iterator<Item = &PassEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, LaunchOutcome::Launched { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &PassEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, LaunchOutcome::Failed { .. }))
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.task.as_str()).collect()
    }
}

/// Progress of a running pass, in the order it happens.
#[derive(Debug, Clone, Copy)]
pub enum PassEvent<'a> {
    /// About to hand `task` to the launcher.
    Launching { task: &'a str },
    /// The launcher returned for this entry.
    Finished(&'a PassEntry),
}

/// Run one scheduling pass.
///
/// Due tasks are launched one after another in registration order. A
/// launch failure is recorded and the pass moves on to the next task. The
/// pass never waits for a child to finish and keeps no state between
/// calls: calling it twice in the same minute launches the same tasks
/// twice, so cadence is up to whatever invokes it.
pub async fn run_scheduled_pass<Tz, L>(
    registry: &TaskRegistry,
    now: &DateTime<Tz>,
    host: &HostInvocation,
    launcher: &L,
) -> PassReport
where
    Tz: TimeZone,
    L: ProcessLauncher + ?Sized,
{
    run_scheduled_pass_with(registry, now, host, launcher, |_| {}).await
}

/// [`run_scheduled_pass`] with `on_event` called before and after each
/// launch.
pub async fn run_scheduled_pass_with<Tz, L, F>(
    registry: &TaskRegistry,
    now: &DateTime<Tz>,
    host: &HostInvocation,
    launcher: &L,
    mut on_event: F,
) -> PassReport
where
    Tz: TimeZone,
    L: ProcessLauncher + ?Sized,
    F: FnMut(PassEvent<'_>),
{
    let evaluated_at = truncate_to_minute(now).fixed_offset();
    let due = select_due(registry, now, &host.environment);

    info!(
        env = %host.environment,
        at = %evaluated_at,
        due = due.len(),
        registered = registry.len(),
        "starting scheduled pass"
    );

    let mut entries = Vec::with_capacity(due.len());

    for task in due {
        on_event(PassEvent::Launching { task: task.name() });

        let outcome = match launcher.launch(&task, host).await {
            Ok(child) => {
                info!(task = %task.name(), pid = ?child.pid, "task launched");
                LaunchOutcome::Launched {
                    pid: child.pid,
                    command: child.command,
                }
            }
            Err(err) => {
                error!(task = %err.task(), error = %err, "failed to launch task");
                LaunchOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };

        let entry = PassEntry {
            task: task.name().to_string(),
            outcome,
        };
        on_event(PassEvent::Finished(&entry));
        entries.push(entry);
    }

    if entries.is_empty() {
        info!(env = %host.environment, "no tasks due");
    }

    PassReport {
        evaluated_at,
        environment: host.environment.clone(),
        entries,
    }
}
