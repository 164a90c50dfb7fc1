// src/schedule/selector.rs

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tracing::trace;

use crate::cron::truncate_to_minute;
use crate::task::{TaskDescriptor, TaskRegistry};

/// Whether `task` should run in the minute containing `now` in `environment`.
///
/// A task is due when it has a schedule, the schedule matches the minute,
/// and its environment restriction (if any) includes `environment`.
pub fn is_due<Tz: TimeZone>(task: &TaskDescriptor, now: &DateTime<Tz>, environment: &str) -> bool {
    let Some(cron) = task.cron() else {
        return false;
    };
    if !cron.is_due(now) {
        return false;
    }
    task.is_permitted_in(environment)
}

/// Tasks due at `now` in `environment`, in registration order.
///
/// `now` is truncated to the start of its minute, so every call within the
/// same minute returns the same set.
pub fn select_due<Tz: TimeZone>(
    registry: &TaskRegistry,
    now: &DateTime<Tz>,
    environment: &str,
) -> Vec<Arc<TaskDescriptor>> {
    let minute = truncate_to_minute(now);

    registry
        .all()
        .into_iter()
        .filter(|task| {
            let due = is_due(task, &minute, environment);
            trace!(task = %task.name(), due, "evaluated schedule");
            due
        })
        .collect()
}
