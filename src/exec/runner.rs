// src/exec/runner.rs

//! Single-task runner: executes one task body in the current process.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::errors::{Result, SchedrunError};
use crate::task::{TaskContext, TaskDescriptor};

/// How a task body failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The body returned `Err`.
    Error,
    /// The body panicked.
    Panic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Error => write!(f, "{}", self.message),
            FailureKind::Panic => write!(f, "panicked: {}", self.message),
        }
    }
}

/// Outcome of one [`run_task`] call.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub task: String,
    pub success: bool,
    pub elapsed: Duration,
    pub failure: Option<TaskFailure>,
    /// Lines the body wrote through its [`TaskContext`].
    pub output: Vec<String>,
    /// One message per output target that could not be written.
    pub output_errors: Vec<String>,
}

impl ExecutionResult {
    /// Turn a failed run into [`SchedrunError::TaskExecution`].
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        let detail = self
            .failure
            .as_ref()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown failure".to_string());
        Err(SchedrunError::TaskExecution {
            task: self.task,
            detail,
        })
    }
}

/// Run `descriptor`'s body synchronously with positional `args`.
///
/// Errors and panics raised by the body are captured in the returned
/// [`ExecutionResult`]; this function itself never fails. Captured output
/// is routed to the descriptor's output targets afterwards, and a target
/// that cannot be written does not change `success`.
pub fn run_task(descriptor: &TaskDescriptor, args: &[String]) -> ExecutionResult {
    let name = descriptor.name().to_string();
    info!(task = %name, ?args, "running task");

    let mut ctx = TaskContext::new(name.clone());
    let started = Instant::now();

    let outcome = catch_unwind(AssertUnwindSafe(|| descriptor.body().run(&mut ctx, args)));
    let elapsed = started.elapsed();

    let failure = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(err)) => Some(TaskFailure {
            kind: FailureKind::Error,
            message: format!("{err:#}"),
        }),
        Err(payload) => Some(TaskFailure {
            kind: FailureKind::Panic,
            message: panic_message(payload.as_ref()),
        }),
    };

    match failure {
        None => info!(task = %name, elapsed_ms = elapsed.as_millis() as u64, "task finished"),
        Some(ref f) => error!(
            task = %name,
            elapsed_ms = elapsed.as_millis() as u64,
            kind = ?f.kind,
            error = %f.message,
            "task failed"
        ),
    }

    let output = ctx.into_output();
    let mut output_errors = Vec::new();
    for target in descriptor.output_targets() {
        if let Err(err) = target.write(&output) {
            warn!(task = %name, error = %format!("{err:#}"), "failed to write task output");
            output_errors.push(err.to_string());
        }
    }

    ExecutionResult {
        task: name,
        success: failure.is_none(),
        elapsed,
        failure,
        output,
        output_errors,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
