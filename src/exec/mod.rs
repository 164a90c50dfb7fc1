// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`launcher`] provides the `ProcessLauncher` trait and the production
//!   `DetachedLauncher`, which starts `task:run <name>` as a child process
//!   and never waits on it.
//! - [`runner`] runs one task body in the current process behind a failure
//!   boundary; it is what `task:run` (and therefore every launched child)
//!   executes.
//! - [`output`] writes captured task output to log files.

pub mod launcher;
pub mod output;
pub mod runner;

pub use launcher::{
    ChildHandle, DetachedLauncher, HostInvocation, ProcessLauncher, SpawnFn, spawn_detached,
};
pub use output::OutputTarget;
pub use runner::{ExecutionResult, FailureKind, TaskFailure, run_task};
