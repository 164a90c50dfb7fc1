//! Task bodies with predictable behaviour.

use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use schedrun::task::{Task, TaskContext, TaskDescriptor};

/// Writes each argument as an output line.
#[derive(Debug, Clone, Default)]
pub struct EchoTask;

impl Task for EchoTask {
    fn run(&self, ctx: &mut TaskContext, args: &[String]) -> Result<()> {
        for arg in args {
            ctx.writeln(arg.clone());
        }
        Ok(())
    }
}

/// Writes one line, then returns an error.
#[derive(Debug, Clone)]
pub struct FailingTask {
    pub message: String,
}

impl Task for FailingTask {
    fn run(&self, ctx: &mut TaskContext, _args: &[String]) -> Result<()> {
        ctx.writeln("about to fail");
        bail!("{}", self.message)
    }
}

/// Panics with a fixed message.
#[derive(Debug, Clone, Default)]
pub struct PanickingTask;

impl Task for PanickingTask {
    fn run(&self, _ctx: &mut TaskContext, _args: &[String]) -> Result<()> {
        panic!("task body exploded");
    }
}

/// Records the arguments of every run.
#[derive(Debug, Clone, Default)]
pub struct RecordingTask {
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl Task for RecordingTask {
    fn run(&self, _ctx: &mut TaskContext, args: &[String]) -> Result<()> {
        self.calls.lock().unwrap().push(args.to_vec());
        Ok(())
    }
}

/// Descriptor with an [`EchoTask`] body and an optional schedule and
/// environment restriction.
pub fn echo_descriptor(name: &str, cron: Option<&str>, envs: &[&str]) -> TaskDescriptor {
    let mut builder = TaskDescriptor::builder(name, EchoTask).environments(envs.iter().copied());
    if let Some(expr) = cron {
        builder = builder.cron(expr);
    }
    builder.build().expect("valid test descriptor")
}
