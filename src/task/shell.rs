// src/task/shell.rs

//! Shell command task body used for `[[task]]` entries in the config file.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::task::descriptor::{Task, TaskContext};

/// Runs a shell command and waits for it to exit.
///
/// Runner arguments are passed as positional parameters (`$1`, `$2`, ...)
/// on Unix and appended to the command line on Windows. Stdout lines become
/// task output; stderr lines are logged.
#[derive(Debug, Clone)]
pub struct ShellTask {
    cmd: String,
    working_dir: Option<PathBuf>,
}

impl ShellTask {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn build_command(&self, task_name: &str, args: &[String]) -> Command {
        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd).args(args);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd).arg(task_name).args(args);
            c
        };

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Task for ShellTask {
    fn run(&self, ctx: &mut TaskContext, args: &[String]) -> Result<()> {
        let task_name = ctx.task_name().to_string();
        info!(task = %task_name, cmd = %self.cmd, ?args, "starting shell command");

        let output = self
            .build_command(&task_name, args)
            .output()
            .with_context(|| format!("running command for task '{}'", task_name))?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            ctx.writeln(line);
        }
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            debug!(task = %task_name, "stderr: {}", line);
        }

        if !output.status.success() {
            match output.status.code() {
                Some(code) => bail!("command `{}` exited with status {}", self.cmd, code),
                None => bail!("command `{}` was terminated by a signal", self.cmd),
            }
        }

        Ok(())
    }
}
