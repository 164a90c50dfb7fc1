// src/lib.rs

pub mod cli;
pub mod config;
pub mod cron;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod schedule;
pub mod task;
pub mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, default_config_path, load_and_validate};
use crate::exec::{DetachedLauncher, HostInvocation, ProcessLauncher, run_task};
use crate::schedule::{LaunchOutcome, PassEvent, run_scheduled_pass_with};
use crate::task::TaskRegistry;
use crate::types::DEFAULT_ENVIRONMENT;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and task registration
/// - environment resolution
/// - the `task:*` subcommands
///
/// The returned exit code follows the CLI contract: `task:run` fails on an
/// unknown task or a failed body; `task:run_scheduled` always succeeds.
pub async fn run(args: CliArgs) -> Result<ExitCode> {
    let config_path = resolve_config_path(args.config.clone());
    let cfg = load_and_validate(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    let environment = resolve_environment(
        args.env.as_deref(),
        std::env::var("SCHEDRUN_ENV").ok().as_deref(),
        &cfg,
    );
    debug!(env = %environment, config = %config_path.display(), "resolved environment");

    let registry = TaskRegistry::from_config(&cfg, Some(&config_path))?;
    info!(tasks = registry.len(), env = %environment, "task registry loaded");

    match args.command {
        Command::Run {
            task_name,
            arguments,
        } => run_single(&registry, &task_name, arguments).await,
        Command::RunScheduled => run_scheduled(&cfg, &registry, environment).await,
        Command::List { due } => {
            print_task_list(&cfg, &registry, &environment, due);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Pick the environment: `--env`, then `SCHEDRUN_ENV`, then
/// `[config].environment`, then `dev`.
pub fn resolve_environment(cli: Option<&str>, env_var: Option<&str>, cfg: &ConfigFile) -> String {
    cli.or(env_var)
        .or(cfg.config.environment.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ENVIRONMENT)
        .to_string()
}

/// Children are started from the same working directory, but an absolute
/// path keeps them independent of it.
fn resolve_config_path(cli: Option<PathBuf>) -> PathBuf {
    let path = cli.unwrap_or_else(default_config_path);
    std::path::absolute(&path).unwrap_or(path)
}

async fn run_single(
    registry: &TaskRegistry,
    task_name: &str,
    arguments: Vec<String>,
) -> Result<ExitCode> {
    let descriptor = match registry.require(task_name) {
        Ok(d) => d,
        Err(err) => {
            eprintln!("{err}.");
            return Ok(ExitCode::FAILURE);
        }
    };

    // Task bodies are synchronous (and may block on a shell command).
    let result = tokio::task::spawn_blocking(move || run_task(&descriptor, &arguments))
        .await
        .context("task runner thread failed")?;

    for line in result.output.iter() {
        println!("{line}");
    }
    for err in result.output_errors.iter() {
        eprintln!("{err}");
    }

    match result.into_result() {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_scheduled(
    cfg: &ConfigFile,
    registry: &TaskRegistry,
    environment: String,
) -> Result<ExitCode> {
    let executable =
        std::env::current_exe().context("resolving path of the running executable")?;
    let host = HostInvocation::new(executable, environment);
    let launcher = DetachedLauncher::new(cfg.spawn_timeout());
    debug!(spawn_timeout = ?launcher.spawn_timeout(), "using detached launcher");

    Ok(launch_due_tasks(cfg, registry, &host, &launcher).await)
}

/// Run one scheduled pass in the config's time zone (local time if unset)
/// and print its progress.
///
/// Prints `Running <task>` before each launch and `Error: <reason>` after a
/// failed one. Launch failures never change the exit code.
pub async fn launch_due_tasks<L>(
    cfg: &ConfigFile,
    registry: &TaskRegistry,
    host: &HostInvocation,
    launcher: &L,
) -> ExitCode
where
    L: ProcessLauncher + ?Sized,
{
    let report = match cfg.timezone() {
        Some(tz) => {
            let now = Utc::now().with_timezone(&tz);
            run_scheduled_pass_with(registry, &now, host, launcher, print_pass_event).await
        }
        None => {
            run_scheduled_pass_with(registry, &Local::now(), host, launcher, print_pass_event)
                .await
        }
    };

    debug!(
        launched = report.launched().count(),
        failed = report.failed().count(),
        "scheduled pass finished"
    );
    ExitCode::SUCCESS
}

fn print_pass_event(event: PassEvent<'_>) {
    match event {
        PassEvent::Launching { task } => println!("Running {task}"),
        PassEvent::Finished(entry) => {
            if let LaunchOutcome::Failed { ref reason } = entry.outcome {
                println!("Error: {reason}");
            }
        }
    }
}

fn print_task_list(cfg: &ConfigFile, registry: &TaskRegistry, environment: &str, due_only: bool) {
    let tasks = if due_only {
        match cfg.timezone() {
            Some(tz) => {
                schedule::select_due(registry, &Utc::now().with_timezone(&tz), environment)
            }
            None => schedule::select_due(registry, &Local::now(), environment),
        }
    } else {
        registry.all()
    };

    println!("tasks ({}, env = {}):", tasks.len(), environment);
    for task in tasks.iter() {
        println!("  - {}", task.name());
        println!(
            "      schedule: {}",
            task.cron().map(|c| c.as_str()).unwrap_or("on demand")
        );
        if task.environments().is_empty() {
            println!("      environments: all");
        } else {
            let envs: Vec<&str> = task.environments().iter().map(String::as_str).collect();
            println!("      environments: {}", envs.join(", "));
        }
        if let Some(description) = task.description() {
            println!("      description: {description}");
        }
    }
}

