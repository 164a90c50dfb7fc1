// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `schedrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "schedrun",
    version,
    about = "Run named tasks, and launch cron-scheduled tasks as detached processes.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `SCHEDRUN_CONFIG`, or `Schedrun.toml` in the current working
    /// directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Environment name (e.g. live, staging, dev).
    ///
    /// If omitted, `SCHEDRUN_ENV`, then `[config].environment`, then `dev`.
    #[arg(long, value_name = "NAME", global = true)]
    pub env: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SCHEDRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a task.
    #[command(name = "task:run")]
    Run {
        /// The full name of the task.
        task_name: String,

        /// (Optional) Any arguments required by the task.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        arguments: Vec<String>,
    },

    /// Launch every task that is due this minute. Meant to be fired every
    /// minute by cron.
    #[command(name = "task:run_scheduled")]
    RunScheduled,

    /// List registered tasks.
    #[command(name = "task:list")]
    List {
        /// Only show tasks due this minute in the active environment.
        #[arg(long)]
        due: bool,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
