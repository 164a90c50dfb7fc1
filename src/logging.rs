// src/logging.rs

//! Logging setup for `schedrun` using `tracing` + `tracing-subscriber`.
//!
//! Filter selection:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `SCHEDRUN_LOG`, either a bare level (`"debug"`) or a full filter
//!    directive (`"schedrun::exec=trace,warn"`)
//! 3. `info`
//!
//! stdout belongs to the CLI: task output from `task:run` and the
//! `Running <task>` / `Error: ...` lines of `task:run_scheduled`. Every log
//! line goes to stderr. Launched children have their stdio nulled, so their
//! own logs are not seen here.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

const LOG_ENV: &str = "SCHEDRUN_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env_value.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Pick the filter from the CLI level or the `SCHEDRUN_LOG` value.
///
/// A blank env value counts as unset. A malformed one is only an error when
/// no CLI level overrides it.
pub fn build_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Result<EnvFilter> {
    if let Some(lvl) = cli_level {
        return Ok(EnvFilter::new(directive_for(lvl)));
    }

    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => EnvFilter::try_new(value)
            .with_context(|| format!("invalid {LOG_ENV} filter `{value}`")),
        _ => Ok(EnvFilter::new("info")),
    }
}

fn directive_for(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
