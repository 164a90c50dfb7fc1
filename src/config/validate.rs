// src/config/validate.rs

use std::collections::HashSet;
use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::cron::CronExpression;
use crate::errors::{Result, SchedrunError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::SchedrunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_tasks(&raw)?;
        let spawn_timeout = validate_spawn_timeout(&raw)?;
        let timezone = validate_timezone(&raw)?;
        Ok(ConfigFile::new_unchecked(
            raw.config,
            raw.task,
            spawn_timeout,
            timezone,
        ))
    }
}

fn validate_tasks(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();

    for task in cfg.task.iter() {
        if !seen.insert(task.name.as_str()) {
            return Err(SchedrunError::DuplicateTask(task.name.clone()));
        }

        if task.cmd.trim().is_empty() {
            return Err(SchedrunError::ConfigError(format!(
                "task '{}' has an empty `cmd`",
                task.name
            )));
        }

        if let Some(ref cron) = task.cron {
            CronExpression::parse(cron)?;
        }

        if task.environments.iter().any(|e| e.trim().is_empty()) {
            return Err(SchedrunError::ConfigError(format!(
                "task '{}' lists an empty environment name",
                task.name
            )));
        }
    }
    Ok(())
}

fn validate_spawn_timeout(cfg: &RawConfigFile) -> Result<Duration> {
    let timeout = parse_duration(&cfg.config.spawn_timeout).map_err(|e| {
        SchedrunError::ConfigError(format!("[config].spawn_timeout: {e}"))
    })?;

    if timeout.is_zero() {
        return Err(SchedrunError::ConfigError(
            "[config].spawn_timeout must be greater than zero".to_string(),
        ));
    }
    Ok(timeout)
}

fn validate_timezone(cfg: &RawConfigFile) -> Result<Option<chrono_tz::Tz>> {
    match cfg.config.timezone {
        None => Ok(None),
        Some(ref name) => name.parse::<chrono_tz::Tz>().map(Some).map_err(|_| {
            SchedrunError::ConfigError(format!(
                "[config].timezone '{}' is not a valid IANA time zone",
                name
            ))
        }),
    }
}

/// Parse durations like `"250ms"`, `"5s"`, `"2m"`, `"1h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    let secs_per_unit = match unit.as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        _ => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ));
        }
    };

    value
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration '{}' is too large", s))
}
