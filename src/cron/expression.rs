// src/cron/expression.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::cron::field::{CronField, FieldKind};
use crate::cron::truncate_to_minute;
use crate::errors::{Result, SchedrunError};

/// A parsed five-field cron schedule (minute, hour, day-of-month, month,
/// day-of-week).
///
/// Parsing is the only fallible step: once constructed, [`is_due`] is a
/// pure function of the instant and can be shared across threads.
///
/// [`is_due`]: CronExpression::is_due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpression {
    source: String,
    minute: CronField,
    hour: CronField,
    day_of_month: CronField,
    month: CronField,
    day_of_week: CronField,
}

impl CronExpression {
    /// Parse a cron expression.
    ///
    /// Accepts the standard five fields and the `@yearly`, `@annually`,
    /// `@monthly`, `@weekly`, `@daily`, `@midnight` and `@hourly` macros.
    pub fn parse(expression: &str) -> Result<Self> {
        let source = expression.trim();
        let expanded = expand_macro(source).map_err(|reason| malformed(source, reason))?;

        let parts: Vec<&str> = expanded.split_whitespace().collect();
        if parts.len() != FieldKind::ALL.len() {
            return Err(malformed(
                source,
                format!("expected 5 fields, found {}", parts.len()),
            ));
        }

        let mut fields = Vec::with_capacity(5);
        for (kind, text) in FieldKind::ALL.iter().zip(parts.iter()) {
            let field = CronField::parse(*kind, text).map_err(|reason| malformed(source, reason))?;
            fields.push(field);
        }

        Ok(Self {
            source: source.to_string(),
            minute: fields[0],
            hour: fields[1],
            day_of_month: fields[2],
            month: fields[3],
            day_of_week: fields[4],
        })
    }

    /// Whether the schedule fires in the minute containing `instant`.
    ///
    /// Day-of-month and day-of-week are OR-ed when both are restricted,
    /// AND-ed otherwise (the unrestricted one always matches).
    pub fn is_due<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let t = truncate_to_minute(instant);

        if !self.minute.matches(t.minute())
            || !self.hour.matches(t.hour())
            || !self.month.matches(t.month())
        {
            return false;
        }

        let dom = self.day_of_month.matches(t.day());
        let dow = self
            .day_of_week
            .matches(t.weekday().num_days_from_sunday());

        if self.day_of_month.is_restricted() && self.day_of_week.is_restricted() {
            dom || dow
        } else {
            dom && dow
        }
    }

    /// The expression as written (trimmed).
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for CronExpression {
    type Err = SchedrunError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CronExpression::parse(s)
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn expand_macro(source: &str) -> std::result::Result<&str, String> {
    if !source.starts_with('@') {
        return Ok(source);
    }
    match source.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => Ok("0 0 1 1 *"),
        "@monthly" => Ok("0 0 1 * *"),
        "@weekly" => Ok("0 0 * * 0"),
        "@daily" | "@midnight" => Ok("0 0 * * *"),
        "@hourly" => Ok("0 * * * *"),
        other => Err(format!("unknown macro '{other}'")),
    }
}

fn malformed(expression: &str, reason: impl Into<String>) -> SchedrunError {
    SchedrunError::MalformedCron {
        expression: expression.to_string(),
        reason: reason.into(),
    }
}
