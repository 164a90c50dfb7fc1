// src/cron/mod.rs

//! Five-field cron schedules.
//!
//! - [`field`] parses one field (`*`, literals, lists, ranges, steps, names)
//!   into a bitset matcher.
//! - [`expression`] combines the five fields and answers "is this schedule
//!   due at instant `t`?".
//!
//! Evaluation is minute-granular: seconds and sub-seconds of the instant
//! are ignored, so a scheduler firing anywhere inside a minute sees the
//! same answer.

pub mod expression;
pub mod field;

use chrono::{DateTime, TimeZone, Timelike};

pub use expression::CronExpression;
pub use field::{CronField, FieldKind};

/// Truncate an instant to the start of its minute.
///
/// Falls back to the instant itself if the truncated wall-clock time is not
/// representable in `Tz`; only minute and coarser fields are ever compared,
/// so the fallback is harmless.
pub fn truncate_to_minute<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Tz> {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or_else(|| instant.clone())
}
