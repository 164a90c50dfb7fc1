// src/schedule/mod.rs

//! Scheduling: deciding what is due and launching it.
//!
//! - [`selector`] is the pure due-task filter (cron + environment).
//! - [`pass`] runs one selection-and-launch cycle and reports per-task
//!   outcomes. It is meant to be triggered once a minute by an external
//!   timer such as a crontab entry:
//!
//! ```text
//! * * * * * /path/to/schedrun --env=live task:run_scheduled > /dev/null 2>&1
//! ```

pub mod pass;
pub mod selector;

pub use pass::{
    LaunchOutcome, PassEntry, PassEvent, PassReport, run_scheduled_pass, run_scheduled_pass_with,
};
pub use selector::{is_due, select_due};
