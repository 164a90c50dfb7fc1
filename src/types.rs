// src/types.rs

use std::str::FromStr;
use serde::Deserialize;

/// How a task's captured output is written to its log file.
///
/// - `Overwrite`: replace the file contents on every run (default).
/// - `Append`: add the output of each run to the end of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogWriteMode {
    Overwrite,
    Append,
}

impl Default for LogWriteMode {
    fn default() -> Self {
        LogWriteMode::Overwrite
    }
}

impl FromStr for LogWriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Ok(LogWriteMode::Overwrite),
            "append" => Ok(LogWriteMode::Append),
            other => Err(format!(
                "invalid log mode: {other} (expected \"overwrite\" or \"append\")"
            )),
        }
    }
}

/// Environment used when neither the CLI, `SCHEDRUN_ENV` nor the config
/// file names one.
pub const DEFAULT_ENVIRONMENT: &str = "dev";
