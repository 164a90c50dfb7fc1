// src/exec/output.rs

//! Destinations for a task's captured output besides the console.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::types::LogWriteMode;

/// Where a finished task's output lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    LogFile { path: PathBuf, mode: LogWriteMode },
}

impl OutputTarget {
    pub fn log_file(path: impl Into<PathBuf>, mode: LogWriteMode) -> Self {
        OutputTarget::LogFile {
            path: path.into(),
            mode,
        }
    }

    /// Write `lines` to the target.
    ///
    /// Overwrite mode needs an existing parent directory; append mode
    /// creates the file if missing. The error message always starts with
    /// `Cannot write to <path>`.
    pub fn write(&self, lines: &[String]) -> Result<()> {
        match self {
            OutputTarget::LogFile { path, mode } => write_log_file(path, *mode, lines)
                .with_context(|| format!("Cannot write to {}", path.display())),
        }
    }
}

fn write_log_file(path: &Path, mode: LogWriteMode, lines: &[String]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(anyhow!("directory {} does not exist", parent.display()));
    }

    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }

    match mode {
        LogWriteMode::Overwrite => fs::write(path, contents)?,
        LogWriteMode::Append => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(contents.as_bytes())?;
        }
    }
    Ok(())
}
