// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (cron syntax, duplicate names, etc.). Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - duplicate or malformed task names,
///   - malformed cron expressions,
///   - a usable spawn timeout and time zone.
///
/// Any error here is fatal: nothing is scheduled from a config that fails
/// validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default config location: `Schedrun.toml` in the current working
/// directory, overridable with `SCHEDRUN_CONFIG`.
pub fn default_config_path() -> PathBuf {
    std::env::var_os("SCHEDRUN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Schedrun.toml"))
}
