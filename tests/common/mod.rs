#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use schedrun_test_utils::{at, init_tracing};

/// Write `contents` to a fresh temporary `.toml` file.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    write!(file, "{contents}").expect("write temp config");
    file
}
