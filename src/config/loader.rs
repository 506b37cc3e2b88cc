// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Written by `codesubmit init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# codesubmit configuration

[project]
title = "Assignment"
author = "Student"

[input]
# Directory to scan, relative to this file.
root = "."
extensions = [".py", ".java"]
# exclude = ["**/test_*.py"]

[execution]
enabled = true
timeout = "5s"
# Fed to every program in batch mode.
stdin_input = ""
# Relay your terminal to each program instead (stdin_input is ignored).
interactive = false

[toolchain]
# python = "python3"
# javac = "javac"
# java = "java"
# compile_timeout = "60s"
"#;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Parses durations and checks extensions, exclude globs and toolchain
///   names.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Like [`load_and_validate`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = ?path, "config file not found; using defaults");
        return ConfigFile::try_from(RawConfigFile::default());
    }
    load_and_validate(path)
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("codesubmit.toml")
}
