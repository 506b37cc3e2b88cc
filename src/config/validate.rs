// src/config/validate.rs

use std::path::PathBuf;
use std::time::Duration;

use globset::Glob;
use tracing::warn;

use crate::config::duration::parse_duration;
use crate::config::model::{
    ConfigFile, ExecutionConfig, InputConfig, RawConfigFile, ToolchainConfig,
};
use crate::errors::{CodesubmitError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = CodesubmitError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_input(&raw)?;
        validate_toolchain(&raw)?;

        let timeout = parse_timeout("[execution].timeout", &raw.execution.timeout)?;
        let compile_timeout =
            parse_timeout("[toolchain].compile_timeout", &raw.toolchain.compile_timeout)?;

        if raw.execution.interactive && !raw.execution.stdin_input.is_empty() {
            warn!("[execution].interactive is set; stdin_input will be ignored");
        }

        Ok(ConfigFile {
            project: raw.project,
            input: InputConfig {
                root: PathBuf::from(raw.input.root),
                extensions: raw.input.extensions,
                exclude: raw.input.exclude,
            },
            execution: ExecutionConfig {
                enabled: raw.execution.enabled,
                timeout,
                stdin_input: raw.execution.stdin_input,
                interactive: raw.execution.interactive,
            },
            toolchain: ToolchainConfig {
                python: raw.toolchain.python,
                javac: raw.toolchain.javac,
                java: raw.toolchain.java,
                compile_timeout,
            },
        })
    }
}

fn parse_timeout(field: &str, value: &str) -> Result<Duration> {
    let dur = parse_duration(value)
        .map_err(|e| CodesubmitError::ConfigError(format!("invalid {field}: {e}")))?;
    if dur.is_zero() {
        return Err(CodesubmitError::ConfigError(format!(
            "{field} must be greater than zero (got {value:?})"
        )));
    }
    Ok(dur)
}

fn validate_input(cfg: &RawConfigFile) -> Result<()> {
    if cfg.input.root.trim().is_empty() {
        return Err(CodesubmitError::ConfigError(
            "[input].root must not be empty".to_string(),
        ));
    }

    if cfg.input.extensions.is_empty() {
        return Err(CodesubmitError::ConfigError(
            "[input].extensions must list at least one extension".to_string(),
        ));
    }

    for ext in cfg.input.extensions.iter() {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(CodesubmitError::ConfigError(format!(
                "[input].extensions entry '{}' must look like \".py\"",
                ext
            )));
        }
    }

    for pattern in cfg.input.exclude.iter() {
        Glob::new(pattern).map_err(|e| {
            CodesubmitError::ConfigError(format!(
                "[input].exclude pattern '{}' is invalid: {}",
                pattern, e
            ))
        })?;
    }

    Ok(())
}

fn validate_toolchain(cfg: &RawConfigFile) -> Result<()> {
    let programs = [
        ("python", &cfg.toolchain.python),
        ("javac", &cfg.toolchain.javac),
        ("java", &cfg.toolchain.java),
    ];
    for (name, program) in programs {
        if program.trim().is_empty() {
            return Err(CodesubmitError::ConfigError(format!(
                "[toolchain].{name} must not be empty"
            )));
        }
    }
    Ok(())
}
