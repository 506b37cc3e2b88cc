// src/logging.rs

//! Diagnostics for `codesubmit`, built on `tracing-subscriber`'s fmt layer.
//!
//! STDOUT belongs to the user: progress lines such as `--- Executing x ---`
//! and, in interactive mode, the live echo of the program's stdout. Tracing
//! output goes to STDERR next to the echoed program stderr, and defaults to
//! `warn` so a normal run shows only progress and program output.
//!
//! The level is taken from `--log-level`, else `CODESUBMIT_LOG`, else `warn`.
//! An unrecognised `CODESUBMIT_LOG` value is ignored.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "CODESUBMIT_LOG";

/// Install the global subscriber. Call once, before any work starts.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, env_level.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn resolve_level(cli_level: Option<LogLevel>, env_level: Option<&str>) -> Level {
    if let Some(lvl) = cli_level {
        return match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        };
    }
    env_level.and_then(parse_level_str).unwrap_or(Level::WARN)
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
