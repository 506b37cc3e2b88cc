// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `codesubmit`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "codesubmit",
    version,
    about = "Collect source files, run them, and bundle code plus output into one document.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CODESUBMIT_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Scan, execute and write the submission document.
    Generate(GenerateArgs),
    /// Write a default config file.
    Init(InitArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to the config file (TOML). Defaults are used when it is absent.
    #[arg(short, long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Where to write the document.
    #[arg(short, long, value_name = "PATH", default_value = "submission.md")]
    pub output: PathBuf,

    /// Include sources only; do not run anything.
    #[arg(long)]
    pub no_exec: bool,

    /// Relay the terminal to each program instead of `stdin_input`.
    #[arg(long, conflicts_with = "no_exec")]
    pub interactive: bool,
}

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    #[arg(short, long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
