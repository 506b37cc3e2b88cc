// src/lib.rs

pub mod cli;
pub mod config;
pub mod discover;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod java;
pub mod logging;
pub mod report;
pub mod toolchain;
pub mod types;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::{CliArgs, Command, GenerateArgs, InitArgs};
use crate::config::{load_or_default, ConfigFile, DEFAULT_CONFIG_TEMPLATE};
use crate::discover::scan_directory;
use crate::engine::Engine;
use crate::errors::{CodesubmitError, Result};
use crate::exec::TokioProcessRunner;
use crate::fs::{FileSystem, RealFileSystem};
use crate::java::JavacCompiler;
use crate::report::{MarkdownFormatter, ReportFormatter};

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    match args.command {
        Command::Generate(generate_args) => generate(&fs, generate_args).await,
        Command::Init(init_args) => init(&fs, init_args),
    }
}

/// Load config → scan → execute → write the report.
async fn generate(fs: &dyn FileSystem, args: GenerateArgs) -> Result<()> {
    println!("Loading configuration from {}...", args.config.display());
    let mut cfg = load_or_default(&args.config)?;
    apply_overrides(&mut cfg, &args);

    let root = resolve_input_root(&args.config, &cfg.input.root);
    println!("Scanning {}...", root.display());
    let files = scan_directory(fs, &root, &cfg.input)?;
    if files.is_empty() {
        println!(
            "No source files found under {} matching {:?}.",
            root.display(),
            cfg.input.extensions
        );
        return Ok(());
    }

    if cfg.execution.enabled {
        println!("Found {} files. Executing...", files.len());
    } else {
        println!("Found {} files. Execution disabled.", files.len());
    }

    let runner = TokioProcessRunner::new();
    let compiler = JavacCompiler::from_config(&cfg.toolchain);
    let mut engine = Engine::new(runner, compiler, cfg.toolchain.clone());
    let entries = engine.execute_all(files, &cfg.execution).await?;

    let formatter = MarkdownFormatter;
    println!("Generating output ({})...", formatter.name());
    formatter.save(fs, &entries, &cfg.project, &args.output)?;

    println!("Done! Saved to {}", args.output.display());
    Ok(())
}

fn apply_overrides(cfg: &mut ConfigFile, args: &GenerateArgs) {
    if args.no_exec {
        cfg.execution.enabled = false;
    }
    if args.interactive {
        cfg.execution.interactive = true;
    }
    debug!(execution = ?cfg.execution, "effective execution settings");
}

fn init(fs: &dyn FileSystem, args: InitArgs) -> Result<()> {
    if fs.exists(&args.config) && !args.force {
        return Err(CodesubmitError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        )));
    }
    fs.write(&args.config, DEFAULT_CONFIG_TEMPLATE.as_bytes())?;
    info!(path = ?args.config, "wrote default config");
    println!("Wrote {}", args.config.display());
    Ok(())
}

/// Relative input roots are taken relative to the config file's directory.
fn resolve_input_root(config_path: &Path, root: &Path) -> PathBuf {
    if root.is_absolute() {
        return root.to_path_buf();
    }
    config_root_dir(config_path).join(root)
}

/// - If the config path has a non-empty parent (e.g. "hw1/codesubmit.toml"),
///   we use that directory.
/// - If it's just a bare filename, we fall back to the current working
///   directory.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
