// src/config/mod.rs

//! Configuration loading and validation for codesubmit.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate and resolve it into typed settings (`validate.rs`).

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    default_config_path, load_and_validate, load_from_path, load_or_default,
    DEFAULT_CONFIG_TEMPLATE,
};
pub use model::{
    ConfigFile, ExecutionConfig, ExecutionSection, InputConfig, InputSection, ProjectSection,
    RawConfigFile, ToolchainConfig, ToolchainSection,
};
