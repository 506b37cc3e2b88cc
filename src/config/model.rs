// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [project]
/// title = "Workshop 3"
/// author = "Jane Doe"
///
/// [input]
/// root = "src"
/// extensions = [".py", ".java"]
///
/// [execution]
/// timeout = "5s"
/// stdin_input = "3\n"
/// ```
///
/// All sections are optional and have reasonable defaults. This is the raw,
/// unvalidated form; convert it with `ConfigFile::try_from`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub input: InputSection,

    #[serde(default)]
    pub execution: ExecutionSection,

    #[serde(default)]
    pub toolchain: ToolchainSection,
}

/// `[project]` section. Only used by the report.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_author")]
    pub author: String,
}

fn default_title() -> String {
    "Assignment".to_string()
}

fn default_author() -> String {
    "Student".to_string()
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            author: default_author(),
        }
    }
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSection {
    /// Directory to scan. Relative paths are resolved against the directory
    /// containing the config file.
    #[serde(default = "default_root")]
    pub root: String,

    /// File extensions to include, with the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns (relative to `root`) of files to leave out.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_extensions() -> Vec<String> {
    vec![".py".to_string(), ".java".to_string()]
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

/// `[execution]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Per-file timeout, e.g. `"5s"` or `"1500ms"`.
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Literal stdin payload for batch mode.
    #[serde(default)]
    pub stdin_input: String,

    /// Relay the operator's terminal to each program instead of feeding
    /// `stdin_input`.
    #[serde(default)]
    pub interactive: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout() -> String {
    "5s".to_string()
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timeout: default_timeout(),
            stdin_input: String::new(),
            interactive: false,
        }
    }
}

/// `[toolchain]` section: which executables to invoke.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainSection {
    #[serde(default = "default_python")]
    pub python: String,

    #[serde(default = "default_javac")]
    pub javac: String,

    #[serde(default = "default_java")]
    pub java: String,

    #[serde(default = "default_compile_timeout")]
    pub compile_timeout: String,
}

fn default_python() -> String {
    if cfg!(windows) {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

fn default_javac() -> String {
    "javac".to_string()
}

fn default_java() -> String {
    "java".to_string()
}

fn default_compile_timeout() -> String {
    "60s".to_string()
}

impl Default for ToolchainSection {
    fn default() -> Self {
        Self {
            python: default_python(),
            javac: default_javac(),
            java: default_java(),
            compile_timeout: default_compile_timeout(),
        }
    }
}

/// Validated configuration. Build it from a [`RawConfigFile`] with
/// `ConfigFile::try_from`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub project: ProjectSection,
    pub input: InputConfig,
    pub execution: ExecutionConfig,
    pub toolchain: ToolchainConfig,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            project: ProjectSection::default(),
            input: InputConfig::default(),
            execution: ExecutionConfig::default(),
            toolchain: ToolchainConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(default_root()),
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

/// Settings the execution engine reads for every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    pub enabled: bool,
    pub timeout: Duration,
    pub stdin_input: String,
    pub interactive: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(5),
            stdin_input: String::new(),
            interactive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    pub python: String,
    pub javac: String,
    pub java: String,
    pub compile_timeout: Duration,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            javac: default_javac(),
            java: default_java(),
            compile_timeout: Duration::from_secs(60),
        }
    }
}
