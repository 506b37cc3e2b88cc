#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use codesubmit::config::ExecutionConfig;
use codesubmit::discover::compute_content_hash;
use codesubmit::types::{Language, SourceFileRef};

/// Builder for `SourceFileRef` so tests don't need a real directory.
///
/// The language comes from the extension unless overridden, and the hash is
/// computed from the content, the same way discovery does it.
pub struct SourceFileBuilder {
    root: PathBuf,
    rel_path: String,
    language: Option<Language>,
    content: String,
}

impl SourceFileBuilder {
    pub fn new(rel_path: &str) -> Self {
        Self {
            root: PathBuf::from("/work"),
            rel_path: rel_path.to_string(),
            language: None,
            content: String::new(),
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn build(self) -> SourceFileRef {
        let path = self.root.join(&self.rel_path);
        let language = self.language.unwrap_or_else(|| Language::from_path(&path));
        SourceFileRef {
            hash: compute_content_hash(self.content.as_bytes()),
            path,
            rel_path: self.rel_path,
            language,
            content: self.content,
        }
    }
}

/// Builder for `ExecutionConfig`. Starts from the defaults.
pub struct ExecutionConfigBuilder {
    config: ExecutionConfig,
}

impl ExecutionConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ExecutionConfig::default(),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn stdin_input(mut self, input: &str) -> Self {
        self.config.stdin_input = input.to_string();
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.config.interactive = interactive;
        self
    }

    pub fn build(self) -> ExecutionConfig {
        self.config
    }
}

impl Default for ExecutionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
