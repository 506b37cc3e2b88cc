use std::fmt;
use std::path::{Path, PathBuf};

/// Language tag derived from a source file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Java,
    C,
    Cpp,
    JavaScript,
    TypeScript,
    Go,
    Rust,
    Unknown,
}

impl Language {
    /// Map a file extension (with or without the leading dot) to a language.
    ///
    /// Matching is exact, so `.PY` is `Unknown`, the same way discovery
    /// filters extensions.
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.') {
            "py" => Language::Python,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" => Language::Cpp,
            "js" => Language::JavaScript,
            "ts" => Language::TypeScript,
            "go" => Language::Go,
            "rs" => Language::Rust,
            _ => Language::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Language::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Fence tag used for markdown code blocks.
    pub fn fence_tag(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Unknown => "text",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// One discovered source file.
///
/// Produced by discovery and read-only afterwards. `rel_path` is the
/// uniqueness key and always uses `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileRef {
    pub path: PathBuf,
    pub rel_path: String,
    pub language: Language,
    pub hash: String,
    pub content: String,
}
