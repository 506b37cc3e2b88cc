// src/java/classpath.rs

//! Heuristic class-name and classpath-root inference.
//!
//! The root is derived by matching the declared package against the file's
//! directory. When they disagree the containing directory is used instead;
//! that guess can be wrong, and the JVM then reports `ClassNotFoundException`
//! in the captured stderr rather than this module returning an error.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

static PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^package\s+([A-Za-z_$][\w$]*(?:\s*\.\s*[A-Za-z_$][\w$]*)*)\s*;")
        .expect("package pattern is valid")
});

/// What to hand to `java -cp <classpath_root> <class_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaClass {
    pub class_name: String,
    pub classpath_root: PathBuf,
    pub package: Option<String>,
    /// False when a package is declared but the directories don't match it.
    pub layout_matches: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClasspathError {
    #[error("cannot derive a Java class name from {0:?}")]
    NoClassName(PathBuf),
}

/// Return the package declared by `content`, if its first statement is one.
///
/// Blank lines and `//` / `/* */` comments before it are skipped. Any other
/// first line means there is no package declaration.
pub fn detect_package(content: &str) -> Option<String> {
    let mut in_block = false;

    for raw in content.lines() {
        let mut line = raw.trim_start_matches('\u{feff}').trim();

        loop {
            if in_block {
                match line.find("*/") {
                    Some(end) => {
                        line = line[end + 2..].trim_start();
                        in_block = false;
                    }
                    None => {
                        line = "";
                        break;
                    }
                }
            }
            if let Some(rest) = line.strip_prefix("/*") {
                in_block = true;
                line = rest;
                continue;
            }
            break;
        }

        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        return PACKAGE_RE
            .captures(line)
            .map(|c| c[1].split_whitespace().collect::<String>());
    }

    None
}

/// Derive the fully qualified class name and classpath root for `path`.
pub fn resolve_class(path: &Path, content: &str) -> Result<JavaClass, ClasspathError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| is_java_identifier(s))
        .ok_or_else(|| ClasspathError::NoClassName(path.to_path_buf()))?;

    let dir = non_empty_or_dot(path.parent().unwrap_or(Path::new("")));
    let package = detect_package(content);

    let Some(pkg) = package else {
        return Ok(JavaClass {
            class_name: stem.to_string(),
            classpath_root: dir,
            package: None,
            layout_matches: true,
        });
    };

    let segments: Vec<&str> = pkg.split('.').collect();
    let pkg_path: PathBuf = segments.iter().collect();

    let (classpath_root, layout_matches) = if dir.ends_with(&pkg_path) {
        let root = dir
            .ancestors()
            .nth(segments.len())
            .map(non_empty_or_dot)
            .unwrap_or_else(|| PathBuf::from("."));
        (root, true)
    } else {
        debug!(
            file = ?path,
            package = %pkg,
            "directory layout does not match package; using containing directory as classpath"
        );
        (dir, false)
    };

    Ok(JavaClass {
        class_name: format!("{pkg}.{stem}"),
        classpath_root,
        package: Some(pkg),
        layout_matches,
    })
}

fn non_empty_or_dot(p: &Path) -> PathBuf {
    if p.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        p.to_path_buf()
    }
}

fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_after_comments_is_found() {
        let src = "// header\n/* multi\n   line */\n\npackage a.b.c;\n\nclass X {}\n";
        assert_eq!(detect_package(src), Some("a.b.c".to_string()));
    }

    #[test]
    fn package_after_code_is_ignored() {
        let src = "import java.util.*;\npackage late;\n";
        assert_eq!(detect_package(src), None);
    }

    #[test]
    fn inline_block_comment_before_package() {
        assert_eq!(detect_package("/* x */ package p;"), Some("p".to_string()));
    }

    #[test]
    fn relative_path_with_matching_package_uses_dot_root() {
        let class = resolve_class(Path::new("demo/Hello.java"), "package demo;").unwrap();
        assert_eq!(class.class_name, "demo.Hello");
        assert_eq!(class.classpath_root, PathBuf::from("."));
    }

    #[test]
    fn invalid_stem_is_an_error() {
        let err = resolve_class(Path::new("/x/my-file.java"), "").unwrap_err();
        assert!(matches!(err, ClasspathError::NoClassName(_)));
    }
}
