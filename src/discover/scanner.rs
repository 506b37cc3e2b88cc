// src/discover/scanner.rs

use std::collections::HashSet;
use std::path::{Component, Path};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

use crate::config::InputConfig;
use crate::discover::hash::compute_content_hash;
use crate::errors::{CodesubmitError, Result};
use crate::fs::FileSystem;
use crate::types::{Language, SourceFileRef};

/// Recursively scan `root` for source files.
///
/// - Directories whose name starts with `.` are skipped.
/// - A file is kept when its extension (with the dot) is listed in
///   `input.extensions` and its relative path matches none of
///   `input.exclude`.
/// - Files that cannot be read are skipped with a warning.
///
/// The result is sorted by `rel_path`.
pub fn scan_directory(
    fs: &dyn FileSystem,
    root: &Path,
    input: &InputConfig,
) -> Result<Vec<SourceFileRef>> {
    if !fs.is_dir(root) {
        return Err(CodesubmitError::InputRootNotFound(root.to_path_buf()));
    }
    let root = fs.canonicalize(root)?;

    let extensions: HashSet<&str> = input.extensions.iter().map(|s| s.as_str()).collect();
    let excludes = build_exclude_set(&input.exclude)?;

    let mut results = Vec::new();
    let mut stack = vec![root.clone()];

    while let Some(dir) = stack.pop() {
        for entry in fs.read_dir(&dir)? {
            let name = match entry.file_name().and_then(|n| n.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };

            if fs.is_dir(&entry) {
                if name.starts_with('.') {
                    debug!(dir = ?entry, "skipping hidden directory");
                } else {
                    stack.push(entry);
                }
                continue;
            }

            let Some(ext) = entry.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !extensions.contains(format!(".{ext}").as_str()) {
                continue;
            }

            let rel_path = relative_path(&root, &entry);
            if excludes.is_match(&rel_path) {
                debug!(file = %rel_path, "excluded by [input].exclude");
                continue;
            }

            let bytes = match fs.read(&entry) {
                Ok(b) => b,
                Err(e) => {
                    warn!(file = ?entry, error = %e, "could not read source file; skipping");
                    continue;
                }
            };

            results.push(SourceFileRef {
                language: Language::from_extension(ext),
                hash: compute_content_hash(&bytes),
                content: String::from_utf8_lossy(&bytes).into_owned(),
                path: entry,
                rel_path,
            });
        }
    }

    results.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    debug!(count = results.len(), root = ?root, "discovery complete");
    Ok(results)
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            CodesubmitError::ConfigError(format!("invalid exclude pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| CodesubmitError::ConfigError(format!("building exclude set: {e}")))
}

/// `/`-separated path of `path` below `root`.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
