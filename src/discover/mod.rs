// src/discover/mod.rs

//! Source file discovery.
//!
//! Walks the input root, keeps files whose extension is configured, and
//! produces one [`SourceFileRef`](crate::types::SourceFileRef) per file,
//! sorted by relative path. The execution engine consumes this list as-is.

pub mod hash;
pub mod scanner;

pub use hash::compute_content_hash;
pub use scanner::scan_directory;
