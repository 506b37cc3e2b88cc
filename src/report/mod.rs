// src/report/mod.rs

//! Rendering the submission document.

use std::path::Path;

use tracing::info;

use crate::config::ProjectSection;
use crate::engine::ExecutionEntry;
use crate::errors::Result;
use crate::fs::FileSystem;

pub mod markdown;

pub use markdown::MarkdownFormatter;

/// Turns executed entries into a document.
pub trait ReportFormatter {
    /// Short name used in progress output.
    fn name(&self) -> &'static str;

    fn format(&self, entries: &[ExecutionEntry], project: &ProjectSection) -> String;

    /// Render and write the document to `output`.
    fn save(
        &self,
        fs: &dyn FileSystem,
        entries: &[ExecutionEntry],
        project: &ProjectSection,
        output: &Path,
    ) -> Result<()> {
        let document = self.format(entries, project);
        fs.write(output, document.as_bytes())?;
        info!(path = ?output, bytes = document.len(), "report written");
        Ok(())
    }
}
