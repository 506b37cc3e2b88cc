// src/report/markdown.rs

use std::fmt::Write as _;

use crate::config::ProjectSection;
use crate::engine::ExecutionEntry;
use crate::exec::ExecutionResult;
use crate::report::ReportFormatter;

/// Markdown document with a table of contents and one section per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn format(&self, entries: &[ExecutionEntry], project: &ProjectSection) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = write_document(&mut out, entries, project);
        out
    }
}

fn write_document(
    out: &mut String,
    entries: &[ExecutionEntry],
    project: &ProjectSection,
) -> std::fmt::Result {
    writeln!(out, "# {}", project.title)?;
    writeln!(out)?;
    writeln!(out, "**Author:** {}", project.author)?;
    writeln!(out)?;

    writeln!(out, "## Table of Contents")?;
    writeln!(out)?;
    for (i, entry) in entries.iter().enumerate() {
        let rel = &entry.file.rel_path;
        writeln!(out, "{}. [{}](#{})", i + 1, rel, anchor(rel))?;
    }
    writeln!(out)?;

    for entry in entries {
        write_entry(out, entry)?;
    }
    Ok(())
}

fn write_entry(out: &mut String, entry: &ExecutionEntry) -> std::fmt::Result {
    let file = &entry.file;
    writeln!(out, "---")?;
    writeln!(out)?;
    writeln!(out, "## {}", file.rel_path)?;
    writeln!(out)?;
    writeln!(out, "- **Language:** {}", file.language)?;
    writeln!(out, "- **BLAKE3:** `{}`", file.hash)?;
    writeln!(out)?;
    writeln!(out, "### Source")?;
    writeln!(out)?;
    code_block(out, file.language.fence_tag(), &file.content)?;

    writeln!(out, "### Execution")?;
    writeln!(out)?;
    match &entry.result {
        Some(result) => write_result(out, result)?,
        None => {
            writeln!(out, "_Execution skipped._")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_result(out: &mut String, result: &ExecutionResult) -> std::fmt::Result {
    writeln!(out, "- **Command:** `{}`", result.command())?;
    writeln!(out, "- **Exit code:** {}", result.exit_code())?;
    writeln!(out, "- **Duration:** {:.3}s", result.duration().as_secs_f64())?;
    let ctx = result.context();
    writeln!(
        out,
        "- **Context:** `{}` on {} as {}",
        ctx.cwd.display(),
        ctx.os,
        ctx.user
    )?;
    if result.timed_out() {
        writeln!(out)?;
        writeln!(out, "> **Timed out.** The process was killed; output is partial.")?;
    }
    writeln!(out)?;

    writeln!(out, "#### Output")?;
    writeln!(out)?;
    if result.stdout().is_empty() {
        writeln!(out, "_No output._")?;
        writeln!(out)?;
    } else {
        code_block(out, "text", result.stdout())?;
    }

    if !result.stderr().is_empty() {
        writeln!(out, "#### Errors")?;
        writeln!(out)?;
        code_block(out, "text", result.stderr())?;
    }
    Ok(())
}

/// Fence `body` with enough backticks that nothing inside can close it.
fn code_block(out: &mut String, tag: &str, body: &str) -> std::fmt::Result {
    let fence = "`".repeat(fence_len(body));
    writeln!(out, "{fence}{tag}")?;
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    writeln!(out, "{fence}")?;
    writeln!(out)
}

fn fence_len(body: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in body.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    (longest + 1).max(3)
}

/// GitHub-style heading anchor.
fn anchor(heading: &str) -> String {
    heading
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_grows_past_embedded_backticks() {
        assert_eq!(fence_len("plain"), 3);
        assert_eq!(fence_len("```rust\n```"), 4);
        assert_eq!(fence_len("a ````` b"), 6);
    }

    #[test]
    fn anchors_drop_punctuation() {
        assert_eq!(anchor("src/demo/Hello.java"), "srcdemohellojava");
        assert_eq!(anchor("my file_1.py"), "my-file_1py");
    }
}
