// src/engine/orchestrator.rs

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{ExecutionConfig, ToolchainConfig};
use crate::errors::{CodesubmitError, Result};
use crate::exec::{ExecutionResult, ProcessRunner};
use crate::java::JavaCompiler;
use crate::toolchain::{resolve, Resolution, Workspace};
use crate::types::SourceFileRef;

/// One input file paired with what happened when we tried to run it.
///
/// `result` is `None` when execution was disabled or no runner exists for
/// the file's language.
#[derive(Debug, Clone)]
pub struct ExecutionEntry {
    pub file: SourceFileRef,
    pub result: Option<ExecutionResult>,
}

/// Sequential executor over a batch of source files.
pub struct Engine<R: ProcessRunner, C: JavaCompiler> {
    runner: R,
    compiler: C,
    toolchain: ToolchainConfig,
}

impl<R: ProcessRunner, C: JavaCompiler> fmt::Debug for Engine<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("toolchain", &self.toolchain)
            .finish_non_exhaustive()
    }
}

impl<R: ProcessRunner, C: JavaCompiler> Engine<R, C> {
    pub fn new(runner: R, compiler: C, toolchain: ToolchainConfig) -> Self {
        Self {
            runner,
            compiler,
            toolchain,
        }
    }

    /// Execute `files` in order and return one entry per file, in the same
    /// order.
    ///
    /// Per-file failures end up inside the entries. The only error is an
    /// empty batch with execution enabled.
    pub async fn execute_all(
        &mut self,
        files: Vec<SourceFileRef>,
        config: &ExecutionConfig,
    ) -> Result<Vec<ExecutionEntry>> {
        if !config.enabled {
            info!(count = files.len(), "execution disabled; skipping all files");
            return Ok(files
                .into_iter()
                .map(|file| ExecutionEntry { file, result: None })
                .collect());
        }

        if files.is_empty() {
            return Err(CodesubmitError::NoSourceFiles);
        }

        let workspace = Workspace::new(self.toolchain.clone(), &files);
        self.compile_java(&workspace, &files).await;

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let result = self.execute_one(&file, &workspace, config).await;
            entries.push(ExecutionEntry { file, result });
        }
        Ok(entries)
    }

    async fn compile_java(&mut self, workspace: &Workspace, files: &[SourceFileRef]) {
        let shared = workspace.compilable(files);
        let isolated = workspace.isolated(files);
        if shared.is_empty() && isolated.is_empty() {
            return;
        }

        println!("--- Compiling Java Files ---");
        let mut all_ok = true;
        if !shared.is_empty() {
            all_ok &= self.compile_batch(&shared, None).await;
        }
        // Shares a class name with a file under another root, so it cannot
        // join the shared run.
        for (file, class) in isolated {
            debug!(file = %file.rel_path, root = ?class.classpath_root, "compiling separately");
            all_ok &= self.compile_batch(&[file], Some(class.classpath_root.as_path())).await;
        }
        if all_ok {
            println!("Compilation Successful.");
        }
    }

    async fn compile_batch(&mut self, batch: &[&SourceFileRef], classpath: Option<&Path>) -> bool {
        let outcome = self.compiler.compile_all(batch, classpath).await;
        if !outcome.success {
            warn!(count = batch.len(), "java compilation failed; running anyway");
            println!("Warning: Java compilation failed.");
            if !outcome.diagnostics.is_empty() {
                println!("{}", outcome.diagnostics.trim_end());
            }
        }
        outcome.success
    }

    async fn execute_one(
        &mut self,
        file: &SourceFileRef,
        workspace: &Workspace,
        config: &ExecutionConfig,
    ) -> Option<ExecutionResult> {
        match resolve(file, workspace) {
            Resolution::NoRunner => {
                println!(
                    "Skipping execution for {} ({}): No runner defined.",
                    file.rel_path, file.language
                );
                None
            }
            Resolution::Rejected { command, reason } => {
                warn!(file = %file.rel_path, %reason, "not executing");
                println!("--- Skipping {}: {} ---", file.rel_path, reason);
                Some(ExecutionResult::failed_to_start(
                    &command,
                    reason,
                    Duration::ZERO,
                ))
            }
            Resolution::Run(command) => {
                println!("--- Executing {} ---", file.rel_path);
                debug!(file = %file.rel_path, command = %command.display(), "dispatching");
                let result = self.runner.run(&command, config).await;
                info!(
                    file = %file.rel_path,
                    exit_code = result.exit_code(),
                    timed_out = result.timed_out(),
                    "execution finished"
                );
                Some(result)
            }
        }
    }
}
