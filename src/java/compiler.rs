// src/java/compiler.rs

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::ToolchainConfig;
use crate::exec::RunCommand;
use crate::types::SourceFileRef;

/// Aggregate result of compiling a batch of Java sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationOutcome {
    pub success: bool,
    /// Compiler output, or the reason the compiler could not run.
    pub diagnostics: String,
}

impl CompilationOutcome {
    pub fn succeeded(diagnostics: impl Into<String>) -> Self {
        Self {
            success: true,
            diagnostics: diagnostics.into(),
        }
    }

    pub fn failed(diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Compiles every Java file of a batch in one go, so classes that refer to
/// each other resolve.
///
/// `classpath`, when set, is where already compiled classes are looked up.
/// Never fails: problems are reported through [`CompilationOutcome`].
pub trait JavaCompiler: Send {
    fn compile_all<'a>(
        &'a mut self,
        files: &'a [&'a SourceFileRef],
        classpath: Option<&'a Path>,
    ) -> Pin<Box<dyn Future<Output = CompilationOutcome> + Send + 'a>>;
}

/// `javac -encoding UTF-8 [-cp <root>] <files...>`, writing classes next to
/// the sources.
#[derive(Debug, Clone)]
pub struct JavacCompiler {
    javac: String,
    timeout: Duration,
}

impl JavacCompiler {
    pub fn new(javac: impl Into<String>, timeout: Duration) -> Self {
        Self {
            javac: javac.into(),
            timeout,
        }
    }

    pub fn from_config(toolchain: &ToolchainConfig) -> Self {
        Self::new(toolchain.javac.clone(), toolchain.compile_timeout)
    }

    fn command_for(&self, files: &[&SourceFileRef], classpath: Option<&Path>) -> RunCommand {
        let mut base = RunCommand::new(self.javac.clone()).args(["-encoding", "UTF-8"]);
        if let Some(root) = classpath {
            base = base.arg("-cp").path_arg(root);
        }
        files.iter().fold(base, |cmd, f| cmd.path_arg(&f.path))
    }

    async fn compile(&self, files: &[&SourceFileRef], classpath: Option<&Path>) -> CompilationOutcome {
        let command = self.command_for(files, classpath);
        info!(files = files.len(), command = %command.display(), "compiling java sources");

        let mut cmd = command.to_tokio_command();
        cmd.stdin(Stdio::null()).kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(javac = %self.javac, error = %e, "could not launch java compiler");
                return CompilationOutcome::failed(format!(
                    "failed to launch `{}`: {}",
                    self.javac, e
                ));
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "java compilation timed out");
                return CompilationOutcome::failed(format!(
                    "`{}` did not finish within {:?}",
                    self.javac, self.timeout
                ));
            }
        };

        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));

        if output.status.success() {
            debug!("java compilation succeeded");
            CompilationOutcome::succeeded(diagnostics)
        } else {
            warn!(
                exit_code = output.status.code().unwrap_or(-1),
                "java compilation failed"
            );
            CompilationOutcome::failed(diagnostics)
        }
    }
}

impl JavaCompiler for JavacCompiler {
    fn compile_all<'a>(
        &'a mut self,
        files: &'a [&'a SourceFileRef],
        classpath: Option<&'a Path>,
    ) -> Pin<Box<dyn Future<Output = CompilationOutcome> + Send + 'a>> {
        Box::pin(self.compile(files, classpath))
    }
}
