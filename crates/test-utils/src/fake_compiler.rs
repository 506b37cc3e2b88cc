use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use codesubmit::java::{CompilationOutcome, JavaCompiler};
use codesubmit::types::SourceFileRef;

/// One recorded compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileBatch {
    pub files: Vec<String>,
    pub classpath: Option<PathBuf>,
}

/// A fake compiler that records each batch (as relative paths) and returns a
/// fixed outcome.
pub struct FakeCompiler {
    batches: Arc<Mutex<Vec<CompileBatch>>>,
    outcome: CompilationOutcome,
}

impl FakeCompiler {
    pub fn succeeding() -> Self {
        Self::with_outcome(CompilationOutcome::succeeded(""))
    }

    pub fn failing(diagnostics: &str) -> Self {
        Self::with_outcome(CompilationOutcome::failed(diagnostics))
    }

    pub fn with_outcome(outcome: CompilationOutcome) -> Self {
        Self {
            batches: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    pub fn batches(&self) -> Arc<Mutex<Vec<CompileBatch>>> {
        Arc::clone(&self.batches)
    }
}

impl JavaCompiler for FakeCompiler {
    fn compile_all<'a>(
        &'a mut self,
        files: &'a [&'a SourceFileRef],
        classpath: Option<&'a Path>,
    ) -> Pin<Box<dyn Future<Output = CompilationOutcome> + Send + 'a>> {
        self.batches.lock().unwrap().push(CompileBatch {
            files: files.iter().map(|f| f.rel_path.clone()).collect(),
            classpath: classpath.map(Path::to_path_buf),
        });
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}
