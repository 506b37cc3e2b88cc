use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use codesubmit::config::ExecutionConfig;
use codesubmit::exec::{ExecutionOutcome, ExecutionResult, ProcessRunner, RunCommand};

type Responder = Box<dyn Fn(&RunCommand) -> ExecutionResult + Send>;

/// A fake runner that:
/// - records every command it is asked to run (the spawn count is the
///   length of that list)
/// - returns exit 0 with `ran <program>` on stdout, unless a responder is set.
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<RunCommand>>>,
    responder: Option<Responder>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: None,
        }
    }

    pub fn with_responder<F>(mut self, f: F) -> Self
    where
        F: Fn(&RunCommand) -> ExecutionResult + Send + 'static,
    {
        self.responder = Some(Box::new(f));
        self
    }

    /// Shared handle to the recorded commands.
    pub fn calls(&self) -> Arc<Mutex<Vec<RunCommand>>> {
        Arc::clone(&self.calls)
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for FakeRunner {
    fn run<'a>(
        &'a mut self,
        command: &'a RunCommand,
        _config: &'a ExecutionConfig,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + 'a>> {
        self.calls.lock().unwrap().push(command.clone());
        let result = match &self.responder {
            Some(f) => f(command),
            None => ExecutionResult::new(
                command,
                ExecutionOutcome::Completed { exit_code: 0 },
                format!("ran {}\n", command.program()),
                String::new(),
                Duration::from_millis(1),
            ),
        };
        Box::pin(async move { result })
    }
}
