// src/exec/backend.rs

//! Pluggable process runner abstraction.
//!
//! The engine talks to a `ProcessRunner` instead of spawning processes
//! itself. Production code uses [`TokioProcessRunner`](super::TokioProcessRunner);
//! tests can provide a runner that records commands and returns canned
//! results without touching the OS.

use std::future::Future;
use std::pin::Pin;

use crate::config::ExecutionConfig;
use crate::exec::command::RunCommand;
use crate::exec::result::ExecutionResult;

/// Trait abstracting how one resolved command is executed.
///
/// Implementations never fail: every problem (spawn failure, I/O error,
/// timeout) is folded into the returned [`ExecutionResult`].
pub trait ProcessRunner: Send {
    fn run<'a>(
        &'a mut self,
        command: &'a RunCommand,
        config: &'a ExecutionConfig,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + 'a>>;
}
