// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs resolved commands as child processes using
//! `tokio::process::Command` and turns whatever happens into an
//! [`ExecutionResult`].
//!
//! - [`command`] defines [`RunCommand`] and its reproducible display form.
//! - [`result`] holds [`ExecutionResult`] and the discriminated
//!   [`ExecutionOutcome`].
//! - [`capture`] contains the shared capture logs and stream pumps.
//! - [`input`] provides the operator input source for interactive runs.
//! - [`backend`] provides the `ProcessRunner` trait the engine depends on.
//! - [`runner`] is the production `TokioProcessRunner`.

pub mod backend;
pub mod capture;
pub mod command;
pub mod input;
pub mod result;
pub mod runner;

pub use backend::ProcessRunner;
pub use capture::CaptureLog;
pub use command::{shell_quote, RunCommand};
pub use input::OperatorInput;
pub use result::{ExecutionContext, ExecutionOutcome, ExecutionResult};
pub use runner::TokioProcessRunner;
