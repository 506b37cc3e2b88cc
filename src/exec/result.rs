// src/exec/result.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::exec::command::RunCommand;

/// How an execution attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The process exited on its own. `-1` when no code was reported (e.g.
    /// killed by a signal).
    Completed { exit_code: i32 },
    /// The timeout elapsed and the process was killed.
    TimedOut { exit_code: Option<i32> },
    /// The process never ran.
    FailedToStart { reason: String },
    /// The process was started but waiting on it failed, so its exit status
    /// is unknown. Recorded as exit code `-1`.
    WaitFailed { reason: String },
}

/// Informational snapshot of where and as whom a program ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub cwd: PathBuf,
    pub os: String,
    pub user: String,
}

impl ExecutionContext {
    pub fn capture(command: &RunCommand) -> Self {
        let cwd = match command.working_dir() {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        Self {
            cwd,
            os: std::env::consts::OS.to_string(),
            user,
        }
    }
}

/// Record of one execution attempt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    stdout: String,
    stderr: String,
    exit_code: i32,
    duration: Duration,
    command: String,
    context: ExecutionContext,
    outcome: ExecutionOutcome,
}

impl ExecutionResult {
    pub fn new(
        command: &RunCommand,
        outcome: ExecutionOutcome,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        let exit_code = match &outcome {
            ExecutionOutcome::Completed { exit_code } => *exit_code,
            ExecutionOutcome::TimedOut { exit_code } => exit_code.unwrap_or(-1),
            ExecutionOutcome::FailedToStart { .. } | ExecutionOutcome::WaitFailed { .. } => -1,
        };
        Self {
            stdout,
            stderr,
            exit_code,
            duration,
            command: command.display(),
            context: ExecutionContext::capture(command),
            outcome,
        }
    }

    /// A result for a process that never ran; the reason becomes stderr.
    pub fn failed_to_start(command: &RunCommand, reason: String, duration: Duration) -> Self {
        Self::new(
            command,
            ExecutionOutcome::FailedToStart {
                reason: reason.clone(),
            },
            String::new(),
            reason,
            duration,
        )
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn outcome(&self) -> &ExecutionOutcome {
        &self.outcome
    }

    pub fn timed_out(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::TimedOut { .. })
    }
}
