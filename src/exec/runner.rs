// src/exec/runner.rs

//! Child process execution with timeout, in batch or interactive mode.

use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin};
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::ExecutionConfig;
use crate::exec::backend::ProcessRunner;
use crate::exec::capture::{pump, CaptureLog, Echo};
use crate::exec::command::RunCommand;
use crate::exec::input::OperatorInput;
use crate::exec::result::{ExecutionOutcome, ExecutionResult};

/// How long stream readers get to finish after the process is gone.
pub const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Runs commands as real child processes using `tokio::process`.
///
/// - Batch mode writes `stdin_input` to the child and closes its stdin.
/// - Interactive mode relays [`OperatorInput`] lines to the child, echoes
///   its output to the console, and records each relayed line in the
///   captured stdout so the result reads like a terminal transcript.
#[derive(Debug)]
pub struct TokioProcessRunner {
    input: Option<OperatorInput>,
    echo: bool,
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioProcessRunner {
    /// Runner for the CLI: interactive input comes from the terminal (opened
    /// on first use) and output is echoed live.
    pub fn new() -> Self {
        Self {
            input: None,
            echo: true,
        }
    }

    /// Use `input` instead of the terminal for interactive runs.
    pub fn with_input(mut self, input: OperatorInput) -> Self {
        self.input = Some(input);
        self
    }

    /// Enable or disable the live console echo of interactive runs.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn operator_input(&mut self) -> OperatorInput {
        self.input.get_or_insert_with(OperatorInput::stdin).clone()
    }

    async fn execute(&mut self, command: &RunCommand, config: &ExecutionConfig) -> ExecutionResult {
        let interactive = config.interactive;
        let echo = interactive && self.echo;
        let relay_source = if interactive {
            Some(self.operator_input())
        } else {
            None
        };

        info!(
            command = %command.display(),
            interactive,
            timeout_ms = config.timeout.as_millis() as u64,
            "starting process"
        );

        let mut cmd = command.to_tokio_command();
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let started = Instant::now();
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                let reason = format!("failed to start `{}`: {}", command.program(), e);
                warn!(command = %command.display(), error = %e, "process failed to start");
                return ExecutionResult::failed_to_start(command, reason, started.elapsed());
            }
        };

        let out_log = CaptureLog::new();
        let err_log = CaptureLog::new();

        let stdout_task = child.stdout.take().map(|s| {
            let echo = echo.then_some(Echo::Stdout);
            tokio::spawn(pump(s, out_log.clone(), echo, "stdout"))
        });
        let stderr_task = child.stderr.take().map(|s| {
            let echo = echo.then_some(Echo::Stderr);
            tokio::spawn(pump(s, err_log.clone(), echo, "stderr"))
        });

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let stdin_task = child.stdin.take().map(|stdin| match relay_source {
            Some(input) => tokio::spawn(relay_input(input.lines(), stdin, out_log.clone(), cancel_rx)),
            None => tokio::spawn(write_payload(stdin, config.stdin_input.clone().into_bytes())),
        });

        let waited = wait_with_timeout(&mut child, config.timeout).await;
        let duration = started.elapsed();

        // Stops the relay; the batch writer ignores it.
        let _ = cancel_tx.send(());

        join_bounded(stdout_task, "stdout").await;
        join_bounded(stderr_task, "stderr").await;
        join_bounded(stdin_task, "stdin").await;

        let mut stderr = err_log.snapshot();
        let outcome = match waited {
            Waited::Exited(code) => ExecutionOutcome::Completed { exit_code: code },
            Waited::TimedOut(code) => ExecutionOutcome::TimedOut { exit_code: code },
            Waited::WaitFailed(e) => {
                if !stderr.is_empty() && !stderr.ends_with('\n') {
                    stderr.push('\n');
                }
                stderr.push_str(&format!("error waiting for process: {e}"));
                ExecutionOutcome::WaitFailed { reason: e }
            }
        };

        let result = ExecutionResult::new(command, outcome, out_log.snapshot(), stderr, duration);
        info!(
            command = %result.command(),
            exit_code = result.exit_code(),
            timed_out = result.timed_out(),
            duration_ms = duration.as_millis() as u64,
            "process finished"
        );
        result
    }
}

impl ProcessRunner for TokioProcessRunner {
    fn run<'a>(
        &'a mut self,
        command: &'a RunCommand,
        config: &'a ExecutionConfig,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ExecutionResult> + Send + 'a>> {
        Box::pin(self.execute(command, config))
    }
}

enum Waited {
    Exited(i32),
    TimedOut(Option<i32>),
    WaitFailed(String),
}

/// Wait for `child`, killing it once `limit` has elapsed.
async fn wait_with_timeout(child: &mut Child, limit: Duration) -> Waited {
    match timeout(limit, child.wait()).await {
        Ok(Ok(status)) => Waited::Exited(status.code().unwrap_or(-1)),
        Ok(Err(e)) => Waited::WaitFailed(e.to_string()),
        Err(_) => {
            info!(timeout_ms = limit.as_millis() as u64, "timeout elapsed; killing process");
            if let Err(e) = child.kill().await {
                warn!(error = %e, "failed to kill timed-out process");
            }
            let code = child.try_wait().ok().flatten().and_then(|s| s.code());
            Waited::TimedOut(code)
        }
    }
}

/// Batch stdin: write the payload (possibly empty) and close the pipe.
async fn write_payload(mut stdin: ChildStdin, payload: Vec<u8>) {
    if !payload.is_empty() {
        if let Err(e) = stdin.write_all(&payload).await {
            debug!(error = %e, "child closed stdin before the payload was written");
            return;
        }
        let _ = stdin.flush().await;
    }
    drop(stdin);
}

/// Interactive stdin: forward operator lines until cancelled.
///
/// Each line is appended to the output log *before* it is handed to the
/// child, so anything the child prints in response lands after it.
async fn relay_input(
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
    mut stdin: ChildStdin,
    out_log: CaptureLog,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let mut lines = lines.lock().await;
    loop {
        tokio::select! {
            biased;
            _ = &mut cancel_rx => {
                debug!("input relay cancelled");
                break;
            }
            line = lines.recv() => match line {
                Some(line) => {
                    out_log.append(line.as_bytes());
                    if let Err(e) = stdin.write_all(line.as_bytes()).await {
                        debug!(error = %e, "child stdin closed; stopping relay");
                        break;
                    }
                    if let Err(e) = stdin.flush().await {
                        debug!(error = %e, "child stdin closed; stopping relay");
                        break;
                    }
                }
                None => {
                    debug!("operator input closed; closing child stdin");
                    break;
                }
            },
        }
    }
}

async fn join_bounded(task: Option<JoinHandle<()>>, label: &'static str) {
    let Some(mut handle) = task else {
        return;
    };
    match timeout(DRAIN_GRACE, &mut handle).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(stream = label, error = %e, "stream task panicked"),
        Err(_) => {
            warn!(stream = label, "stream task did not finish in time; output may be incomplete");
            handle.abort();
        }
    }
}
