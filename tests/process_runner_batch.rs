// tests/process_runner_batch.rs
#![cfg(unix)]

use std::error::Error;
use std::time::{Duration, Instant};

use codesubmit::exec::{ExecutionOutcome, ProcessRunner, RunCommand, TokioProcessRunner};
use codesubmit_test_utils::builders::ExecutionConfigBuilder;
use codesubmit_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn sh(script: &str) -> RunCommand {
    RunCommand::new("sh").arg("-c").arg(script)
}

#[tokio::test]
async fn captures_stdout_and_exit_code() -> TestResult {
    init_tracing();
    let mut runner = TokioProcessRunner::new();
    let cfg = ExecutionConfigBuilder::new()
        .timeout(Duration::from_secs(5))
        .build();

    let result = with_timeout(runner.run(&sh("echo hi"), &cfg)).await;

    assert_eq!(result.stdout(), "hi\n");
    assert_eq!(result.stderr(), "");
    assert_eq!(result.exit_code(), 0);
    assert!(!result.timed_out());
    assert_eq!(result.command(), "sh -c 'echo hi'");
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_and_stderr_are_kept() -> TestResult {
    let mut runner = TokioProcessRunner::new();
    let cfg = ExecutionConfigBuilder::new().build();

    let result = with_timeout(runner.run(&sh("echo oops >&2; exit 3"), &cfg)).await;

    assert_eq!(result.exit_code(), 3);
    assert_eq!(result.stderr(), "oops\n");
    assert_eq!(result.outcome(), &ExecutionOutcome::Completed { exit_code: 3 });
    Ok(())
}

#[tokio::test]
async fn stdin_payload_is_delivered_then_closed() -> TestResult {
    let mut runner = TokioProcessRunner::new();
    let cfg = ExecutionConfigBuilder::new().stdin_input("5\n7\n").build();

    // `cat` only exits once stdin is closed.
    let result = with_timeout(runner.run(&RunCommand::new("cat"), &cfg)).await;

    assert_eq!(result.stdout(), "5\n7\n");
    assert_eq!(result.exit_code(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_payload_still_closes_stdin() -> TestResult {
    let mut runner = TokioProcessRunner::new();
    let cfg = ExecutionConfigBuilder::new().build();

    let result = with_timeout(runner.run(&sh("wc -c"), &cfg)).await;

    assert_eq!(result.stdout().trim(), "0");
    assert!(!result.timed_out());
    Ok(())
}

#[tokio::test]
async fn timeout_kills_and_marks_result() -> TestResult {
    init_tracing();
    let mut runner = TokioProcessRunner::new();
    let cfg = ExecutionConfigBuilder::new()
        .timeout(Duration::from_millis(300))
        .build();

    let started = Instant::now();
    let result = with_timeout(runner.run(&RunCommand::new("sleep").arg("30"), &cfg)).await;
    let elapsed = started.elapsed();

    assert!(result.timed_out());
    assert_eq!(result.exit_code(), -1);
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_secs(3), "took {:?}", elapsed);
    Ok(())
}

#[tokio::test]
async fn partial_output_survives_timeout() -> TestResult {
    let mut runner = TokioProcessRunner::new();
    let cfg = ExecutionConfigBuilder::new()
        .timeout(Duration::from_millis(500))
        .build();

    let result = with_timeout(runner.run(&sh("echo started; exec sleep 30"), &cfg)).await;

    assert!(result.timed_out());
    assert_eq!(result.stdout(), "started\n");
    Ok(())
}

#[tokio::test]
async fn missing_program_fails_to_start() -> TestResult {
    let mut runner = TokioProcessRunner::new();
    let cfg = ExecutionConfigBuilder::new().build();

    let result = with_timeout(runner.run(&RunCommand::new("definitely-not-a-real-program-xyz"), &cfg)).await;

    assert_eq!(result.exit_code(), -1);
    assert!(matches!(result.outcome(), ExecutionOutcome::FailedToStart { .. }));
    assert!(result.stderr().contains("definitely-not-a-real-program-xyz"));
    assert_eq!(result.stdout(), "");
    Ok(())
}

#[tokio::test]
async fn working_dir_override_is_used() -> TestResult {
    let dir = tempfile::tempdir()?;
    let canonical = dir.path().canonicalize()?;
    let mut runner = TokioProcessRunner::new();
    let cfg = ExecutionConfigBuilder::new().build();

    let cmd = RunCommand::new("pwd").current_dir(&canonical);
    let result = with_timeout(runner.run(&cmd, &cfg)).await;

    assert_eq!(result.stdout().trim_end(), canonical.to_string_lossy());
    assert_eq!(result.context().cwd, canonical);
    Ok(())
}
