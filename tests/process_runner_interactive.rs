// tests/process_runner_interactive.rs
#![cfg(unix)]

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;

use codesubmit::exec::{OperatorInput, ProcessRunner, RunCommand, TokioProcessRunner};
use codesubmit_test_utils::builders::ExecutionConfigBuilder;
use codesubmit_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn scripted(lines: &[&str]) -> (mpsc::UnboundedSender<String>, TokioProcessRunner) {
    let (tx, rx) = mpsc::unbounded_channel();
    for line in lines {
        tx.send(line.to_string()).expect("receiver alive");
    }
    let runner = TokioProcessRunner::new()
        .with_input(OperatorInput::from_channel(rx))
        .with_echo(false);
    (tx, runner)
}

#[tokio::test]
async fn relayed_input_precedes_its_echo() -> TestResult {
    init_tracing();
    let (_tx, mut runner) = scripted(&["3\n"]);
    let cfg = ExecutionConfigBuilder::new().interactive(true).build();

    let cmd = RunCommand::new("sh").arg("-c").arg("read n; echo \"got $n\"");
    let result = with_timeout(runner.run(&cmd, &cfg)).await;

    assert_eq!(result.exit_code(), 0);
    assert_eq!(result.stdout(), "3\ngot 3\n");
    let relayed = result.stdout().find("3\n").expect("relayed line recorded");
    let echoed = result.stdout().find("got 3").expect("echo recorded");
    assert!(relayed < echoed);
    Ok(())
}

#[tokio::test]
async fn stdin_input_is_ignored_in_interactive_mode() -> TestResult {
    let (_tx, mut runner) = scripted(&["live\n"]);
    let cfg = ExecutionConfigBuilder::new()
        .interactive(true)
        .stdin_input("canned\n")
        .build();

    let cmd = RunCommand::new("sh").arg("-c").arg("read x; echo \"[$x]\"");
    let result = with_timeout(runner.run(&cmd, &cfg)).await;

    assert_eq!(result.stdout(), "live\n[live]\n");
    Ok(())
}

#[tokio::test]
async fn closed_operator_input_closes_child_stdin() -> TestResult {
    let (tx, mut runner) = scripted(&["a\n", "b\n"]);
    drop(tx);
    let cfg = ExecutionConfigBuilder::new().interactive(true).build();

    let result = with_timeout(runner.run(&RunCommand::new("cat"), &cfg)).await;

    assert_eq!(result.exit_code(), 0);
    assert!(!result.timed_out());
    // Each line is logged once when relayed and once when cat echoes it.
    assert_eq!(result.stdout().matches("a\n").count(), 2);
    assert_eq!(result.stdout().matches("b\n").count(), 2);
    Ok(())
}

#[tokio::test]
async fn waiting_for_input_times_out() -> TestResult {
    let (_tx, mut runner) = scripted(&[]);
    let cfg = ExecutionConfigBuilder::new()
        .interactive(true)
        .timeout(Duration::from_millis(300))
        .build();

    let cmd = RunCommand::new("sh").arg("-c").arg("printf 'name? '; read x; echo hi");
    let result = with_timeout(runner.run(&cmd, &cfg)).await;

    assert!(result.timed_out());
    assert_eq!(result.exit_code(), -1);
    assert_eq!(result.stdout(), "name? ");
    Ok(())
}

#[tokio::test]
async fn lines_typed_between_runs_go_to_the_next_program() -> TestResult {
    let (tx, mut runner) = scripted(&[]);
    let cfg = ExecutionConfigBuilder::new().interactive(true).build();

    let first = with_timeout(runner.run(&RunCommand::new("true"), &cfg)).await;
    assert_eq!(first.exit_code(), 0);
    assert_eq!(first.stdout(), "");

    tx.send("later\n".to_string())?;

    let cmd = RunCommand::new("sh").arg("-c").arg("read x; echo \"2:$x\"");
    let second = with_timeout(runner.run(&cmd, &cfg)).await;
    assert_eq!(second.stdout(), "later\n2:later\n");
    Ok(())
}
