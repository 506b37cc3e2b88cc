// tests/generate_command.rs
#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::path::Path;

use codesubmit::cli::{CliArgs, Command, GenerateArgs, InitArgs};
use codesubmit::run;
use codesubmit_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn generate(dir: &Path, no_exec: bool) -> CliArgs {
    CliArgs {
        log_level: None,
        command: Command::Generate(GenerateArgs {
            config: dir.join("codesubmit.toml"),
            output: dir.join("out/submission.md"),
            no_exec,
            interactive: false,
        }),
    }
}

// `.py` files are handed to `sh` so the test only needs a POSIX shell.
const SHELL_AS_PYTHON: &str = r#"
[project]
title = "Shell Lab"
author = "Tester"

[input]
root = "work"
extensions = [".py", ".c"]

[execution]
timeout = "5s"
stdin_input = "world\n"

[toolchain]
python = "sh"
"#;

#[tokio::test]
async fn generate_runs_files_and_writes_report() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("work/sub"))?;
    fs::write(dir.path().join("codesubmit.toml"), SHELL_AS_PYTHON)?;
    fs::write(dir.path().join("work/greet.py"), "read who\necho \"hello $who\"\n")?;
    fs::write(dir.path().join("work/sub/native.c"), "int main(void) { return 0; }\n")?;

    with_timeout(run(generate(dir.path(), false))).await?;

    let doc = fs::read_to_string(dir.path().join("out/submission.md"))?;
    assert!(doc.starts_with("# Shell Lab\n"));
    assert!(doc.contains("## greet.py"));
    assert!(doc.contains("```text\nhello world\n```"));
    assert!(doc.contains("- **Exit code:** 0"));
    assert!(doc.contains("## sub/native.c"));
    assert!(doc.contains("_Execution skipped._"));
    Ok(())
}

#[tokio::test]
async fn no_exec_keeps_sources_only() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("work"))?;
    fs::write(dir.path().join("codesubmit.toml"), SHELL_AS_PYTHON)?;
    fs::write(dir.path().join("work/boom.py"), "exit 7\n")?;

    with_timeout(run(generate(dir.path(), true))).await?;

    let doc = fs::read_to_string(dir.path().join("out/submission.md"))?;
    assert!(doc.contains("exit 7"));
    assert!(doc.contains("_Execution skipped._"));
    assert!(!doc.contains("**Exit code:**"));
    Ok(())
}

#[tokio::test]
async fn empty_input_root_writes_nothing() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("work"))?;
    fs::write(dir.path().join("codesubmit.toml"), SHELL_AS_PYTHON)?;

    with_timeout(run(generate(dir.path(), false))).await?;

    assert!(!dir.path().join("out/submission.md").exists());
    Ok(())
}

#[tokio::test]
async fn missing_input_root_is_an_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("codesubmit.toml"), SHELL_AS_PYTHON)?;

    let err = with_timeout(run(generate(dir.path(), false))).await.unwrap_err();
    assert!(err.to_string().contains("work"));
    Ok(())
}

#[tokio::test]
async fn init_refuses_a_second_write() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("codesubmit.toml");

    run(CliArgs {
        log_level: None,
        command: Command::Init(InitArgs {
            config: config.clone(),
            force: false,
        }),
    })
    .await?;
    assert!(config.exists());

    let again = run(CliArgs {
        log_level: None,
        command: Command::Init(InitArgs {
            config: config.clone(),
            force: false,
        }),
    })
    .await;
    assert!(again.is_err());
    Ok(())
}
