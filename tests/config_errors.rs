// tests/config_errors.rs

use std::error::Error;
use std::fs;
use std::time::Duration;

use codesubmit::config::{load_and_validate, load_or_default, ConfigFile, RawConfigFile};
use codesubmit::errors::CodesubmitError;

type TestResult = Result<(), Box<dyn Error>>;

fn parse(toml_src: &str) -> Result<ConfigFile, CodesubmitError> {
    let raw: RawConfigFile = toml::from_str(toml_src)?;
    ConfigFile::try_from(raw)
}

#[test]
fn full_config_resolves() -> TestResult {
    let cfg = parse(
        r#"
        [project]
        title = "Lab 3"
        author = "Sam"

        [input]
        root = "src"
        extensions = [".py"]
        exclude = ["**/scratch_*.py"]

        [execution]
        timeout = "1500ms"
        stdin_input = "4\n"

        [toolchain]
        python = "python3.12"
        compile_timeout = "2m"
        "#,
    )?;

    assert_eq!(cfg.project.title, "Lab 3");
    assert_eq!(cfg.input.extensions, [".py"]);
    assert_eq!(cfg.execution.timeout, Duration::from_millis(1500));
    assert_eq!(cfg.execution.stdin_input, "4\n");
    assert!(cfg.execution.enabled);
    assert_eq!(cfg.toolchain.python, "python3.12");
    assert_eq!(cfg.toolchain.java, "java");
    assert_eq!(cfg.toolchain.compile_timeout, Duration::from_secs(120));
    Ok(())
}

#[test]
fn invalid_timeout_is_rejected() {
    for bad in ["\"soon\"", "\"0s\"", "\"-1s\""] {
        let src = format!("[execution]\ntimeout = {bad}\n");
        let err = parse(&src).unwrap_err();
        assert!(matches!(err, CodesubmitError::ConfigError(_)), "{bad}: {err:?}");
    }
}

#[test]
fn extensions_must_have_leading_dot() {
    let err = parse("[input]\nextensions = [\"py\"]\n").unwrap_err();
    assert!(matches!(err, CodesubmitError::ConfigError(msg) if msg.contains("py")));

    let err = parse("[input]\nextensions = []\n").unwrap_err();
    assert!(matches!(err, CodesubmitError::ConfigError(_)));
}

#[test]
fn bad_exclude_glob_is_rejected() {
    let err = parse("[input]\nexclude = [\"src/[\"]\n").unwrap_err();
    assert!(matches!(err, CodesubmitError::ConfigError(_)));
}

#[test]
fn empty_toolchain_program_is_rejected() {
    let err = parse("[toolchain]\njava = \"  \"\n").unwrap_err();
    assert!(matches!(err, CodesubmitError::ConfigError(msg) if msg.contains("java")));
}

#[test]
fn interactive_with_stdin_input_is_accepted() -> TestResult {
    let cfg = parse("[execution]\ninteractive = true\nstdin_input = \"x\"\n")?;
    assert!(cfg.execution.interactive);
    Ok(())
}

#[test]
fn malformed_toml_is_a_toml_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("codesubmit.toml");
    fs::write(&path, "[execution\nenabled = true")?;

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, CodesubmitError::TomlError(_)));
    Ok(())
}

#[test]
fn missing_file_loads_defaults_only_when_asked() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("absent.toml");

    assert!(matches!(load_and_validate(&path), Err(CodesubmitError::IoError(_))));

    let cfg = load_or_default(&path)?;
    assert_eq!(cfg.execution.timeout, Duration::from_secs(5));
    assert_eq!(cfg.input.extensions, [".py", ".java"]);
    Ok(())
}

#[test]
fn overflowing_timeouts_are_config_errors() {
    let err = parse("[execution]\ntimeout = \"9999999999999999h\"\n").unwrap_err();
    assert!(matches!(err, CodesubmitError::ConfigError(msg) if msg.contains("too large")));

    let err = parse("[toolchain]\ncompile_timeout = \"999999999999999999m\"\n").unwrap_err();
    assert!(matches!(err, CodesubmitError::ConfigError(msg) if msg.contains("compile_timeout")));
}
