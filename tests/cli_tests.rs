// Process-level tests for the stax binary

use std::io::Write;
use std::process::{Command, Stdio};

fn stax() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stax"))
}

fn run_on_stdin(source: &str) -> std::process::Output {
    let mut child = stax()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn stax");

    child
        .stdin
        .as_mut()
        .expect("stdin was not captured")
        .write_all(source.as_bytes())
        .expect("Failed to write the program");

    child.wait_with_output().expect("Failed to wait for stax")
}

#[test]
fn test_stdin_program_prints_json_stack() {
    let output = run_on_stdin("5 3 -");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[2]\n");
}

#[test]
fn test_empty_program_prints_empty_array() {
    let output = run_on_stdin("");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[]\n");
}

#[test]
fn test_unreadable_file_exits_with_diagnostic() {
    let output = stax()
        .arg("/no/such/directory/program.stax")
        .output()
        .expect("Failed to run stax");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read"));
    assert!(stderr.contains("/no/such/directory/program.stax"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_parse_failure_exits_without_artifact() {
    let output = run_on_stdin("VARIABLE");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parse error"));
    assert!(stderr.contains("expected variable identifier"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_runtime_failure_exits_without_artifact() {
    let output = run_on_stdin("DROP");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'DROP' needs 1 stack value(s), found 0"));
    assert!(output.stdout.is_empty());
}
