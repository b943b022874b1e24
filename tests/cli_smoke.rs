//! End-to-end checks against the compiled binary.
//!
//! Uses `std::process::Command` so exit codes and the stdout/stderr split are
//! exercised exactly as a workflow step would see them.

use std::process::{Command, Output};

fn prbody_bin() -> std::path::PathBuf {
    env!("CARGO_BIN_EXE_prbody").into()
}

fn run(args: &[&str]) -> Output {
    Command::new(prbody_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run prbody")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "prbody failed:\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

#[test]
fn help_exits_zero() {
    let output = run(&["--help"]);
    assert_success(&output);
    assert!(stdout(&output).contains("prbody"));
}

#[test]
fn text_argument_is_escaped() {
    let output = run(&["--text", "`hi` (there)", "--preset", "markup"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "\\`hi\\` \\(there\\)\n");
}

#[test]
fn text_argument_accepts_bullet_list() {
    let output = run(&["--text", "- item\n- other (b)"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "- item\\n- other \\(b\\)\n");
}

#[test]
fn template_file_to_json_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("PULL_REQUEST_TEMPLATE.md");
    std::fs::write(
        &path,
        "  ## Summary\r\n<!-- Describe the change -->\r\nFixes (#42) ✓  \r\n",
    )
    .unwrap();

    let output = run(&[path.to_str().unwrap(), "--format", "json"]);
    assert_success(&output);

    let out = stdout(&output);
    let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(value["content"], r"## Summary\n\nFixes \(#42\) ✓  \n");
    assert!(out.contains('✓'), "non-ASCII should stay literal: {out}");
}

#[test]
fn pull_request_payload_defaults_to_master() {
    let output = run(&["--text", "body", "--preset", "none", "-f", "pull-request"]);
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim_end()).unwrap();
    assert_eq!(value["pull_request"]["body"], "body");
    assert_eq!(value["pull_request"]["base"]["ref"], "master");
    assert_eq!(value["pull_request"]["merged"], true);
}

#[test]
fn missing_file_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.md");

    let output = run(&[path.to_str().unwrap(), "-f", "json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "stdout: {}", stdout(&output));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("file not found"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_utf8_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.md");
    std::fs::write(&path, b"r\xe9sum\xe9").unwrap();

    let output = run(&[path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("UTF-8"));
}

#[test]
fn file_and_text_conflict_is_usage_error() {
    let output = run(&["body.md", "--text", "x"]);
    assert_eq!(output.status.code(), Some(2));
}
