//! CLI tests for `tspl validate`, including stdin input and the JSON contract.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::cargo;

const VALID: &str = "SIZE 50 mm, 30 mm\nGAP 2 mm, 0 mm\nCLS\nTEXT 10,10,\"3\",0,1,1,\"HELLO\"\nPRINT 1\n";
const INVALID: &str = "SIZE 50 mm\nDIRECTION 9\nFOO 1,2\n";

fn tspl_cmd() -> Command {
    Command::new(cargo::cargo_bin!("tspl"))
}

fn write_temp_tspl(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("label.tspl");
    fs::write(&path, content).expect("write temp tspl");
    (dir, path.to_string_lossy().to_string())
}

fn run_with_stdin(args: &[&str], stdin_body: &str) -> std::process::Output {
    let mut child = tspl_cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn tspl command");

    {
        let stdin = child.stdin.as_mut().expect("stdin handle");
        stdin
            .write_all(stdin_body.as_bytes())
            .expect("write stdin body");
    }

    child.wait_with_output().expect("wait for output")
}

#[test]
fn valid_file_json_reports_no_errors() {
    let (_dir, path) = write_temp_tspl(VALID);
    let output = tspl_cmd()
        .args(["validate", &path, "--output", "json"])
        .output()
        .expect("run validate");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(json["valid"], true);
    assert_eq!(json["errors"], serde_json::json!([]));
}

#[test]
fn invalid_file_json_lists_errors_and_exits_one() {
    let (_dir, path) = write_temp_tspl(INVALID);
    let output = tspl_cmd()
        .args(["validate", &path, "--output", "json"])
        .output()
        .expect("run validate");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(json["valid"], false);
    let errors = json["errors"].as_array().expect("errors array");
    let lines: Vec<u64> = errors.iter().filter_map(|e| e["line"].as_u64()).collect();
    assert_eq!(lines, vec![1, 2, 3, 0]);
    assert_eq!(errors[2]["command"], "FOO");
    for e in errors {
        let keys: Vec<&String> = e.as_object().expect("object").keys().collect();
        assert_eq!(keys.len(), 3, "unexpected keys: {keys:?}");
    }
}

#[test]
fn validate_reads_stdin_dash() {
    let output = run_with_stdin(&["validate", "-", "--output", "json"], VALID);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(json["valid"], true);
}

#[test]
fn check_alias_is_available() {
    let output = tspl_cmd()
        .args(["check", "--help"])
        .output()
        .expect("run check help");
    assert!(output.status.success());
}

#[test]
fn pretty_output_annotates_source_on_stderr() {
    let (_dir, path) = write_temp_tspl(INVALID);
    let output = tspl_cmd()
        .args(["validate", &path, "--output", "pretty"])
        .output()
        .expect("run validate");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TSPL1101"), "stderr={stderr}");
    assert!(stderr.contains("TSPL1001"), "stderr={stderr}");
    assert!(stderr.contains("missing required PRINT command"), "stderr={stderr}");
    assert!(stderr.contains("4 errors"), "stderr={stderr}");
}
