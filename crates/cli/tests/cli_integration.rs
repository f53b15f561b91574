//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `ugat` binary and verify exit codes,
//! stdout content, and stderr content.
//!
//! Tests that read fixtures set `current_dir` to the workspace root so the
//! relative `conformance/` paths resolve.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `ugat` binary, rooted at workspace.
fn ugat() -> Command {
    let mut cmd = cargo_bin_cmd!("ugat");
    cmd.current_dir(workspace_root());
    cmd
}

/// Write `content` to `name` inside a fresh temp dir.
fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path)
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    ugat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Syntax checker for the ugat teaching language",
        ));
}

#[test]
fn version_exits_0() {
    ugat()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ugat"));
}

// ──────────────────────────────────────────────
// 2. Check subcommand
// ──────────────────────────────────────────────

#[test]
fn check_valid_program_exits_0() {
    ugat()
        .args(["check", "conformance/accept/for_loop.tok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Syntax Analysis Complete."));
}

#[test]
fn check_trailing_tokens_warns_but_exits_0() {
    ugat()
        .args(["check", "conformance/trailing/extra_tokens.tok"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning: Extra tokens after program end",
        ));
}

#[test]
fn check_invalid_program_exits_1_with_diagnostic() {
    ugat()
        .args(["check", "conformance/reject/for_increment_semicolon.tok"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Syntax Error at line 2: expected ')' (found ';')",
        ));
}

#[test]
fn check_json_output_on_rejection() {
    let output = ugat()
        .args([
            "--output",
            "json",
            "check",
            "conformance/reject/missing_expression.tok",
        ])
        .output()
        .expect("run ugat");
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stderr).expect("json on stderr");
    assert_eq!(v["accepted"], false);
    assert_eq!(v["error"]["kind"], "missing_expression");
    assert_eq!(v["error"]["line"], 2);
}

#[test]
fn check_json_output_on_acceptance() {
    let output = ugat()
        .args(["--output", "json", "check", "conformance/accept/loops.tok"])
        .output()
        .expect("run ugat");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(v["accepted"], true);
    assert!(v["trailing"].is_null());
    assert_eq!(v["unrecognized"], serde_json::json!([]));
}

#[test]
fn check_missing_file_exits_1() {
    ugat()
        .args(["check", "conformance/does_not_exist.tok"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn check_quiet_suppresses_diagnostic() {
    ugat()
        .args([
            "--quiet",
            "check",
            "conformance/reject/double_kundiman.tok",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
}

#[test]
fn check_quiet_suppresses_json_diagnostic() {
    ugat()
        .args([
            "--quiet",
            "--output",
            "json",
            "check",
            "conformance/reject/double_kundiman.tok",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty());
}

#[test]
fn check_quiet_json_still_prints_acceptance() {
    let output = ugat()
        .args([
            "--quiet",
            "--output",
            "json",
            "check",
            "conformance/accept/empty_function.tok",
        ])
        .output()
        .expect("run ugat");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(v["accepted"], true);
}

#[test]
fn check_json_input_reports_unrecognized_codes() {
    let (_dir, path) = temp_file(
        "odd.json",
        r#"[
  {"code": "R_WALA", "lexeme": "wala", "line": 1},
  {"code": "R_UGAT", "lexeme": "ugat", "line": 1},
  {"code": "D_LPAREN", "lexeme": "(", "line": 1},
  {"code": "D_RPAREN", "lexeme": ")", "line": 1},
  {"code": "D_LBRACE", "lexeme": "{", "line": 1},
  {"code": "X_AT", "lexeme": "@", "line": 2},
  {"code": "D_RBRACE", "lexeme": "}", "line": 3}
]"#,
    );
    ugat()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Warning: unrecognized token '@' (X_AT) at line 2",
        ))
        .stderr(predicate::str::contains("Syntax Error at line 2"));
}

#[test]
fn check_reports_unrecognized_tokens() {
    let (_dir, path) = temp_file(
        "odd.tok",
        "wala | R_WALA\nugat | R_UGAT\n( | D_LPAREN\n) | D_RPAREN\n{ | D_LBRACE\n@ | X_AT\n} | D_RBRACE\n",
    );
    ugat()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Warning: unrecognized token '@' (X_AT) at line 6",
        ))
        .stderr(predicate::str::contains("expected '}'"));
}

#[test]
fn check_accepts_json_token_files() {
    let (_dir, path) = temp_file(
        "prog.json",
        r#"[
  {"category": "reserved", "code": "R_WALA", "lexeme": "wala", "line": 1},
  {"category": "reserved", "code": "R_UGAT", "lexeme": "ugat", "line": 1},
  {"category": "delimiter", "code": "D_LPAREN", "lexeme": "(", "line": 1},
  {"category": "delimiter", "code": "D_RPAREN", "lexeme": ")", "line": 1},
  {"category": "delimiter", "code": "D_LBRACE", "lexeme": "{", "line": 1},
  {"category": "delimiter", "code": "D_RBRACE", "lexeme": "}", "line": 2}
]"#,
    );
    ugat()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Syntax Analysis Complete."));
}

// ──────────────────────────────────────────────
// 3. Configuration
// ──────────────────────────────────────────────

#[test]
fn config_max_depth_is_applied() {
    let (dir, config) = temp_file("ugat.toml", "[parser]\nmax_depth = 1\n");
    let fixture = workspace_root().join("conformance/accept/for_loop.tok");
    let mut cmd = cargo_bin_cmd!("ugat");
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&fixture)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nesting depth exceeds limit of 1"));
}

#[test]
fn config_output_format_is_used_when_flag_absent() {
    let (_dir, config) = temp_file("ugat.toml", "[output]\nformat = \"json\"\n");
    let output = ugat()
        .arg("--config")
        .arg(&config)
        .args(["check", "conformance/accept/empty_function.tok"])
        .output()
        .expect("run ugat");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(v["accepted"], true);
}

#[test]
fn invalid_config_exits_1() {
    let (_dir, config) = temp_file("ugat.toml", "[parser]\nmax_depth = \"deep\"\n");
    ugat()
        .arg("--config")
        .arg(&config)
        .args(["check", "conformance/accept/empty_function.tok"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse"));
}

// ──────────────────────────────────────────────
// 4. Tokens subcommand
// ──────────────────────────────────────────────

#[test]
fn tokens_prints_resolved_table() {
    ugat()
        .args(["tokens", "conformance/accept/declarations.tok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R_BILANG"))
        .stdout(predicate::str::contains("L_LUTANG_LITERAL"))
        .stdout(predicate::str::contains("CATEGORY"));
}

#[test]
fn tokens_json_drops_comments() {
    let output = ugat()
        .args([
            "--output",
            "json",
            "tokens",
            "conformance/accept/precedence.tok",
        ])
        .output()
        .expect("run ugat");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let tokens = v.as_array().expect("array");
    assert_eq!(tokens.len(), 34);
    assert!(tokens.iter().all(|t| t["category"] != "comment"));
    assert_eq!(tokens[0]["code"], "R_WALA");
}

// ──────────────────────────────────────────────
// 5. Conformance runner
// ──────────────────────────────────────────────

#[test]
fn test_runs_bundled_suite() {
    ugat()
        .args(["test", "conformance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TAP version 14"))
        .stdout(predicate::str::contains("# fail  0"));
}

#[test]
fn test_missing_suite_dir_exits_1() {
    ugat()
        .args(["test", "no-such-suite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "conformance suite directory not found",
        ));
}
