use std::path::{Path, PathBuf};

use serde_json::Value;
use ugat_core::{load_tokens, parse_program_with, ClassificationTable, ParseOptions, ParseOutcome};

use crate::tap::Tap;

/// Conformance suite runner.
///
/// Convention:
///   accept/    -- *.tok that must parse with no advisory
///   trailing/  -- *.tok that must parse with a trailing-token advisory
///   reject/    -- *.tok + *.expected-error.json (diagnostic must match exactly)
pub struct RunResult {
    pub failed: usize,
}

#[derive(Clone, Copy)]
enum Expect {
    Clean,
    Trailing,
}

pub fn run_suite(suite_dir: &Path, options: &ParseOptions) -> RunResult {
    let tap = collect(suite_dir, options);
    let failed = tap.failure_count();
    tap.finish();
    RunResult { failed }
}

pub(crate) fn collect(suite_dir: &Path, options: &ParseOptions) -> Tap {
    let mut tap = Tap::new();
    let table = ClassificationTable::standard();

    run_accept_dir(suite_dir, "accept", Expect::Clean, &table, options, &mut tap);
    run_accept_dir(suite_dir, "trailing", Expect::Trailing, &table, options, &mut tap);
    run_reject_dir(suite_dir, &table, options, &mut tap);

    tap
}

fn run_accept_dir(
    suite_dir: &Path,
    subdir: &str,
    expect: Expect,
    table: &ClassificationTable,
    options: &ParseOptions,
    tap: &mut Tap,
) {
    let dir = suite_dir.join(subdir);
    if !dir.exists() {
        return;
    }
    for path in glob_token_files(&dir) {
        let test_name = format!("{}/{}", subdir, stem(&path));
        let outcome = match load_and_parse(&path, table, options) {
            Ok(o) => o,
            Err(e) => {
                tap.not_ok(&test_name, e);
                continue;
            }
        };
        match (expect, &outcome) {
            (Expect::Clean, ParseOutcome::Accepted { trailing: None })
            | (Expect::Trailing, ParseOutcome::Accepted { trailing: Some(_) }) => {
                tap.ok(&test_name)
            }
            (Expect::Clean, ParseOutcome::Accepted { trailing: Some(t) }) => tap.not_ok(
                &test_name,
                format!("unexpected trailing tokens starting at line {}", t.line),
            ),
            (Expect::Trailing, ParseOutcome::Accepted { trailing: None }) => {
                tap.not_ok(&test_name, "expected a trailing-token advisory, got none")
            }
            (_, ParseOutcome::Rejected(d)) => {
                tap.not_ok(&test_name, format!("unexpected rejection: {}", d))
            }
        }
    }
}

fn run_reject_dir(
    suite_dir: &Path,
    table: &ClassificationTable,
    options: &ParseOptions,
    tap: &mut Tap,
) {
    let dir = suite_dir.join("reject");
    if !dir.exists() {
        return;
    }
    for path in glob_token_files(&dir) {
        let stem = stem(&path);
        let test_name = format!("reject/{}", stem);
        let expected_path = dir.join(format!("{}.expected-error.json", stem));
        let expected = match read_json(&expected_path) {
            Ok(v) => v,
            Err(e) => {
                tap.not_ok(&test_name, format!("failed to read expected-error file: {}", e));
                continue;
            }
        };

        match load_and_parse(&path, table, options) {
            Ok(ParseOutcome::Rejected(d)) => {
                let got = d.to_json_value();
                if got == expected {
                    tap.ok(&test_name);
                } else {
                    tap.not_ok(
                        &test_name,
                        format!(
                            "error mismatch:\nexpected: {}\n     got: {}",
                            compact(&expected),
                            compact(&got)
                        ),
                    );
                }
            }
            Ok(ParseOutcome::Accepted { .. }) => {
                tap.not_ok(&test_name, "expected rejection, but the program was accepted");
            }
            Err(e) => tap.not_ok(&test_name, e),
        }
    }
}

fn load_and_parse(
    path: &Path,
    table: &ClassificationTable,
    options: &ParseOptions,
) -> Result<ParseOutcome, String> {
    let loaded = load_tokens(path, table).map_err(|e| e.to_string())?;
    Ok(parse_program_with(&loaded.tokens, options))
}

fn glob_token_files(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "tok"))
            .collect(),
        Err(_) => Vec::new(),
    };
    paths.sort();
    paths
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(path: &Path) -> Result<Value, String> {
    let s = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&s).map_err(|e| format!("{}: {}", path.display(), e))
}

fn compact(v: &Value) -> String {
    serde_json::to_string(v).unwrap_or_else(|_| format!("{:?}", v))
}
