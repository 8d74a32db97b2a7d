//! CLI behavior tests: exit codes, output formats, persistence, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const GOOD_PAGE: &str = "tests/fixtures/good_page.json";
const SCRAPED_PAGE: &str = "tests/fixtures/scraped_page.json";

fn docgrade_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docgrade"));
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

/// Directory with two copies of the fixtures and critique turned off
fn pages_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".docgraderc.json"),
        r#"{ "critique": { "enabled": false } }"#,
    )
    .unwrap();
    fs::copy(GOOD_PAGE, dir.path().join("a_good.json")).unwrap();
    fs::copy(SCRAPED_PAGE, dir.path().join("b_scraped.json")).unwrap();
    dir
}

#[test]
fn no_args_returns_error_not_panic() {
    docgrade_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PATH"));
}

#[test]
fn console_report_for_single_file() {
    docgrade_cmd()
        .arg(GOOD_PAGE)
        .arg("--no-critique")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Documentation Quality Analysis: Create your first campaign",
        ))
        .stdout(predicate::str::contains("Dimension Scores:"));
}

#[test]
fn below_threshold_exit_1() {
    docgrade_cmd()
        .arg(SCRAPED_PAGE)
        .args(["--no-critique", "--threshold", "9.9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("below threshold 9.9"));
}

#[test]
fn above_threshold_exit_0() {
    docgrade_cmd()
        .arg(GOOD_PAGE)
        .args(["--no-critique", "--threshold", "0.5"])
        .assert()
        .success();
}

#[test]
fn json_output_valid() {
    let output = docgrade_cmd()
        .arg(GOOD_PAGE)
        .args(["--json", "--no-critique"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(parsed["document"]["title"], "Create your first campaign");
    assert_eq!(parsed["document"]["source"], GOOD_PAGE);
    assert!(parsed["overallScore"].is_number());
    assert_eq!(parsed["style"]["llmCommentary"], "");
}

#[test]
fn json_output_for_directory_has_summary() {
    let dir = pages_dir();
    let output = docgrade_cmd().arg(dir.path()).arg("--json").output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(parsed["summary"]["documentsAnalyzed"], 2);
    let results = parsed["results"].as_array().unwrap();
    assert_eq!(results[0]["document"]["title"], "Create your first campaign");
    assert_eq!(results[1]["document"]["title"], "Segments");
}

#[test]
fn markdown_output() {
    docgrade_cmd()
        .arg(GOOD_PAGE)
        .args(["--markdown", "--no-critique"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Documentation Analysis Report"))
        .stdout(predicate::str::contains("### Detailed Scores"));
}

#[test]
fn quiet_output_one_line_per_page() {
    let dir = pages_dir();
    let output = docgrade_cmd().arg(dir.path()).arg("--quiet").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{}", stdout);
    assert!(lines[0].contains("a_good.json: "));
    assert!(lines[1].contains("b_scraped.json: "));
}

#[test]
fn reads_feature_record_from_stdin() {
    let json = fs::read_to_string(SCRAPED_PAGE).unwrap();
    docgrade_cmd()
        .args(["-", "--quiet", "--no-critique"])
        .write_stdin(json)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<stdin>: "));
}

#[test]
fn file_not_found_exit_2() {
    docgrade_cmd()
        .arg("nonexistent.json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nonexistent"));
}

#[test]
fn invalid_record_exit_2() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    docgrade_cmd()
        .arg(&path)
        .arg("--no-critique")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid feature record"));
}

#[test]
fn broken_file_in_directory_is_skipped_but_reported() {
    let dir = pages_dir();
    fs::write(dir.path().join("c_broken.json"), "garbage").unwrap();
    docgrade_cmd()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("a_good.json"));
}

#[test]
fn ignore_globs_from_config() {
    let dir = pages_dir();
    fs::write(
        dir.path().join(".docgraderc.json"),
        r#"{ "critique": { "enabled": false }, "ignore": ["**/b_*.json"] }"#,
    )
    .unwrap();
    let output = docgrade_cmd().arg(dir.path()).arg("--quiet").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(!stdout.contains("b_scraped.json"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = TempDir::new().unwrap();
    docgrade_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No feature records found"));
}

#[test]
fn output_dir_persists_reports() {
    let dir = pages_dir();
    let out = TempDir::new().unwrap();
    docgrade_cmd()
        .arg(dir.path())
        .arg("--quiet")
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success();

    let results: Vec<_> = fs::read_dir(out.path().join("analysis_results"))
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(results.len(), 2);

    let reports: Vec<String> = fs::read_dir(out.path().join("reports"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(reports.iter().any(|n| n.starts_with("summary_report_") && n.ends_with(".json")));
    assert!(reports.iter().any(|n| n.starts_with("summary_report_") && n.ends_with(".md")));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join(".docgraderc.json");
    docgrade_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("threshold"));
    assert!(content.contains("critique"));
}

#[test]
fn init_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join(".docgraderc.json");
    fs::write(&config_path, "{}").unwrap();
    docgrade_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "{}");
}

#[test]
fn invalid_config_exit_2() {
    let dir = pages_dir();
    fs::write(dir.path().join(".docgraderc.json"), "{ broken").unwrap();
    docgrade_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON in config"));
}
