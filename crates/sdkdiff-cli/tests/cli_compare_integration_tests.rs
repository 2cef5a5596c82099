//! CLI integration tests
//!
//! Run the built `sdkdiff` binary against payload files written into a
//! temporary directory.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_payload(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sdkdiff"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn fields_fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
    let main = write_payload(
        dir,
        "1.10.0.json",
        r#"{"fields": [{"id": "BT-01", "type": "code"}, {"id": "BT-03", "type": "date"}]}"#,
    );
    let base = write_payload(
        dir,
        "1.9.0.json",
        r#"{"fields": [{"id": "BT-01", "type": "text"}, {"id": "BT-02", "type": "text"}]}"#,
    );
    (main, base)
}

#[test]
fn test_compare_prints_summary() {
    let temp_dir = TempDir::new().unwrap();
    let (main, base) = fields_fixture(&temp_dir);

    let output = run(&[
        "compare",
        "--main",
        main.to_str().unwrap(),
        "--base",
        base.to_str().unwrap(),
        "--kind",
        "fields",
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("## fields: 1.10.0 vs 1.9.0"));
    assert!(stdout.contains("### Removed (1)"));
    assert!(stdout.contains("- `BT-02`"));
    assert!(stdout.contains("- `BT-03`"));
    assert!(stdout.contains("  - `type`: MODIFIED"));
}

#[test]
fn test_compare_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let (main, base) = fields_fixture(&temp_dir);

    let output = run(&[
        "compare",
        "--main",
        main.to_str().unwrap(),
        "--base",
        base.to_str().unwrap(),
        "--kind",
        "fields",
        "--format",
        "json",
    ]);

    assert!(output.status.success());
    let diff: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = diff.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["id"], "BT-02");
    assert_eq!(entries[0]["typeOfChange"], "REMOVED");
    assert_eq!(entries[1]["typeOfChange"], "MODIFIED");
    assert_eq!(entries[2]["typeOfChange"], "ADDED");
}

#[test]
fn test_compare_with_configured_source() {
    let temp_dir = TempDir::new().unwrap();
    let main = write_payload(&temp_dir, "main.json", r#"{"entities": [{"key": 1}, {"key": 2}]}"#);
    let base = write_payload(&temp_dir, "base.json", r#"{"entities": [{"key": 1}]}"#);
    let config = write_payload(
        &temp_dir,
        "sdkdiff.toml",
        "format = \"json\"\n\n[sources.entities]\npointer = \"/entities\"\nid_field = \"key\"\n",
    );

    let output = run(&[
        "compare",
        "--main",
        main.to_str().unwrap(),
        "--base",
        base.to_str().unwrap(),
        "--source",
        "entities",
        "--config",
        config.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let diff: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(diff[1]["id"], 2);
    assert_eq!(diff[1]["typeOfChange"], "ADDED");
}

#[test]
fn test_compare_unknown_kind_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (main, base) = fields_fixture(&temp_dir);

    let output = run(&[
        "compare",
        "--main",
        main.to_str().unwrap(),
        "--base",
        base.to_str().unwrap(),
        "--kind",
        "schemas",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_UNKNOWN_RECORD_KIND"), "stderr: {}", stderr);
}

#[test]
fn test_compare_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let (main, _) = fields_fixture(&temp_dir);
    let missing = temp_dir.path().join("absent.json");

    let output = run(&[
        "compare",
        "--main",
        main.to_str().unwrap(),
        "--base",
        missing.to_str().unwrap(),
        "--kind",
        "fields",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_IO"), "stderr: {}", stderr);
    assert!(stderr.contains("(side: base)"));
}

#[test]
fn test_flatten_prints_parent_references() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_payload(
        &temp_dir,
        "notice.json",
        r#"{"content": [
            {"id": "GR-1", "contentType": "group", "content": [
                {"id": "BT-01", "contentType": "field"}
            ]}
        ]}"#,
    );

    let output = run(&[
        "flatten",
        "--input",
        input.to_str().unwrap(),
        "--group-field",
        "contentType",
        "--group-value",
        "group",
    ]);

    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        records,
        serde_json::json!([
            {"id": "GR-1", "contentType": "group", "parentId": null},
            {"id": "BT-01", "contentType": "field", "parentId": "GR-1"}
        ])
    );
}
