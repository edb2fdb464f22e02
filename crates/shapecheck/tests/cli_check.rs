#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const USER_PATTERN: &str = r#"{
    "id": "integer",
    "name": "string",
    "email": { "$optional": "string" },
    "tags": ["string"]
}"#;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "shapecheck-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_user_pattern(dir: &Path) -> PathBuf {
    let path = dir.join("user.pattern.json");
    std::fs::write(&path, USER_PATTERN).expect("pattern should be writable");
    path
}

fn check(pattern: &Path, json: &str, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shapecheck"))
        .args(["--log-level", "error", "--format", "json", "check", "--pattern"])
        .arg(pattern)
        .arg("--json")
        .arg(json)
        .args(extra)
        .output()
        .expect("check should run")
}

#[test]
fn matching_value_exits_zero() {
    let dir = unique_temp_dir("match");
    let pattern = write_user_pattern(&dir);

    let output = check(&pattern, r#"{"id":7,"name":"ada","tags":["x"]}"#, &[]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("check-result.schema.json"));
    assert!(stdout.contains("\"pattern\":\"user\""));
    assert!(stdout.contains("\"matched\":true"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn mismatch_exits_data_invalid_with_key_path() {
    let dir = unique_temp_dir("mismatch");
    let pattern = write_user_pattern(&dir);

    let output = check(&pattern, r#"{"id":1.5,"name":"ada","tags":[]}"#, &[]);

    assert_eq!(output.status.code(), Some(60));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"matched\":false"));
    assert!(stdout.contains("Expected Integer, got 1.5"));
    assert!(stdout.contains("\"path\":[\"id\"]"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn loose_flag_tolerates_top_level_extra_keys() {
    let dir = unique_temp_dir("loose");
    let pattern = write_user_pattern(&dir);
    let value = r#"{"id":1,"name":"ada","tags":[],"extra":true}"#;

    let strict = check(&pattern, value, &[]);
    assert_eq!(strict.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&strict.stdout).contains("Unknown key extra"));

    let loose = check(&pattern, value, &["--loose"]);
    assert_eq!(loose.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&loose.stdout).contains("\"strict\":false"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_pattern_document_is_usage_error() {
    let dir = unique_temp_dir("bad-pattern");
    let pattern = dir.join("broken.pattern.json");
    std::fs::write(&pattern, r#"{"id":"intger"}"#).expect("pattern should be writable");

    let output = check(&pattern, r#"{"id":1}"#, &[]);

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid pattern"));
    assert!(stderr.contains("intger"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn registry_lookup_checks_named_pattern() {
    let dir = unique_temp_dir("registry");
    write_user_pattern(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_shapecheck"))
        .args(["--log-level", "error", "--format", "json", "check", "--registry"])
        .arg(&dir)
        .args(["--name", "user", "--json", r#"{"id":2,"name":"bo","tags":[]}"#])
        .output()
        .expect("check should run");
    assert_eq!(output.status.code(), Some(0));

    let missing = Command::new(env!("CARGO_BIN_EXE_shapecheck"))
        .args(["--log-level", "error", "check", "--registry"])
        .arg(&dir)
        .args(["--name", "order", "--json", "{}"])
        .output()
        .expect("check should run");
    assert_eq!(missing.status.code(), Some(64));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn list_outputs_sorted_pattern_names() {
    let dir = unique_temp_dir("list");
    write_user_pattern(&dir);
    std::fs::write(dir.join("account.pattern.json"), r#"{"id":"integer"}"#)
        .expect("pattern should be writable");
    std::fs::write(dir.join("notes.txt"), "ignored").expect("file should be writable");

    let output = Command::new(env!("CARGO_BIN_EXE_shapecheck"))
        .args(["--log-level", "error", "--format", "json", "list"])
        .arg(&dir)
        .output()
        .expect("list should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pattern-list.schema.json"));
    assert!(stdout.contains("\"patterns\":[\"account\",\"user\"]"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn undecodable_inline_value_exits_data_invalid() {
    let dir = unique_temp_dir("bad-value");
    let pattern = write_user_pattern(&dir);

    let output = check(&pattern, "{not json", &[]);

    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--json is not valid JSON"));

    let _ = std::fs::remove_dir_all(&dir);
}
