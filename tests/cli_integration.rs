//! Integration tests for the `dp` CLI.
//!
//! Each test creates a temp directory, runs `dp` as a subprocess against a
//! data file inside it, and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `dp` binary.
fn dp_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("dp");
    path
}

/// A `dp` command isolated from the user's config and data.
fn dp_command(dir: &Path) -> Command {
    let mut cmd = Command::new(dp_bin());
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("XDG_DATA_HOME", dir.join("share"))
        .env_remove("DAYPAD_DATA");
    cmd
}

/// Run `dp --data <dir>/store.json` with the given args, returning
/// (stdout, stderr, success).
fn run_dp(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let data = dir.join("store.json");
    let output = dp_command(dir)
        .arg("--data")
        .arg(&data)
        .args(args)
        .output()
        .expect("failed to run dp");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `dp` expecting success, return stdout.
fn run_dp_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_dp(dir, args);
    if !success {
        panic!(
            "dp {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `dp` expecting failure, return stderr.
fn run_dp_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_dp(dir, args);
    assert!(!success, "dp {:?} unexpectedly succeeded: {}", args, stdout);
    stderr
}

fn read_store(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("store.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_show_empty_day() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dp_ok(tmp.path(), &["show", "2024-03-05"]);
    assert!(out.contains("2024年3月5日"));
    assert!(out.contains("(no note)"));
    assert!(out.contains("(no todos)"));
    // Reading never creates the file
    assert!(!tmp.path().join("store.json").exists());
}

#[test]
fn test_show_invalid_date() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_dp_err(tmp.path(), &["show", "2024-3-5"]);
    assert!(err.contains("invalid date"));
    let err = run_dp_err(tmp.path(), &["show", "2024-02-30"]);
    assert!(err.contains("invalid date"));
}

#[test]
fn test_month_grid() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dp_ok(tmp.path(), &["note", "2024-02-14", "flowers"]);

    let out = run_dp_ok(tmp.path(), &["month", "2024-02"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0].trim(), "2024年 2月");
    assert_eq!(lines.len(), 7);
    assert!(out.contains("14\u{2022}"));
    assert!(out.contains("29"));
    assert!(!out.contains("30"));
}

#[test]
fn test_month_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dp_ok(tmp.path(), &["month", "2024-02", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["year"], 2024);
    assert_eq!(json["month"], 2);
    let weeks = json["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 5);
    assert_eq!(weeks[0][0]["date"], "2024-01-28");
    assert_eq!(weeks[4][6]["date"], "2024-03-02");
}

#[test]
fn test_month_invalid() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_dp_err(tmp.path(), &["month", "2024-13"]);
    assert!(err.contains("invalid month"));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_note_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dp_ok(tmp.path(), &["note", "2024-03-05", "dentist at 3"]);
    assert!(out.contains("2024-03-05 note updated"));

    let out = run_dp_ok(tmp.path(), &["show", "2024-03-05"]);
    assert!(out.contains("dentist at 3"));

    let store = read_store(tmp.path());
    assert_eq!(store["cal_2024-03-05"]["note"], "dentist at 3");
    assert_eq!(store["cal_2024-03-05"]["todos"], serde_json::json!([]));

    let out = run_dp_ok(tmp.path(), &["note", "2024-03-05", ""]);
    assert!(out.contains("note cleared"));
    let out = run_dp_ok(tmp.path(), &["list"]);
    assert_eq!(out, "");
}

#[test]
fn test_todo_lifecycle() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dp_ok(tmp.path(), &["todo", "add", "2024-03-05", "  buy milk "]);
    assert!(out.contains("added todo 1"));
    run_dp_ok(tmp.path(), &["todo", "add", "2024-03-05", "call mom"]);

    let out = run_dp_ok(tmp.path(), &["todo", "toggle", "2024-03-05", "2"]);
    assert!(out.contains("todo 2 done"));

    let out = run_dp_ok(tmp.path(), &["show", "2024-03-05"]);
    assert!(out.contains("1. [ ] buy milk"));
    assert!(out.contains("2. [x] call mom"));

    let store = read_store(tmp.path());
    assert_eq!(
        store["cal_2024-03-05"]["todos"],
        serde_json::json!([
            {"text": "buy milk", "done": false},
            {"text": "call mom", "done": true}
        ])
    );

    run_dp_ok(tmp.path(), &["todo", "rm", "2024-03-05", "1"]);
    run_dp_ok(tmp.path(), &["todo", "rm", "2024-03-05", "1"]);
    let out = run_dp_ok(tmp.path(), &["list"]);
    assert_eq!(out, "");
}

#[test]
fn test_todo_errors() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_dp_err(tmp.path(), &["todo", "add", "2024-03-05", "   "]);
    assert!(err.contains("todo text is empty"));
    assert!(!tmp.path().join("store.json").exists());

    run_dp_ok(tmp.path(), &["todo", "add", "2024-03-05", "only"]);
    let err = run_dp_err(tmp.path(), &["todo", "toggle", "2024-03-05", "2"]);
    assert!(err.contains("no todo 2 on 2024-03-05"));
    let err = run_dp_err(tmp.path(), &["todo", "rm", "2024-03-05", "0"]);
    assert!(err.contains("start at 1"));
}

#[test]
fn test_write_json_output() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dp_ok(tmp.path(), &["--json", "todo", "add", "2024-03-05", "buy milk"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["date"], "2024-03-05");
    assert_eq!(json["todos"][0]["index"], 1);
    assert_eq!(json["has_data"], true);
}

#[test]
fn test_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dp_ok(tmp.path(), &["todo", "add", "2024-03-07", "flowers"]);
    run_dp_ok(tmp.path(), &["note", "2024-03-05", "dentist"]);
    run_dp_ok(tmp.path(), &["note", "2024-03-06", "   "]);

    let out = run_dp_ok(tmp.path(), &["list"]);
    assert_eq!(out, "2024-03-05  dentist\n2024-03-07  [0/1]\n");

    let out = run_dp_ok(tmp.path(), &["list", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["todos_total"], 1);
}

// ---------------------------------------------------------------------------
// Data file resolution
// ---------------------------------------------------------------------------

#[test]
fn test_data_env_var() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = tmp.path().join("env.json");
    let output = dp_command(tmp.path())
        .env("DAYPAD_DATA", &data)
        .args(["note", "2024-03-05", "from env"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(data.exists());
}

#[test]
fn test_config_store_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config_dir = tmp.path().join("config").join("daypad");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[store]\npath = \"mine.json\"\n").unwrap();

    let output = dp_command(tmp.path())
        .args(["note", "2024-03-05", "from config"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(config_dir.join("mine.json").exists());
}

#[test]
fn test_default_data_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = dp_command(tmp.path())
        .args(["note", "2024-03-05", "default"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(tmp.path().join("share/daypad/store.json").exists());
}

#[test]
fn test_bad_config_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config_dir = tmp.path().join("config").join("daypad");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[store\n").unwrap();

    let err = run_dp_err(tmp.path(), &["show", "2024-03-05"]);
    assert!(err.starts_with("error:"));
}

// ---------------------------------------------------------------------------
// Corruption and recovery
// ---------------------------------------------------------------------------

#[test]
fn test_corrupt_record_falls_back() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("store.json"),
        r#"{"cal_2024-03-05": "not a record", "cal_2024-03-06": {"note": "fine", "todos": []}}"#,
    )
    .unwrap();

    let out = run_dp_ok(tmp.path(), &["show", "2024-03-05"]);
    assert!(out.contains("(no note)"));
    let out = run_dp_ok(tmp.path(), &["show", "2024-03-06"]);
    assert!(out.contains("fine"));

    let out = run_dp_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("malformed record"));
    assert!(out.contains("cal_2024-03-05"));

    // Writing the day replaces the bad value
    run_dp_ok(tmp.path(), &["note", "2024-03-05", "fixed"]);
    let store = read_store(tmp.path());
    assert_eq!(store["cal_2024-03-05"]["note"], "fixed");
    assert_eq!(store["cal_2024-03-06"]["note"], "fine");
}

#[test]
fn test_unreadable_file_backed_up() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("store.json"), "{ this is not json").unwrap();

    let out = run_dp_ok(tmp.path(), &["list"]);
    assert_eq!(out, "");
    assert!(tmp.path().join("store.json.bak").exists());

    let out = run_dp_ok(tmp.path(), &["recovery", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["category"], "corrupt");
}

#[test]
fn test_recovery_empty_and_prune() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dp_ok(tmp.path(), &["recovery"]);
    assert_eq!(out.trim(), "no recovery entries");

    fs::write(tmp.path().join("store.json"), r#"{"cal_2024-03-05": 7}"#).unwrap();
    run_dp_ok(tmp.path(), &["show", "2024-03-05"]);
    let out = run_dp_ok(tmp.path(), &["recovery", "prune", "--all"]);
    assert!(out.contains("pruned 1"));
    let out = run_dp_ok(tmp.path(), &["recovery"]);
    assert_eq!(out.trim(), "no recovery entries");
}

#[test]
fn test_recovery_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dp_ok(tmp.path(), &["recovery", "path"]);
    assert!(out.trim().ends_with(".recovery.log"));
}
