//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against an isolated data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_studytimer-cli"))
        .args(args)
        .env("STUDYTIMER_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_timer_status_when_idle() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["state"], "idle");
    assert_eq!(snapshot["formatted_time"], "00:00:00");
    assert_eq!(snapshot["reminder_interval_min"], 60);
}

#[test]
fn test_first_run_creates_data_files() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["subject", "list"]);
    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("studytimer.db").exists());
}

#[test]
fn test_subject_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let added = run_json(dir.path(), &["subject", "add", "Math"]);
    assert_eq!(added["type"], "SubjectAdded");
    let id = added["subject_id"].as_str().unwrap().to_string();

    let renamed = run_json(dir.path(), &["subject", "rename", &id, "Calculus"]);
    assert_eq!(renamed["name"], "Calculus");

    let list = run_json(dir.path(), &["subject", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Calculus");

    let removed = run_json(dir.path(), &["subject", "remove", &id]);
    assert_eq!(removed["type"], "SubjectRemoved");
    let list = run_json(dir.path(), &["subject", "list"]);
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_remove_unknown_subject_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _stderr) = run_cli(dir.path(), &["subject", "remove", "missing"]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn test_reminder_interval_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["reminder", "get"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "60");

    let (code, _, _) = run_cli(dir.path(), &["reminder", "set", "25"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["reminder", "get"]);
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_timer_run_records_session() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &["timer", "run", "--subject", "Physics", "--content", "optics", "--minutes", "0"],
    );
    assert_eq!(code, 0, "timer run failed: {stderr}");
    assert!(stdout.contains("SessionStarted"));
    assert!(stdout.contains("SessionCompleted"));

    let today = run_json(dir.path(), &["sessions", "today"]);
    let sessions = today.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["subject"], "Physics");
    assert_eq!(sessions[0]["content"], "optics");
    assert!(sessions[0]["endTime"].is_string());

    let total = run_json(dir.path(), &["sessions", "total"]);
    assert_eq!(total["sessions"], 1);
    assert_eq!(total["formatted"], "00:00:00");
}

#[test]
fn test_timer_run_interval_is_in_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["timer", "run", "--interval", "1", "--minutes", "0"],
    );
    assert_eq!(code, 0, "timer run failed: {stderr}");

    let (_, help, _) = run_cli(dir.path(), &["timer", "run", "--help"]);
    assert!(help.contains("Tick cadence in seconds"));
}

#[test]
fn test_timer_status_after_run_is_idle_with_history() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["timer", "run", "--minutes", "0"]);
    let snapshot = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(snapshot["state"], "idle");
    assert!(snapshot["session_id"].is_null());
    assert_eq!(snapshot["today_total_secs"], 0);

    let (_, help, _) = run_cli(dir.path(), &["timer", "status", "--help"]);
    assert!(help.contains("timer run"));
}

#[test]
fn test_sessions_list_filters_by_date() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["timer", "run", "--minutes", "0"]);
    let list = run_json(dir.path(), &["sessions", "list", "--date", "1999-01-01"]);
    assert!(list.as_array().unwrap().is_empty());
    let all = run_json(dir.path(), &["sessions", "list"]);
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["subject"], "uncategorized");
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "notifications.enabled"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");

    let (code, stdout, _) = run_cli(dir.path(), &["config", "set", "sessions.uncategorized_label", "misc"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "misc");
    run_cli(dir.path(), &["timer", "run", "--minutes", "0"]);
    let all = run_json(dir.path(), &["sessions", "list"]);
    assert_eq!(all[0]["subject"], "misc");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "ui.nonexistent"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "reminder.default_interval_min", "25"]);
    let listed = run_json(dir.path(), &["config", "list"]);
    assert_eq!(listed["reminder"]["default_interval_min"], 25);

    std::fs::write(dir.path().join("config.toml"), "reminder = [").unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "list"]);
    assert_ne!(code, 0);

    let reset = run_json(dir.path(), &["config", "reset"]);
    assert_eq!(reset["reminder"]["default_interval_min"], 60);
    let listed = run_json(dir.path(), &["config", "list"]);
    assert_eq!(listed["notifications"]["enabled"], true);
}

#[test]
fn test_malformed_history_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["subject", "list"]);
    corrupt_history(dir.path());
    let (code, _, stderr) = run_cli(dir.path(), &["sessions", "list"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

fn corrupt_history(data_dir: &Path) {
    use studytimer_core::storage::SESSIONS_KEY;
    use studytimer_core::{Database, KvStore};

    let db = Database::open_at(&data_dir.join("studytimer.db")).unwrap();
    db.set(SESSIONS_KEY, "{broken").unwrap();
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("studytimer-cli"));
}
