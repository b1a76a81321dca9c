//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use chrono::{Duration, Local};
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, code).
fn run_cli(data_dir: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_focustimer"))
        .args(args)
        .env("FOCUSTIMER_DATA_DIR", data_dir)
        .env_remove("FOCUSTIMER_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    // A command that fails early may close stdin before reading it.
    let mut pipe = child.stdin.take().expect("stdin is piped");
    if let Err(err) = pipe.write_all(stdin.as_bytes()) {
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe, "Failed to write stdin");
    }
    drop(pipe);

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args, "");
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    serde_json::from_str(&run_ok(data_dir, args)).expect("Failed to parse JSON output")
}

#[test]
fn test_settings_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = run_json(dir.path(), &["settings", "show"]);
    assert_eq!(settings["workMinutes"], 25);
    assert_eq!(settings["breakMinutes"], 5);
    assert_eq!(settings["dailyGoalMinutes"], 25);
}

#[test]
fn test_settings_set_persists() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["settings", "set", "--work", "50", "--goal", "100"]);

    let settings = run_json(dir.path(), &["settings", "show"]);
    assert_eq!(settings["workMinutes"], 50);
    assert_eq!(settings["breakMinutes"], 5);
    assert_eq!(settings["dailyGoalMinutes"], 100);
    assert!(dir.path().join("focustimer.json").exists());
}

#[test]
fn test_settings_set_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["settings", "set", "--break", "0"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("breakMinutes"), "stderr: {stderr}");

    let args = ["settings", "set", "--work", "40", "--goal", "901"];
    let (_, _, code) = run_cli(dir.path(), &args, "");
    assert_ne!(code, 0);
    let settings = run_json(dir.path(), &["settings", "show"]);
    assert_eq!(settings["workMinutes"], 25);
}

#[test]
fn test_stats_today_on_empty_history() {
    let dir = TempDir::new().unwrap();
    let stats = run_json(dir.path(), &["stats", "today"]);
    assert_eq!(stats["today_sessions"], 0);
    assert_eq!(stats["current_streak"], 0);
    assert_eq!(stats["goal_reached"], false);

    let week = run_json(dir.path(), &["stats", "week"]);
    assert_eq!(week.as_array().map(Vec::len), Some(7));
}

#[test]
fn test_streak_from_seeded_history() {
    let dir = TempDir::new().unwrap();
    let yesterday = Local::now().date_naive() - Duration::days(1);
    let start = yesterday.and_hms_opt(9, 0, 0).unwrap();
    let end = start + Duration::minutes(25);
    let doc = serde_json::json!({
        "schemaVersion": 1,
        "settings": { "workMinutes": 25, "breakMinutes": 5, "dailyGoalMinutes": 25 },
        "sessions": [{
            "startTime": start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "endTime": end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "kind": "work",
            "durationMinutes": 25,
            "completed": true
        }]
    });
    std::fs::write(dir.path().join("focustimer.json"), doc.to_string()).unwrap();

    let streak = run_json(dir.path(), &["stats", "streak"]);
    assert_eq!(streak["current_streak"], 1);

    let date = yesterday.format("%Y-%m-%d").to_string();
    let sessions = run_json(dir.path(), &["history", "list", "--date", &date]);
    assert_eq!(sessions.as_array().map(Vec::len), Some(1));
    assert_eq!(sessions[0]["kind"], "work");
}

#[test]
fn test_corrupt_store_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("focustimer.json"), "{ broken").unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["history", "list"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
}

#[test]
fn test_history_range_validation() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["history", "list", "--from", "2026-10-10", "--to", "2026-10-01"],
        "",
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid date range"), "stderr: {stderr}");
}

#[test]
fn test_timer_skip_records_interrupted_session() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["timer", "run", "--break", "--once"], "s\n");
    assert_eq!(code, 0, "stderr: {stderr}");

    let status: serde_json::Value = serde_json::from_str(&stdout).expect("status JSON");
    assert_eq!(status["mode"]["state"], "idle");
    assert_eq!(status["pending_next"], "work");

    let sessions = run_json(dir.path(), &["history", "list"]);
    assert_eq!(sessions.as_array().map(Vec::len), Some(1));
    assert_eq!(sessions[0]["kind"], "break");
    assert_eq!(sessions[0]["completed"], false);

    run_ok(dir.path(), &["history", "clear"]);
    let sessions = run_json(dir.path(), &["history", "list", "--all"]);
    assert_eq!(sessions.as_array().map(Vec::len), Some(0));
}

#[test]
fn test_timer_status_when_idle() {
    let dir = TempDir::new().unwrap();
    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["mode"]["state"], "idle");
    assert_eq!(status["remaining_secs"], 0);
    assert_eq!(status["work_minutes"], 25);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_ok(dir.path(), &["config", "get", "notifications.bell"]).trim(), "true");
    run_ok(dir.path(), &["config", "set", "notifications.bell", "false"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "notifications.bell"]).trim(), "false");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "ui.theme"], "");
    assert_ne!(code, 0);
}

#[test]
fn test_timer_refuses_corrupt_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("focustimer.json");
    let truncated = concat!(
        r#"{"schemaVersion":1,"#,
        r#""settings":{"workMinutes":25,"breakMinutes":5,"dailyGoalMinutes":25},"#,
        r#""sessions":[{"startTime":"2026-10-16T09:00:00","endTime":"2026-10-16T09:25:00","#,
        r#""kind":"work","durationMinutes":25,"completed":true}"#,
    );
    std::fs::write(&path, truncated).unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), &["timer", "run", "--break", "--once"], "s\n");
    assert_ne!(code, 0, "stdout: {stdout}");
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), truncated);

    let (_, _, code) = run_cli(dir.path(), &["timer", "status"], "");
    assert_ne!(code, 0);
}

#[cfg(target_os = "linux")]
#[test]
fn test_failed_writes_are_reported() {
    let dir = TempDir::new().unwrap();
    // Reads as a missing file, but its directory can never be created.
    run_ok(
        dir.path(),
        &["config", "set", "storage.data_file", "/proc/focustimer/focustimer.json"],
    );

    let (stdout, stderr, code) = run_cli(dir.path(), &["settings", "set", "--work", "40"], "");
    assert_ne!(code, 0, "stdout: {stdout}");
    assert!(stdout.is_empty(), "stdout: {stdout}");
    assert!(stderr.contains("error:"), "stderr: {stderr}");

    let (_, stderr, code) = run_cli(dir.path(), &["history", "clear"], "");
    assert_ne!(code, 0);
    assert!(!stderr.contains("removed"), "stderr: {stderr}");
}

#[test]
fn test_logs_are_plain_text_when_piped() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "log.filter", "debug"]);

    let (_, stderr, code) = run_cli(dir.path(), &["settings", "show"], "");
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.contains("no store yet"), "stderr: {stderr}");
    assert!(!stderr.contains('\x1b'), "stderr: {stderr:?}");
}
