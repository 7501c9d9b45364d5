//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify exit codes and output shapes.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "stillmind-cli", "--"])
        .args(args)
        .env("STILLMIND_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_tip() {
    let (stdout, _, code) = run_cli(&["tip"]);
    assert_eq!(code, 0, "tip failed");
    assert!(stdout.contains("focus:"));
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("config list not JSON");
    assert!(parsed.get("breathing").is_some());
}

#[test]
fn test_config_set_and_get() {
    let (_, _, code) = run_cli(&["config", "set", "breathing.exhale_secs", "6"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(&["config", "get", "breathing.exhale_secs"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "6");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, _, code) = run_cli(&["config", "get", "breathing.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "timer status failed");
    assert!(stdout.contains("StateSnapshot"));
}

#[test]
fn test_timer_start_pause_stop() {
    let (_, _, code) = run_cli(&["timer", "start"]);
    assert_eq!(code, 0, "timer start failed");

    let (_, _, code) = run_cli(&["timer", "pause"]);
    assert_eq!(code, 0, "timer pause failed");

    let (_, _, code) = run_cli(&["timer", "stop"]);
    assert_eq!(code, 0, "timer stop failed");
}

#[test]
fn test_mood_log_and_list() {
    let (stdout, _, code) = run_cli(&["mood", "log", "happy", "--note", "grateful today"]);
    assert_eq!(code, 0, "mood log failed");
    assert!(stdout.contains("logged happy"));

    let (stdout, _, code) = run_cli(&["mood", "list"]);
    assert_eq!(code, 0, "mood list failed");
    assert!(stdout.contains("Happy"));
}

#[test]
fn test_mood_rejects_unknown_mood() {
    let (_, stderr, code) = run_cli(&["mood", "log", "elated"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown mood"));
}

#[test]
fn test_mood_insights_is_json() {
    let _ = run_cli(&["mood", "log", "calm"]);
    let (stdout, _, code) = run_cli(&["mood", "insights"]);
    assert_eq!(code, 0, "mood insights failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("insights not JSON");
    assert!(parsed.get("entry_count").is_some());
}

#[test]
fn test_activity_list() {
    let (stdout, _, code) = run_cli(&["activity", "list"]);
    assert_eq!(code, 0, "activity list failed");
    assert!(stdout.contains("Breathing Exercise"));
    assert!(stdout.contains("% complete"));
}

#[test]
fn test_activity_complete_and_reset() {
    let (_, _, code) = run_cli(&["activity", "complete", "1"]);
    assert_eq!(code, 0, "activity complete failed");

    let (_, _, code) = run_cli(&["activity", "reset"]);
    assert_eq!(code, 0, "activity reset failed");
}

#[test]
fn test_activity_unknown_id_fails() {
    let (_, _, code) = run_cli(&["activity", "complete", "99"]);
    assert_ne!(code, 0);
}

#[test]
fn test_stats_today_is_json() {
    let (stdout, _, code) = run_cli(&["stats", "today"]);
    assert_eq!(code, 0, "stats today failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("stats not JSON");
    assert!(parsed.get("total_sessions").is_some());
}
