//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "hunterlog-cli", "--"])
        .args(args)
        .env("HUNTERLOG_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_habit_add_and_list() {
    let (stdout, _, code) = run_cli(&["habit", "add", "CLI Test Habit", "physical", "--xp", "5"]);
    assert_eq!(code, 0, "habit add failed");
    assert!(stdout.contains("Habit created:"));

    let (stdout, _, code) = run_cli(&["habit", "list"]);
    assert_eq!(code, 0, "habit list failed");
    assert!(stdout.contains("CLI Test Habit"));

    let (stdout, _, code) = run_cli(&["habit", "list", "--json"]);
    assert_eq!(code, 0, "habit list --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_habit_toggle_round_trip() {
    let (stdout, _, code) = run_cli(&["habit", "add", "Toggle Target", "mental", "--xp", "7"]);
    assert_eq!(code, 0);
    let id = stdout.trim().rsplit(' ').next().unwrap().to_string();

    let (stdout, _, code) = run_cli(&["habit", "toggle", &id]);
    assert_eq!(code, 0, "habit toggle failed");
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["completed"], true);
    assert_eq!(result["xp_delta"], 7);

    let (stdout, _, code) = run_cli(&["habit", "toggle", &id]);
    assert_eq!(code, 0, "habit un-toggle failed");
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["completed"], false);
    assert_eq!(result["xp_delta"], -7);

    let (_, _, code) = run_cli(&["habit", "remove", &id]);
    assert_eq!(code, 0, "habit remove failed");
}

#[test]
fn test_toggle_unknown_habit_fails() {
    let (_, stderr, code) = run_cli(&["habit", "toggle", "no-such-habit-name"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no habit matches"));
}

#[test]
fn test_stats_window() {
    let (stdout, _, code) = run_cli(&["stats", "window", "7"]);
    assert_eq!(code, 0, "stats window failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rate = parsed["success_rate"].as_u64().unwrap();
    assert!(rate <= 100);
}

#[test]
fn test_stats_domain() {
    let (stdout, _, code) = run_cli(&["stats", "domain", "spiritual", "7"]);
    assert_eq!(code, 0, "stats domain failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["domain"], "spiritual");
}

#[test]
fn test_stats_streak() {
    let (stdout, _, code) = run_cli(&["stats", "streak"]);
    assert_eq!(code, 0, "stats streak failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["best"].as_u64().unwrap() >= parsed["current"].as_u64().unwrap());
}

#[test]
fn test_stats_trend() {
    let (stdout, _, code) = run_cli(&["stats", "trend"]);
    assert_eq!(code, 0, "stats trend failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let trend = parsed["trend"].as_str().unwrap();
    assert!(["up", "down", "stable"].contains(&trend));
}

#[test]
fn test_stats_week() {
    let (stdout, _, code) = run_cli(&["stats", "week"]);
    assert_eq!(code, 0, "stats week failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["days"].is_array());
}

#[test]
fn test_stats_record_backfill() {
    let (stdout, _, code) = run_cli(&["stats", "record", "2023-01-15", "10", "8"]);
    assert_eq!(code, 0, "stats record failed");
    assert!(stdout.contains("Recorded 2023-01-15"));

    let (_, stderr, code) = run_cli(&["stats", "record", "2023-01-15", "5", "9"]);
    assert_ne!(code, 0, "invalid counts should be rejected");
    assert!(stderr.contains("error"));
}

#[test]
fn test_status() {
    let (stdout, _, code) = run_cli(&["status"]);
    assert_eq!(code, 0, "status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["rank"].is_string());
    assert_eq!(parsed["domains"].as_array().unwrap().len(), 6);
}

#[test]
fn test_config_get_set_list() {
    let (stdout, _, code) = run_cli(&["config", "get", "streak_threshold"]);
    assert_eq!(code, 0, "config get failed");
    let value: u8 = stdout.trim().parse().unwrap();
    assert!(value <= 100);

    let (_, _, code) = run_cli(&["config", "set", "streak_threshold", &value.to_string()]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    assert!(stdout.contains("streak_threshold"));
    assert!(stdout.contains("trend_deadzone"));

    let (_, _, code) = run_cli(&["config", "set", "streak_threshold", "130"]);
    assert_ne!(code, 0, "out-of-range threshold should be rejected");
}
