//! Basic CLI E2E tests.
//!
//! Tests invoke the compiled binary against a throwaway data directory
//! and verify outputs. Reset behavior is driven through the debug clock,
//! so nothing here depends on the real date.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitgrid"))
        .env("HABITGRID_DATA_DIR", data_dir)
        .args(args)
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command and expect success.
fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

/// Pull the id out of `task add` output.
fn task_id(create_output: &str) -> String {
    create_output
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Task created: "))
        .expect("create output carries the id")
        .to_string()
}

#[test]
fn test_task_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["task", "add", "Read", "--target", "10"]);
    let id = task_id(&out);

    let list = run_ok(dir.path(), &["task", "list"]);
    assert!(list.contains("\"title\": \"Read\""));
    assert!(list.contains("\"progressInSeconds\": 0"));

    let log = run_ok(dir.path(), &["task", "log", &id, "10"]);
    assert!(log.contains("Logged 10m (+1 pts)"));

    let show = run_ok(dir.path(), &["task", "get", &id]);
    assert!(show.contains("\"completed\": true"));
    assert!(show.contains("\"points\": 1"));

    let complete = run_ok(dir.path(), &["task", "complete", &id]);
    assert!(complete.contains("Already completed"));

    let del = run_ok(dir.path(), &["task", "delete", &id]);
    assert!(del.contains("Task deleted"));
    let list = run_ok(dir.path(), &["task", "list"]);
    assert_eq!(list.trim(), "[]");

    // History is kept after deletion.
    let summary = run_ok(dir.path(), &["stats", "summary"]);
    assert!(summary.contains("\"totalPoints\": 1"));
}

#[test]
fn test_missing_ids_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["task", "get", "nope"]);
    assert!(out.contains("Task not found: nope"));
    let out = run_ok(dir.path(), &["task", "complete", "nope"]);
    assert!(out.contains("Task not found: nope"));
    let out = run_ok(dir.path(), &["task", "log", "nope", "5"]);
    assert!(out.contains("Task not found: nope"));
    let out = run_ok(dir.path(), &["task", "delete", "nope"]);
    assert!(out.contains("Task not found: nope"));
}

#[test]
fn test_frozen_clock_drives_resets() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["debug", "freeze", "2025-06-02 09:00"]);
    let out = run_ok(dir.path(), &["task", "add", "Read", "--target", "10"]);
    let id = task_id(&out);
    run_ok(dir.path(), &["task", "complete", &id]);

    // Same day: nothing rolls over.
    let sweep = run_ok(dir.path(), &["sweep", "run"]);
    assert!(sweep.contains("Nothing to reset"));

    // Next morning the daily task resets, keeping its points.
    let advanced = run_ok(dir.path(), &["debug", "advance", "--days", "1"]);
    assert!(advanced.contains("reset: Read (daily)"));

    let show = run_ok(dir.path(), &["task", "get", &id]);
    assert!(show.contains("\"completed\": false"));
    assert!(show.contains("\"progressInSeconds\": 0"));
    assert!(show.contains("\"points\": 1"));

    run_ok(dir.path(), &["debug", "release"]);
    let status = run_ok(dir.path(), &["debug", "status"]);
    assert!(status.contains("real time"));
}

#[test]
fn test_weekly_tasks_survive_the_daily_boundary() {
    let dir = tempfile::tempdir().unwrap();
    // Monday.
    run_ok(dir.path(), &["debug", "freeze", "2025-06-02 09:00"]);
    let out = run_ok(
        dir.path(),
        &[
            "task", "add", "Long run", "--frequency", "weekly", "--unit", "km", "--target", "20",
        ],
    );
    let id = task_id(&out);
    run_ok(dir.path(), &["task", "log", &id, "20"]);

    // Wednesday: still the same week.
    run_ok(dir.path(), &["debug", "advance", "--days", "2"]);
    let show = run_ok(dir.path(), &["task", "get", &id]);
    assert!(show.contains("\"completed\": true"));

    // Next Monday: new week.
    let advanced = run_ok(dir.path(), &["debug", "advance", "--days", "5"]);
    assert!(advanced.contains("reset: Long run (weekly)"));
}

#[test]
fn test_tracking_session_logs_time() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["debug", "freeze", "2025-06-02 09:00"]);
    let out = run_ok(dir.path(), &["task", "add", "Read", "--target", "10"]);
    let id = task_id(&out);

    let start = run_ok(dir.path(), &["track", "start", &id]);
    assert!(start.contains("Tracking 'Read'"));
    let status = run_ok(dir.path(), &["track", "status"]);
    assert!(status.contains("\"elapsedSeconds\": 0"));

    run_ok(dir.path(), &["debug", "advance", "--minutes", "10"]);
    let stop = run_ok(dir.path(), &["track", "stop"]);
    assert!(stop.contains("Stopped after 600s"));
    assert!(stop.contains("\"type\": \"SessionStopped\""));

    let show = run_ok(dir.path(), &["task", "get", &id]);
    assert!(show.contains("\"completed\": true"));

    let stop = run_ok(dir.path(), &["track", "stop"]);
    assert!(stop.contains("No session running"));
}

#[test]
fn test_tracking_requires_a_time_unit() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(
        dir.path(),
        &["task", "add", "Pushups", "--unit", "count", "--target", "30"],
    );
    let id = task_id(&out);

    let (_, stderr, code) = run_cli(dir.path(), &["track", "start", &id]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"), "stderr was: {stderr}");
}

#[test]
fn test_stats_summary_and_heatmap() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["debug", "freeze", "2025-06-02 09:00"]);
    let out = run_ok(dir.path(), &["task", "add", "Read", "--target", "10"]);
    let id = task_id(&out);
    // 15 of 10 minutes: base 1 plus overachievement bonus 2.
    run_ok(dir.path(), &["task", "log", &id, "15"]);

    let summary = run_ok(dir.path(), &["stats", "summary"]);
    assert!(summary.contains("\"totalPoints\": 3"));
    assert!(summary.contains("\"currentStreak\": 1"));
    assert!(summary.contains("\"level\": 1"));
    assert!(summary.contains("\"pointsToNextLevel\": 97"));

    let grid = run_ok(dir.path(), &["stats", "heatmap"]);
    assert!(grid.contains("Mon"));
    assert!(grid.contains('▒'));

    let grid_json = run_ok(dir.path(), &["stats", "heatmap", "--json", "--days", "7"]);
    assert!(grid_json.contains("\"intensity\": 2"));

    let log = run_ok(dir.path(), &["activity", "period", "--days", "7"]);
    assert!(log.contains("\"totalPoints\": 3"));
    assert!(log.contains("\"taskTitle\": \"Read\""));

    let total = run_ok(dir.path(), &["activity", "total"]);
    assert_eq!(total.trim(), "3");
}

#[test]
fn test_config_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let got = run_ok(dir.path(), &["config", "get", "stats.heatmap_days"]);
    assert_eq!(got.trim(), "91");

    run_ok(dir.path(), &["config", "set", "stats.heatmap_days", "28"]);
    let got = run_ok(dir.path(), &["config", "get", "stats.heatmap_days"]);
    assert_eq!(got.trim(), "28");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "nope.nothing"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));

    run_ok(dir.path(), &["config", "reset"]);
    let got = run_ok(dir.path(), &["config", "get", "stats.heatmap_days"]);
    assert_eq!(got.trim(), "91");
}

#[test]
fn test_completions_generate() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["completions", "bash"]);
    assert!(out.contains("habitgrid"));
}
