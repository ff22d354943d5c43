//! Basic CLI E2E tests.
//!
//! Each test runs the `devhub` binary against its own temporary data
//! directory and checks the output.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command with `stdin` piped in and return (code, stdout, stderr).
fn run_cli_with_input(dir: &TempDir, args: &[&str], stdin: &[u8]) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_devhub"))
        .args(args)
        .env("DEVHUB_DATA_DIR", dir.path())
        .env_remove("DEVHUB_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin)
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_cli(dir: &TempDir, args: &[&str]) -> (i32, String, String) {
    run_cli_with_input(dir, args, b"")
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect()
}

#[test]
fn test_task_add_and_list() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["task", "add", "write", "release", "notes"]);
    assert_eq!(code, 0, "Task add failed");
    assert!(stdout.contains("added: write release notes"));

    let (code, stdout, _) = run_cli(&dir, &["task", "list", "--json"]);
    assert_eq!(code, 0, "Task list failed");
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[0]["text"], "write release notes");
    assert_eq!(tasks[0]["status"], "in-progress");
}

#[test]
fn test_task_add_blank_fails() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&dir, &["task", "add", "   "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_task_toggle_move_and_progress() {
    let dir = TempDir::new().unwrap();
    for text in ["a", "b", "c"] {
        assert_eq!(run_cli(&dir, &["task", "add", text]).0, 0);
    }
    assert_eq!(run_cli(&dir, &["task", "toggle", "3"]).0, 0);
    assert_eq!(run_cli(&dir, &["task", "mv", "3", "1"]).0, 0);

    let (_, stdout, _) = run_cli(&dir, &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[0]["text"], "c");
    assert_eq!(tasks[0]["status"], "finished");

    let (_, stdout, _) = run_cli(&dir, &["task", "progress", "--json"]);
    let progress: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(progress["completed"], 1);
    assert_eq!(progress["total"], 3);
    assert_eq!(progress["band"], "low");
}

#[test]
fn test_task_position_zero_fails() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["task", "add", "a"]);
    assert_ne!(run_cli(&dir, &["task", "rm", "0"]).0, 0);
    assert_ne!(run_cli(&dir, &["task", "rm", "2"]).0, 0);
}

#[test]
fn test_theme_toggle_persists() {
    let dir = TempDir::new().unwrap();
    let (_, stdout, _) = run_cli(&dir, &["theme", "show"]);
    assert!(stdout.starts_with("dark"));
    let (_, stdout, _) = run_cli(&dir, &["theme", "toggle"]);
    assert!(stdout.contains("light (toggle: Dark Mode)"));
    let (_, stdout, _) = run_cli(&dir, &["theme", "show"]);
    assert!(stdout.starts_with("light"));
}

#[test]
fn test_timer_set_and_show() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        run_cli(&dir, &["timer", "set", "--minutes", "2", "--seconds", "5"]).0,
        0
    );
    let (_, stdout, _) = run_cli(&dir, &["timer", "show"]);
    let inputs: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(inputs["hours"], 0);
    assert_eq!(inputs["minutes"], 2);
    assert_eq!(inputs["seconds"], 5);
}

#[test]
fn test_timer_preset_splits_hours() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_cli(&dir, &["timer", "preset", "90"]).0, 0);
    let (_, stdout, _) = run_cli(&dir, &["timer", "show"]);
    let inputs: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(inputs["hours"], 1);
    assert_eq!(inputs["minutes"], 30);
    assert_eq!(inputs["seconds"], 0);
}

#[test]
fn test_timer_run_without_duration_warns() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, stderr) = run_cli_with_input(&dir, &["timer", "run", "--json"], b"s\n");
    assert_eq!(code, 0, "Timer run failed: {stderr}");
    assert!(stderr.contains("Please set a time first!"));
    let events = json_lines(&stdout);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "StartRejected");
}

#[test]
fn test_timer_run_counts_down_to_completion() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, stderr) =
        run_cli_with_input(&dir, &["timer", "run", "--json"], b"set 0 0 1\ns\n");
    assert_eq!(code, 0, "Timer run failed: {stderr}");
    assert!(stderr.contains("Timer completed!"));

    let types: Vec<String> = json_lines(&stdout)
        .iter()
        .map(|e| e["type"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(types.first().map(String::as_str), Some("TimerStarted"));
    assert_eq!(types.last().map(String::as_str), Some("TimerCompleted"));
}

#[test]
fn test_timer_run_survives_non_utf8_input() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, stderr) = run_cli_with_input(
        &dir,
        &["timer", "run", "--json"],
        b"set 0 0 1\ns\n\xff\xfe\n",
    );
    assert_eq!(code, 0, "Timer run failed: {stderr}");
    assert!(stderr.contains("unknown command"));
    let events = json_lines(&stdout);
    assert_eq!(
        events.last().map(|e| e["type"].clone()),
        Some(serde_json::json!("TimerCompleted"))
    );
}

#[test]
fn test_help_does_not_touch_data_dir() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&dir, &["--help"]);
    assert_eq!(code, 0);
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_timer_help_banner_ignores_disabled_notifications() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["config", "set", "notifications.enabled", "false"]);
    let (code, _, stderr) = run_cli_with_input(&dir, &["timer", "run"], b"q\n");
    assert_eq!(code, 0, "Timer run failed: {stderr}");
    assert!(stderr.contains("keys: s = start/resume"));
}

#[test]
fn test_task_done_and_undo() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["task", "add", "a"]);
    let (code, stdout, _) = run_cli(&dir, &["task", "done", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("(a)"));
    // Marking twice keeps it finished.
    assert_eq!(run_cli(&dir, &["task", "done", "1"]).0, 0);
    let (_, stdout, _) = run_cli(&dir, &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[0]["status"], "finished");

    assert_eq!(run_cli(&dir, &["task", "undo", "1"]).0, 0);
    let (_, stdout, _) = run_cli(&dir, &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[0]["status"], "in-progress");
    assert_ne!(run_cli(&dir, &["task", "done", "2"]).0, 0);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["config", "get", "notifications.sound"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "true");

    assert_eq!(
        run_cli(&dir, &["config", "set", "notifications.sound", "false"]).0,
        0
    );
    let (_, stdout, _) = run_cli(&dir, &["config", "get", "notifications.sound"]);
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    assert_ne!(run_cli(&dir, &["config", "get", "nope.nothing"]).0, 0);
    assert_ne!(run_cli(&dir, &["config", "set", "nope.nothing", "1"]).0, 0);
}
