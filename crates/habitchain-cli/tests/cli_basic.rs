//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command with `--today` pinned and return (stdout, stderr, code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitchain"))
        .env("HABITCHAIN_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .args(["--today", "2024-01-10"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(dir: &TempDir, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

/// Create a habit and return its id.
fn add_habit(dir: &TempDir, args: &[&str]) -> String {
    let mut full = vec!["habit", "add"];
    full.extend_from_slice(args);
    let stdout = run_ok(dir, &full);
    let first = stdout.lines().next().unwrap_or_default();
    first
        .strip_prefix("Habit created: ")
        .expect("missing created line")
        .to_string()
}

#[test]
fn test_habit_add_and_list() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, &["Read", "--days", "weekdays", "--start", "2024-01-01"]);

    let list = json(&run_ok(&dir, &["habit", "list"]));
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], id.as_str());
    assert_eq!(rows[0]["schedule"], "Weekdays");
    assert_eq!(rows[0]["startDate"], "2024-01-01");
}

#[test]
fn test_today_grace_through_cli() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, &["Stretch", "--start", "2024-01-01"]);
    run_ok(&dir, &["day", "tap", &id, "2024-01-08"]);
    run_ok(&dir, &["day", "tap", &id, "yesterday"]);

    let info = json(&run_ok(&dir, &["streak", &id]));
    assert_eq!(info["currentStreak"], 2);
    assert_eq!(info["longestStreak"], 2);
    assert_eq!(info["totalSuccess"], 2);

    // Second tap turns yesterday into a failure.
    let out = json(&run_ok(&dir, &["day", "tap", &id, "2024-01-09"]));
    assert_eq!(out["entry"]["state"], "failure");
    assert_eq!(out["streak"]["currentStreak"], 0);
}

#[test]
fn test_future_tap_and_early_exemption_are_rejected() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, &["Run"]);

    let (_, stderr, code) = run_cli(&dir, &["day", "tap", &id, "2024-01-11"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(&dir, &["day", "exempt", &id, "today"]);
    assert_ne!(code, 0);

    let out = json(&run_ok(&dir, &["day", "exempt", &id, "tomorrow"]));
    assert_eq!(out["entry"]["state"], "exemption");
    assert_eq!(out["streak"]["totalExemption"], 1);

    let out = json(&run_ok(&dir, &["day", "exempt", &id, "2024-01-11", "--off"]));
    assert_eq!(out["entry"]["state"], "blank");
}

#[test]
fn test_notes_and_history() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, &["Journal", "--start", "2024-01-01"]);
    run_ok(&dir, &["day", "note", &id, "2024-01-09", "felt great"]);

    let out = run_ok(&dir, &["history", &id]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Journal (Every day)");
    assert_eq!(lines.len(), 8);
    assert!(lines[1].starts_with("2024-01-04"));
    assert!(lines[6].starts_with("2024-01-09"));
    assert!(lines[6].ends_with("felt great"));
    assert!(lines[7].starts_with("2024-01-10"));

    // Clearing the note drops the stored entry again.
    let out = json(&run_ok(&dir, &["day", "note", &id, "2024-01-09", ""]));
    assert!(out["entry"].get("notes").is_none());
    let show = json(&run_ok(&dir, &["habit", "show", &id]));
    assert!(show["habit"]["entries"].as_object().unwrap().is_empty());
}

#[test]
fn test_streak_all_ranks_habits() {
    let dir = TempDir::new().unwrap();
    let quiet = add_habit(&dir, &["Quiet"]);
    let busy = add_habit(&dir, &["Busy"]);
    run_ok(&dir, &["day", "tap", &busy]);

    let rows = json(&run_ok(&dir, &["streak", "--all"]));
    let rows = rows.as_array().unwrap();
    assert_eq!(rows[0]["id"], busy.as_str());
    assert_eq!(rows[0]["streak"]["currentStreak"], 1);
    assert_eq!(rows[1]["id"], quiet.as_str());

    let (_, _, code) = run_cli(&dir, &["streak"]);
    assert_ne!(code, 0);
}

#[test]
fn test_habit_edit_and_delete() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, &["Swim"]);

    let out = run_ok(&dir, &["habit", "edit", &id, "--name", "Swim laps", "--days", "sat,sun"]);
    assert!(out.starts_with("Habit updated:"));
    let show = json(&run_ok(&dir, &["habit", "show", &id]));
    assert_eq!(show["habit"]["name"], "Swim laps");
    assert_eq!(show["schedule"], "Weekends");

    let (_, _, code) = run_cli(&dir, &["habit", "edit", &id, "--name", "   "]);
    assert_ne!(code, 0);

    run_ok(&dir, &["habit", "delete", &id]);
    let (_, _, code) = run_cli(&dir, &["habit", "show", &id]);
    assert_ne!(code, 0);
}

#[test]
fn test_profile_partial_update() {
    let dir = TempDir::new().unwrap();
    let settings = json(&run_ok(&dir, &["profile", "get"]));
    assert_eq!(settings["displayName"], "");
    assert_eq!(settings["hapticsEnabled"], true);

    run_ok(&dir, &["profile", "set", "--name", "Robin"]);
    let settings = json(&run_ok(&dir, &["profile", "set", "--haptics", "false"]));
    assert_eq!(settings["displayName"], "Robin");
    assert_eq!(settings["hapticsEnabled"], false);
    assert_eq!(settings["avatarIndex"], 0);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_ok(&dir, &["config", "get", "display.history_days"]).trim(), "7");

    run_ok(&dir, &["config", "set", "display.history_days", "3"]);
    assert_eq!(run_ok(&dir, &["config", "get", "display.history_days"]).trim(), "3");

    let id = add_habit(&dir, &["Floss"]);
    let out = run_ok(&dir, &["history", &id]);
    assert_eq!(out.lines().count(), 4);

    let (_, _, code) = run_cli(&dir, &["config", "set", "display.history_days", "0"]);
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(&dir, &["config", "get", "display.nope"]);
    assert_ne!(code, 0);

    run_ok(&dir, &["config", "reset"]);
    let list = json(&run_ok(&dir, &["config", "list"]));
    assert_eq!(list["display"]["history_days"], 7);
}

#[test]
fn test_oversized_history_window_is_rejected() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, &["Walk"]);

    let (_, stderr, code) = run_cli(&dir, &["history", &id, "--days", "100000000"]);
    assert_eq!(code, 2, "clap should reject the value: {stderr}");

    let (_, stderr, code) =
        run_cli(&dir, &["config", "set", "display.history_days", "100000000"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("display.history_days"));

    let out = run_ok(&dir, &["history", &id, "--days", "3660"]);
    assert_eq!(out.lines().count(), 3661);
}

#[test]
fn test_default_active_days_from_config() {
    let dir = TempDir::new().unwrap();
    run_ok(&dir, &["config", "set", "defaults.active_days", "[1,3,5]"]);
    let id = add_habit(&dir, &["Lift"]);
    let show = json(&run_ok(&dir, &["habit", "show", &id]));
    assert_eq!(show["schedule"], "Mon, Wed, Fri");
}
