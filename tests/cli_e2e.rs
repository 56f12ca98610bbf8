//! End-to-end CLI tests for chatstats.
//!
//! These tests run the actual binary with various arguments and check its
//! output and the files it leaves behind.
//!
//! # Test Categories
//!
//! - **Basic functionality**: table report, summary, timeline chart and CSV
//! - **Output formats**: table and JSON
//! - **Roster**: `--member`, `--roster`, `--substring`
//! - **Error handling**: usage errors, missing files, bad rosters
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const CHAT: &str = "\
12/05/2023, 9:41 AM - Alice: Hello there 😀😀 friend
12/05/2023, 9:42 AM - Bob: hi 👍🏽
12/05/2023, 9:43 AM - WhatsApp: Messages are end-to-end encrypted
01/07/2023, 10:00 - vic: back from holiday 🔥
";

fn setup() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("chat.txt"), CHAT).unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    fs::write(
        dir.path().join("roster.json"),
        r#"{"Victor": ["vic"], "Alice": []}"#,
    )
    .unwrap();
    dir
}

/// The binary, running inside `dir` so the default timeline lands there.
fn chatstats(dir: &Path) -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatstats"));
    let mut cmd = Command::from_std(cmd);
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_table_report() {
    let dir = setup();

    chatstats(dir.path())
        .arg("chat.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("CHAT STATISTICS"))
        .stdout(predicate::str::contains("| ALICE "))
        .stdout(predicate::str::contains("| VIC "))
        .stdout(predicate::str::contains("TOP EMOJIS (ALL)"))
        .stdout(predicate::str::contains(" 1. 😀 -      2 times (in 1 messages)"))
        .stdout(predicate::str::contains("Processed 3 messages"))
        .stdout(predicate::str::contains("Date range: 2023-05-12 to 2023-07-01"))
        .stdout(predicate::str::contains("Timeline saved as message_timeline.png (3 months)"));
}

#[test]
fn test_timeline_chart_written() {
    let dir = setup();

    chatstats(dir.path()).arg("chat.txt").assert().success();

    let chart = fs::read(dir.path().join("message_timeline.png")).unwrap();
    assert!(!chart.is_empty());
    assert!(chart.starts_with(b"\x89PNG"));
}

#[test]
fn test_timeline_csv_written() {
    let dir = setup();

    chatstats(dir.path())
        .args(["chat.txt", "--timeline-csv", "months.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timeline data saved as months.csv (3 months)"));

    assert!(dir.path().join("message_timeline.png").exists());
    let timeline = fs::read_to_string(dir.path().join("months.csv")).unwrap();
    let lines: Vec<&str> = timeline.lines().collect();
    assert_eq!(lines[0], "Month;Total;Alice;Bob;Vic");
    assert_eq!(lines[1], "2023-05;2;1;1;0");
    assert_eq!(lines[2], "2023-06;0;0;0;0");
    assert_eq!(lines[3], "2023-07;1;0;0;1");
}

#[test]
fn test_custom_timeline_path() {
    let dir = setup();

    chatstats(dir.path())
        .args(["chat.txt", "--timeline", "volume.png"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timeline saved as volume.png"));

    assert!(fs::metadata(dir.path().join("volume.png")).unwrap().len() > 0);
    assert!(!dir.path().join("message_timeline.png").exists());
}

#[test]
fn test_no_timeline() {
    let dir = setup();

    chatstats(dir.path())
        .args(["chat.txt", "--no-timeline", "--timeline-csv", "months.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timeline").not());

    assert!(!dir.path().join("message_timeline.png").exists());
    assert!(!dir.path().join("months.csv").exists());
}

#[test]
fn test_empty_file() {
    let dir = setup();

    chatstats(dir.path())
        .arg("empty.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("No valid messages found"))
        .stdout(predicate::str::contains("No date data available for plotting"));

    assert!(!dir.path().join("message_timeline.png").exists());
}

#[test]
fn test_top_limits_rankings() {
    let dir = setup();

    chatstats(dir.path())
        .args(["chat.txt", "--top", "1", "--no-timeline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("😀"))
        .stdout(predicate::str::contains(" 2. ").not());
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_json_output() {
    let dir = setup();

    let output = chatstats(dir.path())
        .args(["chat.txt", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"]["messages"], 3);
    assert_eq!(value["total"]["words"], 7);
    assert_eq!(value["speakers"][0]["name"], "Alice");
    assert_eq!(value["input"]["skipped"]["system_speaker"], 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Timeline saved as message_timeline.png"));
}

// ============================================================================
// Roster
// ============================================================================

#[test]
fn test_member_option() {
    let dir = setup();

    chatstats(dir.path())
        .args(["chat.txt", "--member", "Victor=vic", "--member", "Alice", "--no-timeline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| VICTOR "))
        .stdout(predicate::str::contains("| BOB ").not())
        .stdout(predicate::str::contains("Processed 2 messages"))
        .stdout(predicate::str::contains("unknown speaker: 1"));
}

#[test]
fn test_roster_file_option() {
    let dir = setup();

    chatstats(dir.path())
        .args(["chat.txt", "--roster", "roster.json", "--format", "json", "--no-timeline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Victor\""))
        .stdout(predicate::str::contains("\"Bob\"").not());
}

#[test]
fn test_substring_option() {
    let dir = setup();

    // "vic" contains "vi" only under substring matching
    chatstats(dir.path())
        .args(["chat.txt", "-m", "V=vi", "--substring", "--no-timeline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 messages"));
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_missing_input_argument() {
    let dir = setup();

    chatstats(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_input_file() {
    let dir = setup();

    chatstats(dir.path())
        .arg("does_not_exist.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("does_not_exist.txt"));
}

#[test]
fn test_invalid_roster_file() {
    let dir = setup();
    fs::write(dir.path().join("bad.json"), "[\"not a map\"]").unwrap();

    chatstats(dir.path())
        .args(["chat.txt", "--roster", "bad.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_substring_without_roster_rejected() {
    let dir = setup();

    chatstats(dir.path())
        .args(["chat.txt", "--substring"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--substring"));

    assert!(!dir.path().join("message_timeline.png").exists());
}

#[test]
fn test_invalid_format() {
    let dir = setup();

    chatstats(dir.path())
        .args(["chat.txt", "--format", "xml"])
        .assert()
        .failure();
}

#[test]
fn test_help() {
    let dir = setup();

    chatstats(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--member"))
        .stdout(predicate::str::contains("--no-timeline"));
}
