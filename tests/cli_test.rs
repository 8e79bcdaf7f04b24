//! End-to-end scenarios against the `reap` binary.
//!
//! Runtime process failures are reported on stdout with exit 0; user-input
//! errors carry exit 1. Nothing here signals processes the suite did not
//! spawn itself.

use assert_cmd::Command;
use predicates::prelude::*;

/// A PID that is currently not assigned to any process.
fn free_pid() -> u32 {
    (300_000..400_000)
        .find(|pid| !reap::platform::process_alive(*pid))
        .expect("some PID in range should be unassigned")
}

fn reap_cmd() -> Command {
    Command::cargo_bin("reap").expect("binary should build")
}

#[test]
fn single_argument_prints_usage_and_exits_one() {
    reap_cmd()
        .arg("12345")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn nonexistent_pid_is_reported_and_exits_zero() {
    let pid = free_pid();
    reap_cmd()
        .args([&pid.to_string(), "pid"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "No process found with PID {}.",
            pid
        )));
}

#[test]
fn unmatched_name_is_reported_and_exits_zero() {
    reap_cmd()
        .args(["definitely-not-a-real-process-name", "name"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No processes found with the name definitely-not-a-real-process-name.",
        ));
}

#[test]
fn unrecognized_kill_type_exits_one() {
    reap_cmd()
        .args(["123", "group"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid kill type"));
}

#[test]
fn unparseable_pid_exits_one() {
    reap_cmd()
        .args(["not-a-number", "pid"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid PID value"));
}

#[test]
fn version_flag_prints_the_crate_version() {
    reap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "reap {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn outcomes_are_appended_to_the_journal_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("events.log");
    let pid = free_pid();

    reap_cmd()
        .args([
            &pid.to_string(),
            "pid",
            "--log-file",
            log_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log_path).expect("journal should exist");
    assert!(contents.contains(&format!("No process found with PID {}.", pid)));
    // one timestamped line per event
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains(" - "));
}

#[cfg(unix)]
#[test]
fn graceful_kill_by_pid_terminates_a_spawned_child() {
    let mut child = std::process::Command::new("sleep")
        .arg("30")
        .spawn()
        .expect("spawn sleep");
    let pid = child.id();

    reap_cmd()
        .args([&pid.to_string(), "pid", "--timeout-secs", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "(PID {}) has been terminated.",
            pid
        )));

    child.wait().expect("reap child");
}

#[cfg(unix)]
#[test]
fn force_kill_by_pid_reports_the_forced_outcome() {
    let mut child = std::process::Command::new("sleep")
        .arg("30")
        .spawn()
        .expect("spawn sleep");
    let pid = child.id();

    reap_cmd()
        .args([&pid.to_string(), "pid", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Force killed process 'sleep' (PID {}).",
            pid
        )));

    child.wait().expect("reap child");
}
