//! Shared operations behind both front ends.
//!
//! Every operation resolves handles fresh, acts, and reports the outcome to
//! stdout and the injected journal. Runtime process failures are converted
//! to user-facing messages here; they never escape as process exit failures.

use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

use crate::error::ReapResult;
use crate::journal::Journal;
use crate::process::terminator::terminate_candidates;
use crate::process::{directory, resolver, ProcessHandle, TerminateMode, Termination, Terminator};
use crate::resources;

pub mod parser;

pub use parser::{Cli, KillTarget};

/// Kill a single process by PID. The handle is resolved immediately before
/// acting; a PID that vanished in between reports "no process found".
pub fn kill_by_pid(
    pid: u32,
    mode: TerminateMode,
    terminator: &dyn Terminator,
    journal: &dyn Journal,
) {
    match resolver::resolve_by_pid(pid) {
        Ok(handle) => {
            let outcome = terminator.terminate(&handle, mode);
            report_outcome(&handle, outcome, journal);
        }
        Err(err) => report_failure(journal, &err.user_message()),
    }
}

/// Kill every process matching the name (case-insensitive). Candidates are
/// attempted independently; a denied candidate never aborts the rest.
pub fn kill_by_name(
    name: &str,
    mode: TerminateMode,
    terminator: &dyn Terminator,
    journal: &dyn Journal,
) {
    match resolver::resolve_by_name(name) {
        Ok(candidates) if candidates.is_empty() => {
            report(
                journal,
                &format!("No processes found with the name {}.", name),
            );
        }
        Ok(candidates) => {
            for (handle, outcome) in terminate_candidates(terminator, &candidates, mode) {
                report_outcome(&handle, outcome, journal);
            }
        }
        Err(err) => report_failure(journal, &err.user_message()),
    }
}

/// Print the full process directory as a PID/name table.
pub fn list_all(journal: &dyn Journal) {
    match directory::list_processes() {
        Ok(mut listings) => {
            listings.sort_by_key(|listing| listing.pid);

            println!("Listing all running processes:");
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
            table.add_row(Row::new(vec![Cell::new("PID"), Cell::new("NAME")]));
            for listing in &listings {
                table.add_row(Row::new(vec![
                    Cell::new(&listing.pid.to_string()),
                    Cell::new(&listing.name),
                ]));
            }
            table.printstd();

            journal.record(&format!("listed {} running processes", listings.len()));
        }
        Err(err) => report_failure(journal, &err.user_message()),
    }
}

/// Report the resident memory of one process. Blocks for the CPU sampling
/// interval because the snapshot carries a CPU reading as well.
pub fn memory_by_pid(pid: u32, journal: &dyn Journal) {
    match directory::process_info(pid) {
        Ok(info) => report(
            journal,
            &format!(
                "Memory usage of PID {}: {:.1} MB",
                pid,
                info.rss_megabytes()
            ),
        ),
        Err(err) => report_failure(journal, &err.user_message()),
    }
}

/// Print full snapshots of every process matching the name. Each snapshot
/// blocks for the sampling interval.
pub fn memory_by_name(name: &str, journal: &dyn Journal) {
    println!("Listing all processes with the name: {}", name);

    let candidates = match resolver::resolve_by_name(name) {
        Ok(candidates) => candidates,
        Err(err) => {
            report_failure(journal, &err.user_message());
            return;
        }
    };

    if candidates.is_empty() {
        report(
            journal,
            &format!("No processes found with the name {}.", name),
        );
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.add_row(Row::new(vec![
        Cell::new("PID"),
        Cell::new("NAME"),
        Cell::new("CPU%"),
        Cell::new("MEMORY"),
        Cell::new("STARTED"),
        Cell::new("COMMAND"),
    ]));

    let mut described = 0;
    for handle in &candidates {
        // A candidate may exit between enumeration and snapshot.
        match directory::process_info(handle.pid) {
            Ok(info) => {
                table.add_row(Row::new(vec![
                    Cell::new(&info.pid.to_string()),
                    Cell::new(&info.name),
                    Cell::new(&format!("{:.1}", info.cpu_percent)),
                    Cell::new(&format!("{:.1} MB", info.rss_megabytes())),
                    Cell::new(&info.started_at.format("%Y-%m-%d %H:%M:%S").to_string()),
                    Cell::new(&truncate_str(&info.cmdline, 60)),
                ]));
                described += 1;
            }
            Err(err) => report_failure(journal, &err.user_message()),
        }
    }

    if described > 0 {
        table.printstd();
    }
    journal.record(&format!(
        "described {} of {} processes named '{}'",
        described,
        candidates.len(),
        name
    ));
}

/// Print one aggregate CPU/memory/disk sample. Blocks for the sampling
/// interval.
pub fn report_resources(journal: &dyn Journal) {
    match resources::sample() {
        Ok(sample) => report(
            journal,
            &format!(
                "System Resources - CPU: {:.1}%, Memory: {:.1}%, Disk: {:.1}%",
                sample.cpu_percent, sample.memory_percent, sample.disk_percent
            ),
        ),
        Err(err) => report_failure(journal, &err.user_message()),
    }
}

/// Invoke the host shutdown command. Irreversible; callers gate this behind
/// explicit confirmation.
pub fn shutdown_system(journal: &dyn Journal) {
    report(journal, "Shutting down the system...");
    match crate::platform::shutdown_command().status() {
        Ok(status) if status.success() => {}
        Ok(status) => report_failure(
            journal,
            &format!("Shutdown command exited with {}.", status),
        ),
        Err(err) => report_failure(journal, &format!("Failed to run shutdown command: {}.", err)),
    }
}

fn report_outcome(
    handle: &ProcessHandle,
    outcome: ReapResult<Termination>,
    journal: &dyn Journal,
) {
    match outcome {
        Ok(termination) if termination.forced => report_success(
            journal,
            &format!(
                "Force killed process '{}' (PID {}).",
                handle.name, handle.pid
            ),
        ),
        Ok(_) => report_success(
            journal,
            &format!(
                "Process '{}' (PID {}) has been terminated.",
                handle.name, handle.pid
            ),
        ),
        Err(err) => report_failure(journal, &err.user_message()),
    }
}

fn report(journal: &dyn Journal, message: &str) {
    println!("{}", message);
    journal.record(message);
}

fn report_success(journal: &dyn Journal, message: &str) {
    println!("{}", message.green());
    journal.record(message);
}

fn report_failure(journal: &dyn Journal, message: &str) {
    println!("{}", message.red());
    journal.record(message);
}

/// Truncate to at most `max_chars` characters (not bytes), appending "..."
/// when shortened.
fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", truncated)
}
