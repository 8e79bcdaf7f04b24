//! Process-control façade: directory enumeration, PID/name resolution, and
//! termination with per-candidate error classification.

use chrono::{DateTime, Local};

pub mod directory;
pub mod resolver;
pub mod terminator;

pub use terminator::{SignalTerminator, TerminateMode, Termination, Terminator};

/// One row of the process directory: identity only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessListing {
    pub pid: u32,
    pub name: String,
}

/// Reference to a live process, carrying the name observed at resolution
/// time.
///
/// Handles are resolved fresh for every operation and never cached across
/// calls: PIDs are recycled by the OS, and a stale handle could reference an
/// unrelated later process. Operations on a handle whose process has exited
/// fail with a no-such-process condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: u32,
    pub name: String,
}

/// Point-in-time snapshot of one process. Immutable once captured; not kept
/// in sync with the live process.
#[derive(Debug, Clone)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    /// CPU utilization sampled over a short fixed interval.
    pub cpu_percent: f32,
    /// Resident set size.
    pub rss_bytes: u64,
    pub started_at: DateTime<Local>,
    /// Space-joined argument vector; empty when the OS denies access to the
    /// arguments or the process has none.
    pub cmdline: String,
}

impl ProcessInfo {
    pub fn rss_megabytes(&self) -> f64 {
        self.rss_bytes as f64 / (1024.0 * 1024.0)
    }
}
