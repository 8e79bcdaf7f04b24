use std::time::Duration;

/// Interval the CPU usage of a process or of the whole system is sampled
/// over. The sampling call blocks the caller for this long.
pub const CPU_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Default bound on the wait for a gracefully terminated process to exit.
/// Overridable per invocation with `--timeout-secs`.
pub const TERMINATE_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Poll interval while waiting for a terminated process to disappear.
pub const TERMINATE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Journal file name suggested in help text.
pub const DEFAULT_JOURNAL_FILE: &str = "reap.log";
