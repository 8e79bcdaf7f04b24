//! Process directory reader.
//!
//! `list_processes` is a one-shot enumeration of whatever the OS reports at
//! the moment of the call; re-running it may return a different set.
//! `process_info` captures the extended snapshot and blocks the caller for
//! the CPU sampling interval.

use std::time::Duration;

use crate::config;
use crate::error::{ReapError, ReapResult};
use crate::process::{ProcessInfo, ProcessListing};

#[cfg(unix)]
use std::time::UNIX_EPOCH;

#[cfg(unix)]
use chrono::{DateTime, Local};
#[cfg(unix)]
use psutil::process::{processes, Process};

#[cfg(windows)]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Enumerate all currently running processes as (PID, name) pairs.
///
/// Entries the OS refuses to describe (raced exits, unreadable table
/// slots) are skipped rather than failing the whole enumeration.
pub fn list_processes() -> ReapResult<Vec<ProcessListing>> {
    #[cfg(unix)]
    {
        list_unix()
    }

    #[cfg(windows)]
    {
        list_windows()
    }
}

/// Capture a full snapshot of one process, sampling CPU over the default
/// interval (blocks for that long).
pub fn process_info(pid: u32) -> ReapResult<ProcessInfo> {
    process_info_with_interval(pid, config::CPU_SAMPLE_INTERVAL)
}

pub fn process_info_with_interval(pid: u32, interval: Duration) -> ReapResult<ProcessInfo> {
    #[cfg(unix)]
    {
        info_unix(pid, interval)
    }

    #[cfg(windows)]
    {
        info_windows(pid, interval)
    }
}

#[cfg(unix)]
fn list_unix() -> ReapResult<Vec<ProcessListing>> {
    let entries = processes().map_err(ReapError::unknown)?;

    let mut listings = Vec::with_capacity(entries.len());
    for entry in entries {
        let Ok(process) = entry else { continue };
        let Ok(name) = process.name() else { continue };
        listings.push(ProcessListing {
            pid: process.pid(),
            name,
        });
    }
    Ok(listings)
}

#[cfg(unix)]
fn info_unix(pid: u32, interval: Duration) -> ReapResult<ProcessInfo> {
    let mut process = Process::new(pid).map_err(|err| ReapError::from_process_error(pid, err))?;
    let name = process
        .name()
        .map_err(|err| ReapError::from_process_error(pid, err))?;

    // First reading primes the sampler; the second, after the interval,
    // carries the measurement.
    process
        .cpu_percent()
        .map_err(|err| ReapError::from_process_error(pid, err))?;
    std::thread::sleep(interval);
    let cpu_percent = process
        .cpu_percent()
        .map_err(|err| ReapError::from_process_error(pid, err))?;

    let rss_bytes = process
        .memory_info()
        .map_err(|err| ReapError::from_process_error(pid, err))?
        .rss();

    let started_at = DateTime::<Local>::from(UNIX_EPOCH + process.create_time());

    let cmdline = match process.cmdline() {
        Ok(Some(cmdline)) => cmdline,
        // Kernel threads and zombies have no argv.
        Ok(None) => String::new(),
        Err(err) => match ReapError::from_process_error(pid, err) {
            // Another user's argv may be unreadable; report it as empty.
            ReapError::AccessDenied { .. } | ReapError::ZombieProcess { .. } => String::new(),
            other => return Err(other),
        },
    };

    Ok(ProcessInfo {
        pid,
        name,
        cpu_percent,
        rss_bytes,
        started_at,
        cmdline,
    })
}

#[cfg(windows)]
fn list_windows() -> ReapResult<Vec<ProcessListing>> {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    Ok(system
        .processes()
        .iter()
        .map(|(pid, process)| ProcessListing {
            pid: pid.as_u32(),
            name: process.name().to_string_lossy().into_owned(),
        })
        .collect())
}

#[cfg(windows)]
fn info_windows(pid: u32, interval: Duration) -> ReapResult<ProcessInfo> {
    use chrono::{DateTime, Local};
    use std::time::UNIX_EPOCH;

    let sys_pid = Pid::from_u32(pid);
    let pid_list = [sys_pid];
    let mut system = System::new();

    system.refresh_processes(ProcessesToUpdate::Some(&pid_list), true);
    if system.process(sys_pid).is_none() {
        return Err(ReapError::NotFound { pid });
    }

    // Two refreshes bracket the sampling interval for a CPU reading.
    std::thread::sleep(interval);
    system.refresh_processes(ProcessesToUpdate::Some(&pid_list), true);
    let process = system.process(sys_pid).ok_or(ReapError::NotFound { pid })?;

    let cmdline = process
        .cmd()
        .iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(ProcessInfo {
        pid,
        name: process.name().to_string_lossy().into_owned(),
        cpu_percent: process.cpu_usage(),
        rss_bytes: process.memory(),
        started_at: DateTime::<Local>::from(
            UNIX_EPOCH + std::time::Duration::from_secs(process.start_time()),
        ),
        cmdline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_pid() -> u32 {
        (300_000..400_000)
            .find(|pid| !crate::platform::process_alive(*pid))
            .expect("some PID in range should be unassigned")
    }

    #[test]
    fn listing_contains_the_current_process() {
        let listings = list_processes().expect("enumeration should succeed");
        assert!(!listings.is_empty());
        assert!(listings
            .iter()
            .any(|listing| listing.pid == std::process::id()));
    }

    #[test]
    fn snapshot_of_current_process_is_coherent() {
        let info = process_info_with_interval(std::process::id(), Duration::from_millis(200))
            .expect("current process should be inspectable");

        assert_eq!(info.pid, std::process::id());
        assert!(!info.name.is_empty());
        assert!(info.rss_bytes > 0);
        assert!(info.cpu_percent >= 0.0);
        // Our own argv is always readable.
        assert!(!info.cmdline.is_empty());
    }

    #[test]
    fn snapshot_of_missing_process_is_not_found() {
        let err = process_info_with_interval(free_pid(), Duration::from_millis(50))
            .expect_err("missing process should not produce a snapshot");
        assert!(matches!(err, ReapError::NotFound { .. }));
    }
}
