//! Resolve a user-supplied PID or name to live process handles.
//!
//! Resolution always goes back to the OS; nothing is cached between calls.

use crate::error::{ReapError, ReapResult};
use crate::process::{directory, ProcessHandle, ProcessListing};

#[cfg(unix)]
use psutil::process::Process;

#[cfg(windows)]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Resolve an exact PID to a handle, or `NotFound` if no live process
/// carries it.
pub fn resolve_by_pid(pid: u32) -> ReapResult<ProcessHandle> {
    #[cfg(unix)]
    {
        let process = Process::new(pid).map_err(|err| ReapError::from_process_error(pid, err))?;
        // A handle whose name is unreadable can still be signaled.
        let name = process.name().unwrap_or_default();
        Ok(ProcessHandle { pid, name })
    }

    #[cfg(windows)]
    {
        let sys_pid = Pid::from_u32(pid);
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[sys_pid]), true);
        let process = system.process(sys_pid).ok_or(ReapError::NotFound { pid })?;
        Ok(ProcessHandle {
            pid,
            name: process.name().to_string_lossy().into_owned(),
        })
    }
}

/// Resolve a name to ALL processes whose name matches case-insensitively
/// (exact match, not substring). The empty vector is a valid result, not an
/// error; callers report "no processes found".
pub fn resolve_by_name(name: &str) -> ReapResult<Vec<ProcessHandle>> {
    let listings = directory::list_processes()?;
    Ok(matching_candidates(&listings, name))
}

/// The tie-break rule: every matching process becomes a candidate for batch
/// action. There is no first-match shortcut.
pub(crate) fn matching_candidates(
    listings: &[ProcessListing],
    name: &str,
) -> Vec<ProcessHandle> {
    let wanted = name.to_lowercase();
    listings
        .iter()
        .filter(|listing| listing.name.to_lowercase() == wanted)
        .map(|listing| ProcessHandle {
            pid: listing.pid,
            name: listing.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(pid: u32, name: &str) -> ProcessListing {
        ProcessListing {
            pid,
            name: name.to_string(),
        }
    }

    #[test]
    fn name_match_is_case_insensitive_and_returns_all_candidates() {
        let listings = vec![
            listing(100, "agent"),
            listing(101, "agent"),
            listing(102, "worker"),
        ];

        let candidates = matching_candidates(&listings, "Agent");
        let pids: Vec<u32> = candidates.iter().map(|handle| handle.pid).collect();
        assert_eq!(pids, vec![100, 101]);
    }

    #[test]
    fn name_match_is_exact_not_substring() {
        let listings = vec![listing(10, "agent-worker"), listing(11, "agent")];
        let candidates = matching_candidates(&listings, "agent");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].pid, 11);
    }

    #[test]
    fn no_match_yields_the_empty_set() {
        let listings = vec![listing(1, "init")];
        assert!(matching_candidates(&listings, "no-such-name").is_empty());
    }

    #[test]
    fn resolving_the_current_pid_succeeds() {
        let handle = resolve_by_pid(std::process::id()).expect("current process should resolve");
        assert_eq!(handle.pid, std::process::id());
        assert!(!handle.name.is_empty());
    }

    #[test]
    fn resolving_a_free_pid_is_not_found() {
        let free_pid = (300_000..400_000)
            .find(|pid| !crate::platform::process_alive(*pid))
            .expect("some PID in range should be unassigned");

        let err = resolve_by_pid(free_pid).expect_err("free PID should not resolve");
        assert!(matches!(err, ReapError::NotFound { .. }));
    }

    #[test]
    fn resolving_by_own_name_finds_the_current_process() {
        let listings = directory::list_processes().expect("enumeration should succeed");
        let own = listings
            .iter()
            .find(|listing| listing.pid == std::process::id())
            .expect("current process should be listed")
            .clone();

        // Flip the case to exercise the case-insensitive path end to end.
        let shouted = own.name.to_uppercase();
        let candidates = resolve_by_name(&shouted).expect("resolution should succeed");
        assert!(candidates
            .iter()
            .any(|handle| handle.pid == std::process::id()));
    }
}
