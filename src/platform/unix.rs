use std::process::Command;

/// Check if a process is alive.
///
/// Signal 0 probes existence without delivering anything. EPERM means the
/// process exists but belongs to someone else, so it still counts as alive.
/// Zombies also answer this probe; callers that care must check status.
pub fn process_alive(pid: u32) -> bool {
    match send_signal(pid, 0) {
        Ok(()) => true,
        Err(errno) => errno == libc::EPERM,
    }
}

/// Send a signal to a process, returning the errno on failure.
///
/// Encapsulates the unsafe kill call; callers classify ESRCH/EPERM.
pub fn send_signal(pid: u32, signal: libc::c_int) -> Result<(), libc::c_int> {
    let result = unsafe { libc::kill(pid as libc::pid_t, signal) };
    if result == 0 {
        Ok(())
    } else {
        Err(last_errno())
    }
}

pub const GRACEFUL_SIGNAL: libc::c_int = libc::SIGTERM;
pub const FORCE_SIGNAL: libc::c_int = libc::SIGKILL;

/// The host shutdown invocation. Requires an elevated caller; failures are
/// reported, never escalated through sudo.
pub fn shutdown_command() -> Command {
    let mut cmd = Command::new("shutdown");
    cmd.arg("now");
    cmd
}

/// One-line privilege warning shown when the interactive menu starts.
pub fn privilege_notice() -> &'static str {
    "Running on a POSIX-based OS. You may need root access to kill some processes."
}

/// Get last error code.
///
/// Encapsulates unsafe errno access.
fn last_errno() -> libc::c_int {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        unsafe { *libc::__errno_location() }
    }

    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
    {
        unsafe { *libc::__error() }
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd"
    )))]
    {
        // Fallback for other Unix systems
        0
    }
}
