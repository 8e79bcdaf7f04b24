//! Process termination with classified failures.
//!
//! Graceful termination sends the catchable terminate signal and polls for
//! exit up to a bounded timeout; force kill sends the non-catchable signal
//! and does not wait. The `Terminator` trait is the seam batch operations
//! are tested through.

use std::time::Duration;

use crate::config;
use crate::error::{ReapError, ReapResult};
use crate::platform;
use crate::process::ProcessHandle;

#[cfg(unix)]
use psutil::process::{Process, Status};

#[cfg(windows)]
use sysinfo::{Pid, ProcessesToUpdate, Signal, System};

/// How a process should be asked to go away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateMode {
    /// Catchable terminate request followed by a bounded wait for exit.
    Graceful,
    /// Immediate, non-catchable kill; no wait for exit confirmation.
    Forced,
}

impl TerminateMode {
    pub fn from_force_flag(force: bool) -> Self {
        if force {
            TerminateMode::Forced
        } else {
            TerminateMode::Graceful
        }
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, TerminateMode::Forced)
    }
}

/// Outcome of a successful termination request.
#[derive(Debug, Clone)]
pub struct Termination {
    pub pid: u32,
    pub forced: bool,
    /// How long the graceful wait took; zero for forced kills.
    pub waited: Duration,
}

/// Seam for issuing termination requests, so batch behavior can be tested
/// with a stub instead of live signals.
pub trait Terminator {
    fn terminate(&self, handle: &ProcessHandle, mode: TerminateMode) -> ReapResult<Termination>;
}

/// The live terminator: signals through the platform layer.
pub struct SignalTerminator {
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl SignalTerminator {
    pub fn new(wait_timeout: Duration) -> Self {
        Self {
            wait_timeout,
            poll_interval: config::TERMINATE_POLL_INTERVAL,
        }
    }
}

impl Default for SignalTerminator {
    fn default() -> Self {
        Self::new(config::TERMINATE_WAIT_TIMEOUT)
    }
}

impl Terminator for SignalTerminator {
    fn terminate(&self, handle: &ProcessHandle, mode: TerminateMode) -> ReapResult<Termination> {
        #[cfg(unix)]
        {
            self.terminate_unix(handle.pid, mode)
        }

        #[cfg(windows)]
        {
            self.terminate_windows(handle.pid, mode)
        }
    }
}

impl SignalTerminator {
    #[cfg(unix)]
    fn terminate_unix(&self, pid: u32, mode: TerminateMode) -> ReapResult<Termination> {
        // An already-exited-but-unreaped process cannot be signaled
        // meaningfully; classify it up front.
        if is_zombie(pid)? {
            return Err(ReapError::ZombieProcess { pid });
        }

        match mode {
            TerminateMode::Forced => {
                send_classified(pid, platform::FORCE_SIGNAL)?;
                Ok(Termination {
                    pid,
                    forced: true,
                    waited: Duration::ZERO,
                })
            }
            TerminateMode::Graceful => {
                send_classified(pid, platform::GRACEFUL_SIGNAL)?;
                self.wait_for_exit(pid)
            }
        }
    }

    #[cfg(unix)]
    fn wait_for_exit(&self, pid: u32) -> ReapResult<Termination> {
        let start = std::time::Instant::now();
        loop {
            if !platform::process_alive(pid) {
                return Ok(Termination {
                    pid,
                    forced: false,
                    waited: start.elapsed(),
                });
            }

            // A process whose parent has not reaped it yet keeps its PID as
            // a zombie; that still counts as exited.
            match is_zombie(pid) {
                Ok(true) | Err(ReapError::NotFound { .. }) => {
                    return Ok(Termination {
                        pid,
                        forced: false,
                        waited: start.elapsed(),
                    });
                }
                _ => {}
            }

            if start.elapsed() >= self.wait_timeout {
                return Err(ReapError::TimedOut {
                    pid,
                    timeout: self.wait_timeout,
                });
            }

            std::thread::sleep(self.poll_interval);
        }
    }

    #[cfg(windows)]
    fn terminate_windows(&self, pid: u32, mode: TerminateMode) -> ReapResult<Termination> {
        let sys_pid = Pid::from_u32(pid);
        let pid_list = [sys_pid];
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&pid_list), true);
        let process = system.process(sys_pid).ok_or(ReapError::NotFound { pid })?;

        match mode {
            TerminateMode::Forced => {
                if process.kill() {
                    Ok(Termination {
                        pid,
                        forced: true,
                        waited: Duration::ZERO,
                    })
                } else {
                    Err(ReapError::AccessDenied { pid })
                }
            }
            TerminateMode::Graceful => {
                // Windows has no catchable terminate; sysinfo falls back to
                // the hard kill when Term is unsupported.
                let delivered = process
                    .kill_with(Signal::Term)
                    .unwrap_or_else(|| process.kill());
                if !delivered {
                    return Err(ReapError::AccessDenied { pid });
                }

                let start = std::time::Instant::now();
                loop {
                    if !platform::process_alive(pid) {
                        return Ok(Termination {
                            pid,
                            forced: false,
                            waited: start.elapsed(),
                        });
                    }
                    if start.elapsed() >= self.wait_timeout {
                        return Err(ReapError::TimedOut {
                            pid,
                            timeout: self.wait_timeout,
                        });
                    }
                    std::thread::sleep(self.poll_interval);
                }
            }
        }
    }
}

/// Apply one termination mode to every candidate independently. One
/// candidate's failure never aborts the attempts on the rest; the caller
/// reports each outcome.
pub fn terminate_candidates<T: Terminator + ?Sized>(
    terminator: &T,
    handles: &[ProcessHandle],
    mode: TerminateMode,
) -> Vec<(ProcessHandle, ReapResult<Termination>)> {
    handles
        .iter()
        .map(|handle| (handle.clone(), terminator.terminate(handle, mode)))
        .collect()
}

#[cfg(unix)]
fn send_classified(pid: u32, signal: libc::c_int) -> ReapResult<()> {
    platform::send_signal(pid, signal).map_err(|errno| match errno {
        libc::ESRCH => ReapError::NotFound { pid },
        libc::EPERM => ReapError::AccessDenied { pid },
        other => ReapError::unknown(format!("kill({}) failed with errno {}", pid, other)),
    })
}

#[cfg(unix)]
fn is_zombie(pid: u32) -> ReapResult<bool> {
    let process = Process::new(pid).map_err(|err| ReapError::from_process_error(pid, err))?;
    match process.status() {
        Ok(status) => Ok(matches!(status, Status::Zombie)),
        Err(err) => match ReapError::from_process_error(pid, err) {
            ReapError::ZombieProcess { .. } => Ok(true),
            // An unreadable status does not block the signal itself.
            ReapError::AccessDenied { .. } => Ok(false),
            other => Err(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn handle(pid: u32, name: &str) -> ProcessHandle {
        ProcessHandle {
            pid,
            name: name.to_string(),
        }
    }

    /// Stub that denies the first PID it is asked about and records every
    /// attempt.
    struct DenyFirstTerminator {
        denied_pid: u32,
        attempts: RefCell<Vec<u32>>,
    }

    impl Terminator for DenyFirstTerminator {
        fn terminate(
            &self,
            handle: &ProcessHandle,
            mode: TerminateMode,
        ) -> ReapResult<Termination> {
            self.attempts.borrow_mut().push(handle.pid);
            if handle.pid == self.denied_pid {
                Err(ReapError::AccessDenied { pid: handle.pid })
            } else {
                Ok(Termination {
                    pid: handle.pid,
                    forced: mode.is_forced(),
                    waited: Duration::ZERO,
                })
            }
        }
    }

    #[test]
    fn batch_continues_past_a_denied_candidate() {
        let terminator = DenyFirstTerminator {
            denied_pid: 100,
            attempts: RefCell::new(Vec::new()),
        };
        let candidates = [handle(100, "agent"), handle(101, "agent")];

        let outcomes = terminate_candidates(&terminator, &candidates, TerminateMode::Forced);

        assert_eq!(*terminator.attempts.borrow(), vec![100, 101]);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0].1,
            Err(ReapError::AccessDenied { pid: 100 })
        ));
        assert!(outcomes[1].1.is_ok());
    }

    #[test]
    fn force_flag_maps_to_mode() {
        assert_eq!(TerminateMode::from_force_flag(true), TerminateMode::Forced);
        assert_eq!(
            TerminateMode::from_force_flag(false),
            TerminateMode::Graceful
        );
        assert!(TerminateMode::Forced.is_forced());
        assert!(!TerminateMode::Graceful.is_forced());
    }

    #[cfg(unix)]
    mod live {
        use super::*;
        use std::process::Command;

        #[test]
        fn graceful_terminate_stops_a_sleeping_child() {
            let mut child = Command::new("sleep")
                .arg("30")
                .spawn()
                .expect("spawn sleep");
            let target = handle(child.id(), "sleep");

            let terminator = SignalTerminator::new(Duration::from_secs(5));
            let outcome = terminator
                .terminate(&target, TerminateMode::Graceful)
                .expect("sleep should honor SIGTERM");
            assert!(!outcome.forced);
            assert_eq!(outcome.pid, target.pid);

            child.wait().expect("reap child");
        }

        #[test]
        fn terminating_an_already_exited_process_is_not_found() {
            let mut child = Command::new("true").spawn().expect("spawn true");
            let pid = child.id();
            child.wait().expect("reap child");

            let terminator = SignalTerminator::default();
            let err = terminator
                .terminate(&handle(pid, "true"), TerminateMode::Graceful)
                .expect_err("reaped process should be gone");
            assert!(matches!(err, ReapError::NotFound { .. }));
        }

        #[test]
        fn terminating_a_zombie_is_classified_as_zombie() {
            // An exited child we have not waited on stays a zombie.
            let mut child = Command::new("true").spawn().expect("spawn true");
            let pid = child.id();

            let mut saw_zombie = false;
            for _ in 0..100 {
                if is_zombie(pid).unwrap_or(false) {
                    saw_zombie = true;
                    break;
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            assert!(saw_zombie, "child should linger as a zombie until reaped");

            let terminator = SignalTerminator::default();
            let err = terminator
                .terminate(&handle(pid, "true"), TerminateMode::Forced)
                .expect_err("zombie cannot be terminated");
            assert!(matches!(err, ReapError::ZombieProcess { .. }));

            child.wait().expect("reap child");
        }

        #[test]
        fn graceful_wait_times_out_on_a_process_ignoring_term() {
            // The trailing exit keeps the shell itself as the signal target
            // instead of exec-ing into sleep.
            let mut child = Command::new("sh")
                .args(["-c", "trap '' TERM; sleep 5; exit 0"])
                .spawn()
                .expect("spawn sh");
            let pid = child.id();

            let terminator = SignalTerminator::new(Duration::from_millis(500));
            let err = terminator
                .terminate(&handle(pid, "sh"), TerminateMode::Graceful)
                .expect_err("TERM is trapped, wait must time out");
            assert!(matches!(err, ReapError::TimedOut { .. }));

            // Clean up with the non-catchable signal.
            terminator
                .terminate(&handle(pid, "sh"), TerminateMode::Forced)
                .expect("force kill cleanup");
            child.wait().expect("reap child");
        }
    }
}
