//! Error taxonomy for process operations.
//!
//! Every OS-level failure is classified at the boundary where it occurs and
//! carried as a `ReapError` until the front end turns it into a user-facing
//! message. Nothing in here panics during normal use.

use std::time::Duration;
use thiserror::Error;

#[cfg(unix)]
use psutil::process::ProcessError;

/// Main error type for process inspection and termination.
#[derive(Error, Debug)]
pub enum ReapError {
    /// The PID is not assigned to any live process, or the process exited
    /// between resolution and action.
    #[error("no such process: {pid}")]
    NotFound { pid: u32 },

    /// The caller lacks permission to inspect or signal the process.
    #[error("access denied for process {pid}")]
    AccessDenied { pid: u32 },

    /// The process has exited but has not been reaped by its parent; it
    /// cannot be signaled meaningfully.
    #[error("process {pid} is a zombie")]
    ZombieProcess { pid: u32 },

    /// A gracefully terminated process was still running when the bounded
    /// wait elapsed.
    #[error("process {pid} still running {timeout:?} after terminate request")]
    TimedOut { pid: u32, timeout: Duration },

    /// Bad user input: unparseable PID, unrecognized kill type, invalid
    /// menu choice.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Any other OS-level failure, carrying the underlying message.
    #[error("unexpected error: {message}")]
    Unknown { message: String },
}

/// Result type alias for convenience.
pub type ReapResult<T> = Result<T, ReapError>;

impl ReapError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ReapError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl std::fmt::Display) -> Self {
        ReapError::Unknown {
            message: message.to_string(),
        }
    }

    /// Classify a psutil process error for the given PID.
    ///
    /// psutil distinguishes exactly the conditions the terminator needs to
    /// keep apart; everything it cannot name becomes `Unknown`.
    #[cfg(unix)]
    pub fn from_process_error(pid: u32, err: ProcessError) -> Self {
        match err {
            ProcessError::NoSuchProcess { .. } => ReapError::NotFound { pid },
            ProcessError::AccessDenied { .. } => ReapError::AccessDenied { pid },
            ProcessError::ZombieProcess { .. } => ReapError::ZombieProcess { pid },
            other => ReapError::Unknown {
                message: other.to_string(),
            },
        }
    }

    /// Get user-friendly message.
    pub fn user_message(&self) -> String {
        match self {
            ReapError::NotFound { pid } => {
                format!("No process found with PID {}.", pid)
            }
            ReapError::AccessDenied { pid } => format!(
                "Access denied to act on process with PID {}. Try running as administrator or root.",
                pid
            ),
            ReapError::ZombieProcess { pid } => format!(
                "Process with PID {} is a zombie and cannot be terminated.",
                pid
            ),
            ReapError::TimedOut { pid, timeout } => format!(
                "Process with PID {} did not exit within {}s; use --force to kill it.",
                pid,
                timeout.as_secs()
            ),
            ReapError::InvalidInput { message } => message.clone(),
            ReapError::Unknown { message } => format!("An error occurred: {}", message),
        }
    }

    /// Whether this is a user-input problem (reported with a usage hint and
    /// a non-zero exit) as opposed to a runtime process failure (reported,
    /// exit 0).
    pub fn is_input_error(&self) -> bool {
        matches!(self, ReapError::InvalidInput { .. })
    }
}
