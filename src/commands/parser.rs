//! One-shot command-line interface.
//!
//! `reap <name_or_pid> <kill_type>` acts once and exits; the kill type
//! decides whether the target is an exact PID or a case-insensitive process
//! name.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config;
use crate::error::{ReapError, ReapResult};

/// Inspect and terminate processes; report coarse system resource usage.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reap",
    about = "Terminate processes by PID or name; run without arguments for the interactive menu",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Process name or PID to act on
    #[arg(value_name = "NAME_OR_PID")]
    pub target: String,

    /// How to interpret the target: "pid" or "name" (case-insensitive)
    #[arg(value_name = "KILL_TYPE")]
    pub kill_type: String,

    /// Send the non-catchable kill instead of a graceful terminate
    #[arg(long)]
    pub force: bool,

    /// Seconds to wait for a gracefully terminated process to exit
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        default_value_t = config::TERMINATE_WAIT_TIMEOUT.as_secs()
    )]
    pub timeout_secs: u64,

    /// Append operation outcomes to this plain-text journal file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// The validated target of a one-shot invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillTarget {
    Pid(u32),
    Name(String),
}

impl Cli {
    /// Try to parse a custom argv (used by tests).
    pub fn try_parse_command_from<I, T>(iter: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(iter)
    }

    /// Validate the positional pair into a target. Both failure modes are
    /// user-input errors and share the exit-1 convention.
    pub fn kill_target(&self) -> ReapResult<KillTarget> {
        match self.kill_type.to_lowercase().as_str() {
            "pid" => self
                .target
                .parse::<u32>()
                .map(KillTarget::Pid)
                .map_err(|_| {
                    ReapError::invalid_input("Invalid PID value. Please enter a valid PID.")
                }),
            "name" => Ok(KillTarget::Name(self.target.clone())),
            other => Err(ReapError::invalid_input(format!(
                "Invalid kill type '{}'. Use 'pid' or 'name'.",
                other
            ))),
        }
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
