//! Reap Library
//!
//! Process inspection and termination with classified failures, plus coarse
//! system resource reporting. Everything is synchronous and one-shot: each
//! operation is a fresh call into the OS process APIs, and nothing is cached
//! between calls.

pub mod commands;
pub mod config;
pub mod error;
pub mod journal;
pub mod menu;
pub mod platform;
pub mod process;
pub mod resources;

// Re-export commonly used types for convenience
pub use commands::{Cli, KillTarget};
pub use error::{ReapError, ReapResult};
pub use journal::{FileJournal, Journal, NullJournal};
pub use process::{
    ProcessHandle, ProcessInfo, ProcessListing, SignalTerminator, TerminateMode, Termination,
    Terminator,
};
pub use resources::ResourceSample;
