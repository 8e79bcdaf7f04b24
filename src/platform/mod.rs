//! Platform-specific process plumbing: liveness probes, raw signalling,
//! and the host shutdown invocation.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::*;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::*;
