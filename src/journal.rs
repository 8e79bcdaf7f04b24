//! Append-only event journal.
//!
//! The journal is a user-facing side channel, separate from `tracing`
//! diagnostics: one timestamped line per recorded event, written only when
//! the caller opted in with a journal path. It is injected as a collaborator
//! so the operations layer never touches a global file path.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

/// Recording sink for operation outcomes.
pub trait Journal {
    /// Record one event. Must not fail the calling operation.
    fn record(&self, event: &str);
}

/// Journal that appends timestamped lines to a plain-text file.
///
/// The file is opened per record so a long-running interactive session never
/// holds the handle across operations. Write failures are logged and
/// swallowed; a broken journal must never abort a kill.
pub struct FileJournal {
    path: PathBuf,
}

impl FileJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Journal for FileJournal {
    fn record(&self, event: &str) {
        // ctime-style timestamp, e.g. "Fri Aug  7 14:03:02 2026"
        let stamp = Local::now().format("%a %b %e %H:%M:%S %Y");
        let line = format!("{} - {}\n", stamp, event);

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(err) = result {
            tracing::warn!(
                "failed to append to journal {}: {}",
                self.path.display(),
                err
            );
        }
    }
}

/// Journal that discards every event. Used when no journal path was given.
pub struct NullJournal;

impl Journal for NullJournal {
    fn record(&self, _event: &str) {}
}
