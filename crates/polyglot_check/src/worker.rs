//! Background validation (fork/join).
//!
//! The check runs on its own thread over an owned snapshot of the language,
//! so the caller can keep editing while it runs. Results are handed back in
//! one piece when the handle is joined.

use std::thread::{self, JoinHandle};

use polyglot_engine::Language;
use polyglot_foundation::{Error, ErrorKind, Result};
use tracing::debug;

use crate::checker::check_all;
use crate::problem::Problem;

/// A validation pass running on a worker thread.
#[derive(Debug)]
pub struct CheckHandle {
    handle: JoinHandle<Vec<Problem>>,
}

impl CheckHandle {
    /// Returns true once the worker has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker and returns every problem it found.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the worker panicked.
    pub fn join(self) -> Result<Vec<Problem>> {
        self.handle
            .join()
            .map_err(|_| Error::new(ErrorKind::Internal("language check worker panicked".into())))
    }
}

/// Starts [`check_all`] on a snapshot of `language`.
///
/// # Errors
///
/// Returns `IoError` if the worker thread cannot be spawned.
pub fn spawn_check(language: &Language) -> Result<CheckHandle> {
    let snapshot = language.clone();
    let handle = thread::Builder::new()
        .name("polyglot-check".into())
        .spawn(move || check_all(&snapshot))
        .map_err(|e| Error::new(ErrorKind::IoError(e.to_string())))?;
    debug!(language = %language.properties.name, "language check spawned");
    Ok(CheckHandle { handle })
}
