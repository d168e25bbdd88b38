//! Language snapshots using `MessagePack`.
//!
//! A snapshot is the whole [`Language`] wrapped with a format version.
//! Compiled regex caches are not stored; they are rebuilt on first use.
//! Saving holds a process-wide write lock so two saves never interleave.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, TryLockError};

use polyglot_engine::Language;
use polyglot_foundation::{Error, ErrorKind, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Version written into every snapshot.
pub const FORMAT_VERSION: u32 = 1;

static WRITE_LOCK: Mutex<()> = Mutex::new(());

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    language: &'a Language,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    language: Language,
}

// =============================================================================
// Write lock
// =============================================================================

/// Holds the process-wide write lock until dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct WriteGuard {
    _guard: MutexGuard<'static, ()>,
}

/// Takes the write lock, waiting for any save in progress.
pub fn write_lock() -> WriteGuard {
    // A panicking save leaves nothing half-shared behind the unit value.
    let guard = WRITE_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    WriteGuard { _guard: guard }
}

/// Takes the write lock if no save is in progress.
///
/// # Errors
///
/// Returns `WriteLockHeld` if another guard is alive.
pub fn try_write_lock() -> Result<WriteGuard> {
    match WRITE_LOCK.try_lock() {
        Ok(guard) => Ok(WriteGuard { _guard: guard }),
        Err(TryLockError::Poisoned(poisoned)) => Ok(WriteGuard {
            _guard: poisoned.into_inner(),
        }),
        Err(TryLockError::WouldBlock) => Err(Error::new(ErrorKind::WriteLockHeld(
            "another save is in progress".to_string(),
        ))),
    }
}

// =============================================================================
// Bytes
// =============================================================================

/// Serializes a language to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(language: &Language) -> Result<Vec<u8>> {
    let snapshot = SnapshotRef {
        version: FORMAT_VERSION,
        language,
    };
    rmp_serde::to_vec_named(&snapshot)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a language from `MessagePack` bytes.
///
/// The engine configuration of the result is the default one.
///
/// # Errors
///
/// Returns an error if deserialization fails or the snapshot was written
/// by an unknown format version.
pub fn from_bytes(bytes: &[u8]) -> Result<Language> {
    let snapshot: Snapshot = rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))?;
    if snapshot.version != FORMAT_VERSION {
        return Err(Error::new(ErrorKind::SerializationError(format!(
            "unsupported snapshot version {} (expected {FORMAT_VERSION})",
            snapshot.version
        ))));
    }
    Ok(snapshot.language)
}

// =============================================================================
// Files
// =============================================================================

/// Saves a language to a file using `MessagePack` format.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Waits for any other save to finish first.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(language: &Language, path: P) -> Result<()> {
    let _lock = write_lock();
    save_locked(language, path.as_ref())
}

/// Saves a language unless another save is in progress.
///
/// # Errors
///
/// Returns `WriteLockHeld` if another save holds the lock, otherwise the
/// same errors as [`save_to_file`].
pub fn try_save_to_file<P: AsRef<Path>>(language: &Language, path: P) -> Result<()> {
    let _lock = try_write_lock()?;
    save_locked(language, path.as_ref())
}

fn save_locked(language: &Language, path: &Path) -> Result<()> {
    // Serialize before touching the file so a failure leaves it intact.
    let bytes = to_bytes(language)?;

    let file = File::create(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to create file '{}': {e}",
            path.display()
        )))
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to write to file '{}': {e}",
            path.display()
        )))
    })?;

    writer.flush().map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to flush file '{}': {e}",
            path.display()
        )))
    })?;

    info!(path = %path.display(), bytes = bytes.len(), words = language.lexicon.len(), "language saved");
    Ok(())
}

/// Loads a language from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Language> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to open file '{}': {e}",
            path.display()
        )))
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();

    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "snapshot read");

    let language = from_bytes(&bytes)?;
    info!(path = %path.display(), words = language.lexicon.len(), "language loaded");
    Ok(language)
}
