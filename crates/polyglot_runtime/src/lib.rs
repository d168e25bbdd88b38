//! Snapshot files, REPL and CLI for PolyGlot.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-eval-print loop over a [`Session`]
//! - [`Command`] - The REPL command language
//! - Language snapshots in `MessagePack`, guarded by a process-wide write lock
//! - [`demo_language`] - A small built-in language to explore

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod demo;
pub mod editor;
pub mod highlight;
pub mod repl;
pub mod serialize;
pub mod session;

pub use command::Command;
pub use demo::demo_language;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, Reply};
pub use serialize::{
    FORMAT_VERSION, WriteGuard, from_bytes, load_from_file, save_to_file, to_bytes,
    try_save_to_file, try_write_lock, write_lock,
};
pub use session::Session;

pub use polyglot_foundation::{Error, ErrorKind, Result};
