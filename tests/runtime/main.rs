//! Integration tests for Layer 4: Runtime
//!
//! Tests for snapshot files and scripted REPL sessions.

mod repl;
mod snapshots;

use std::path::PathBuf;

/// A per-process scratch path, so parallel test runs do not collide.
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("polyglot_it_{name}_{}.pgs", std::process::id()))
}
