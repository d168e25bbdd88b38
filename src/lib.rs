//! PolyGlot - Conjugation rule engine and phonology pipeline for constructed languages
//!
//! This crate re-exports all layers of the PolyGlot system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: polyglot_runtime     - Snapshot files, write lock, session, REPL, CLI
//! Layer 3: polyglot_check       - Validation pass and background worker
//! Layer 2: polyglot_engine      - Patterns, rules, paradigms, derivation, phonology
//! Layer 1: polyglot_lexicon     - Words, parts of speech, classes, alphabet, etymology
//! Layer 0: polyglot_foundation  - Identifiers, combination ids, errors
//! ```

pub use polyglot_check as check;
pub use polyglot_engine as engine;
pub use polyglot_foundation as foundation;
pub use polyglot_lexicon as lexicon;
pub use polyglot_runtime as runtime;
