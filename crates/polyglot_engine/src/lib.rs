//! Conjugation rules, paradigms and phonology transcription for PolyGlot.
//!
//! This crate provides:
//! - [`pattern`] - Pattern validation, compilation and replacement templates
//! - [`TransformStep`] - One find/replace operation
//! - [`ConjugationRule`] - Ordered steps gated by class values and a filter pattern
//! - [`Paradigm`] - Declensions and the combinations they span
//! - [`ConjugationManager`] - Rule tables, suppression and derivation
//! - [`PhonologyGuide`] - Pronunciation and romanization with bounded recursion
//! - [`Language`] - The aggregate tying the lexicon to the engine

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod conjugation;
pub mod language;
pub mod paradigm;
pub mod pattern;
pub mod phonology;
pub mod rule;
pub mod transform;

pub use config::{DEFAULT_MAX_OUTPUT_LEN, DEFAULT_MAX_RECURSION, EngineConfig};
pub use conjugation::{ConjugationManager, Derivation, Evolution, RuleTrace, StepTrace};
pub use language::Language;
pub use paradigm::{Combination, Declension, DeclensionKind, Dimension, Paradigm};
pub use pattern::{ReplaceScope, Replacement};
pub use phonology::{
    GuideKind, PhonologyGuide, PhonologyRule, SYLLABLE_MARK, Segment, Transcription,
    TranscriptionStatus,
};
pub use rule::{ClassFilter, ConjugationRule, RuleOutcome};
pub use transform::TransformStep;

pub use polyglot_foundation::{Error, ErrorKind, Result};
