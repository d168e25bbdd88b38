//! Integration tests for Layer 2: Engine
//!
//! Tests for rule derivation, phonology transcription and the language aggregate.

mod derivation;
mod language;
mod phonology;
