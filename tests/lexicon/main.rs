//! Integration tests for Layer 1: Lexicon
//!
//! Tests for words, alphabet collation and the etymology graph.

mod alphabet;
mod etymology;
mod words;
