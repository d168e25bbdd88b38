//! Words, parts of speech, word classes, alphabet and etymology for PolyGlot.
//!
//! This crate provides:
//! - [`Word`] / [`WordForm`] - Lexicon entries and their class-value assignments
//! - [`Lexicon`] - Persistent word storage with structural sharing
//! - [`PartOfSpeech`] / [`PosCollection`] - Parts of speech and enforced word patterns
//! - [`WordClass`] / [`ClassCollection`] - User-defined grammatical categories
//! - [`Alphabet`] - Declared letters and membership tests
//! - [`EtymologyGraph`] - Bidirectional parent/child indices with loop detection
//! - [`LanguageProperties`] - Per-language settings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod alphabet;
pub mod class;
pub mod etymology;
pub mod lexicon;
pub mod pos;
pub mod properties;
pub mod word;

pub use alphabet::{Alphabet, Ambiguity, AmbiguityKind};
pub use class::{ClassCollection, ClassValue, WordClass};
pub use etymology::EtymologyGraph;
pub use lexicon::Lexicon;
pub use pos::{PartOfSpeech, PosCollection};
pub use properties::LanguageProperties;
pub use word::{Word, WordForm};

pub use polyglot_foundation::{Error, ErrorKind, Result};
