//! Error types for the PolyGlot engine.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::combination::CombinationId;
use crate::id::{ClassId, PosId, RuleId, ValueId, WordId};

/// The main error type for PolyGlot operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a malformed pattern error.
    #[must_use]
    pub fn malformed_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedPattern {
            pattern: pattern.into(),
            message: message.into(),
        })
    }

    /// Creates a malformed replacement error.
    #[must_use]
    pub fn malformed_replacement(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedReplacement {
            text: text.into(),
            message: message.into(),
        })
    }

    /// Creates a recursion limit error.
    #[must_use]
    pub fn recursion_limit(limit: usize) -> Self {
        Self::new(ErrorKind::RecursionLimitReached { limit })
    }

    /// Creates an etymological loop error.
    #[must_use]
    pub fn etymological_loop(parent: WordId, child: WordId) -> Self {
        Self::new(ErrorKind::EtymologicalLoop { parent, child })
    }

    /// Creates a word not found error.
    #[must_use]
    pub fn unknown_word(id: WordId) -> Self {
        Self::new(ErrorKind::UnknownWord(id))
    }

    /// Creates a part of speech not found error.
    #[must_use]
    pub fn unknown_pos(id: PosId) -> Self {
        Self::new(ErrorKind::UnknownPartOfSpeech(id))
    }

    /// Creates a rule not found error.
    #[must_use]
    pub fn unknown_rule(id: RuleId) -> Self {
        Self::new(ErrorKind::UnknownRule(id))
    }

    /// Returns true if this error comes from a user-authored pattern or replacement.
    #[must_use]
    pub fn is_pattern_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MalformedPattern { .. } | ErrorKind::MalformedReplacement { .. }
        )
    }
}

/// Categorized error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A user-authored regex failed to compile.
    #[error("malformed pattern \"{pattern}\": {message}")]
    MalformedPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },

    /// A replacement text references groups that do not exist or is badly escaped.
    #[error("malformed replacement \"{text}\": {message}")]
    MalformedReplacement {
        /// The offending replacement text.
        text: String,
        /// Description of the problem.
        message: String,
    },

    /// A bounded recursive evaluation hit its iteration limit.
    #[error("recursion limit ({limit}) reached")]
    RecursionLimitReached {
        /// The configured limit.
        limit: usize,
    },

    /// A parent/child relation would make a word its own ancestor.
    #[error("etymological loop: {parent} cannot be a parent of {child}")]
    EtymologicalLoop {
        /// The proposed parent.
        parent: WordId,
        /// The proposed child.
        child: WordId,
    },

    /// Word was not found in the lexicon.
    #[error("word not found: {0}")]
    UnknownWord(WordId),

    /// Part of speech was not found.
    #[error("part of speech not found: {0}")]
    UnknownPartOfSpeech(PosId),

    /// Word class was not found.
    #[error("word class not found: {0}")]
    UnknownWordClass(ClassId),

    /// Class value was not found within its class.
    #[error("value {value} not found in {class}")]
    UnknownClassValue {
        /// The class that was searched.
        class: ClassId,
        /// The missing value.
        value: ValueId,
    },

    /// Conjugation rule was not found.
    #[error("rule not found: {0}")]
    UnknownRule(RuleId),

    /// Combination does not exist in the paradigm of a part of speech.
    #[error("combination {combination} not found for {pos}")]
    UnknownCombination {
        /// The part of speech whose paradigm was searched.
        pos: PosId,
        /// The missing combination.
        combination: CombinationId,
    },

    /// A combination id could not be interpreted.
    #[error("invalid combination id: {0}")]
    InvalidCombination(String),

    /// The word has no part of speech, so no paradigm applies.
    #[error("{0} has no part of speech")]
    MissingPartOfSpeech(WordId),

    /// A name typed by the user matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A typed command line could not be parsed.
    #[error("{0}")]
    InvalidCommand(String),

    /// Another save is already holding the write lock.
    #[error("write lock held: {0}")]
    WriteLockHeld(String),

    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File system access failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Entity or file the error relates to.
    pub source: Option<String>,
    /// Stack of rule/step frames leading to the error.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source description.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
