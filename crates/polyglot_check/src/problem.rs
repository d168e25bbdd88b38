//! Problem reports produced by the validation pass.

use std::cmp::Ordering;
use std::fmt;

use polyglot_engine::GuideKind;
use polyglot_foundation::{PosId, RuleId, WordId};

/// How serious a problem is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Suspicious but usable.
    Warning,
    /// Broken: something will not evaluate as authored.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Where a problem lives. Reports sort by category in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProblemCategory {
    /// A lexicon entry.
    Word,
    /// A part of speech.
    PartOfSpeech,
    /// A conjugation rule.
    Rule,
    /// A pronunciation or romanization rule.
    Phonology,
    /// The alphabet.
    Alphabet,
}

/// What went wrong.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// A pattern or replacement does not compile.
    IllegalPattern,
    /// A word is its own transitive ancestor.
    EtymologicalLoop,
    /// A word breaks a lexicon rule (mandatory field, uniqueness, pattern,
    /// alphabet, transcription coverage).
    IllegalWord,
    /// A letter is declared twice.
    DuplicateLetter,
    /// One letter is a prefix or suffix of another.
    AmbiguousLetter,
    /// Checking the entity itself failed.
    Internal,
}

/// The entity a problem points at.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
    /// A word.
    Word(WordId),
    /// A part of speech.
    PartOfSpeech(PosId),
    /// A conjugation rule.
    Rule(RuleId),
    /// Rule `index` of a phonology guide.
    PhonologyRule {
        /// Which guide.
        guide: GuideKind,
        /// Position in the guide.
        index: usize,
    },
    /// One letter, or a pair of letters.
    Letters(String, Option<String>),
}

/// One finding of the validation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    /// Where it lives.
    pub category: ProblemCategory,
    /// How serious it is.
    pub severity: Severity,
    /// What went wrong.
    pub kind: ProblemKind,
    /// The offending entity.
    pub subject: Subject,
    /// Short human-readable name of the subject.
    pub label: String,
    /// One line per issue found on the subject.
    pub details: Vec<String>,
}

impl Problem {
    /// Creates an error-severity problem with no details.
    #[must_use]
    pub fn error(category: ProblemCategory, kind: ProblemKind, subject: Subject, label: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Error,
            kind,
            subject,
            label: label.into(),
            details: Vec::new(),
        }
    }

    /// Creates a warning-severity problem with no details.
    #[must_use]
    pub fn warning(category: ProblemCategory, kind: ProblemKind, subject: Subject, label: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(category, kind, subject, label)
        }
    }

    /// Adds a detail line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Details joined into one description.
    #[must_use]
    pub fn description(&self) -> String {
        self.details.join("\n")
    }

    /// Returns true for error-severity problems.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Report order: category, then subject, then label.
    #[must_use]
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.subject.cmp(&other.subject))
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.label)?;
        for detail in &self.details {
            write!(f, "\n    {detail}")?;
        }
        Ok(())
    }
}

/// Returns true if any problem has error severity.
#[must_use]
pub fn has_errors(problems: &[Problem]) -> bool {
    problems.iter().any(Problem::is_error)
}
