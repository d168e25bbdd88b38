//! Transform steps: one find/replace each.

use std::fmt;
use std::sync::OnceLock;

use polyglot_foundation::Result;
use regex::Regex;

use crate::pattern::{self, ReplaceScope, Replacement};

#[derive(Clone, Debug)]
struct CompiledStep {
    regex: Regex,
    replacement: Replacement,
}

/// A single regex substitution.
///
/// The pattern and replacement are compiled on first use and cached until
/// either is changed.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformStep {
    regex: String,
    replacement: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    compiled: OnceLock<Result<CompiledStep>>,
}

impl TransformStep {
    /// Creates a step replacing matches of `regex` with `replacement`.
    #[must_use]
    pub fn new(regex: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            replacement: replacement.into(),
            compiled: OnceLock::new(),
        }
    }

    /// The match pattern.
    #[must_use]
    pub fn regex(&self) -> &str {
        &self.regex
    }

    /// The replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replaces both the pattern and the replacement text.
    pub fn set(&mut self, regex: impl Into<String>, replacement: impl Into<String>) {
        self.regex = regex.into();
        self.replacement = replacement.into();
        self.compiled = OnceLock::new();
    }

    fn compiled(&self) -> Result<&CompiledStep> {
        self.compiled
            .get_or_init(|| {
                let regex = pattern::compile(&self.regex)?;
                let replacement = Replacement::parse(&self.replacement, &regex)?;
                Ok(CompiledStep { regex, replacement })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Checks that the pattern and replacement are well formed.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` or `MalformedReplacement`.
    pub fn validate(&self) -> Result<()> {
        self.compiled().map(|_| ())
    }

    /// Replaces every match in `input`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` or `MalformedReplacement`; the caller keeps
    /// `input` unchanged.
    pub fn apply(&self, input: &str) -> Result<String> {
        let step = self.compiled()?;
        Ok(step.regex.replace_all(input, &step.replacement).into_owned())
    }

    /// Replaces the matches in `input` selected by `scope`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` or `MalformedReplacement`.
    pub fn apply_scoped(&self, input: &str, scope: ReplaceScope) -> Result<String> {
        let step = self.compiled()?;
        Ok(pattern::replace_scoped(
            &step.regex,
            &step.replacement,
            input,
            scope,
        ))
    }
}

impl PartialEq for TransformStep {
    fn eq(&self, other: &Self) -> bool {
        self.regex == other.regex && self.replacement == other.replacement
    }
}

impl Eq for TransformStep {}

impl fmt::Debug for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformStep")
            .field("regex", &self.regex)
            .field("replacement", &self.replacement)
            .finish()
    }
}

impl fmt::Display for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.regex, self.replacement)
    }
}
