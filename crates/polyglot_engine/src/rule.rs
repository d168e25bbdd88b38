//! Conjugation rules.
//!
//! A rule belongs to one part of speech and targets one combination. It is
//! gated by a class-value filter and a whole-word filter pattern, and carries
//! an ordered list of transform steps.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

use polyglot_foundation::{ClassId, CombinationId, PosId, Result, RuleId, ValueId};
use polyglot_lexicon::WordForm;
use regex::Regex;

use crate::pattern;
use crate::transform::TransformStep;

// =============================================================================
// Class Filter
// =============================================================================

/// Class-value gate of a rule.
///
/// Classes are ANDed; several accepted values for one class are ORed. An
/// empty filter accepts every word. A word with no value for a filtered
/// class is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassFilter {
    accepted: BTreeMap<ClassId, BTreeSet<ValueId>>,
}

impl ClassFilter {
    /// Creates an empty (accept-all) filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `value` for `class`.
    pub fn allow(&mut self, class: ClassId, value: ValueId) {
        self.accepted.entry(class).or_default().insert(value);
    }

    /// Stops accepting `value` for `class`; drops the class once no value is left.
    pub fn disallow(&mut self, class: ClassId, value: ValueId) {
        if let Some(values) = self.accepted.get_mut(&class) {
            values.remove(&value);
            if values.is_empty() {
                self.accepted.remove(&class);
            }
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.accepted.clear();
    }

    /// Returns true if the filter accepts every word.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Iterates over filtered classes and their accepted values.
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &BTreeSet<ValueId>)> {
        self.accepted.iter().map(|(class, values)| (*class, values))
    }

    /// Returns true if `form` passes the filter.
    #[must_use]
    pub fn matches(&self, form: &WordForm) -> bool {
        self.accepted.iter().all(|(class, values)| {
            form.class_value(*class)
                .is_some_and(|value| values.contains(&value))
        })
    }
}

// =============================================================================
// Conjugation Rule
// =============================================================================

/// Why a rule did or did not run during a derivation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule passed both filters and its steps ran.
    Applied,
    /// The word's class values are rejected by the class filter.
    SkippedClass,
    /// The word does not fully match the filter pattern.
    SkippedFilter,
    /// The filter pattern does not compile; the rule was skipped.
    MalformedFilter,
}

/// An ordered set of transform steps producing one combination.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConjugationRule {
    /// Identifier, assigned by the manager.
    pub id: RuleId,
    /// Part of speech the rule belongs to.
    pub pos: PosId,
    /// Combination the rule produces.
    pub combination: CombinationId,
    /// Application order within the combination. `None` until assigned.
    pub index: Option<u32>,
    /// Display name.
    pub name: String,
    /// Class-value gate.
    pub classes: ClassFilter,
    /// Steps applied in order.
    pub steps: Vec<TransformStep>,
    filter: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    compiled_filter: OnceLock<Result<Option<Regex>>>,
}

impl ConjugationRule {
    /// Creates an empty rule for `pos` producing `combination`.
    #[must_use]
    pub fn new(pos: PosId, combination: CombinationId) -> Self {
        Self {
            pos,
            combination,
            ..Self::default()
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the application index.
    #[must_use]
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets the whole-word filter pattern.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.set_filter(filter);
        self
    }

    /// Accepts a class value.
    #[must_use]
    pub fn with_class(mut self, class: ClassId, value: ValueId) -> Self {
        self.classes.allow(class, value);
        self
    }

    /// Appends a transform step.
    #[must_use]
    pub fn with_step(mut self, regex: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.steps.push(TransformStep::new(regex, replacement));
        self
    }

    /// The whole-word filter pattern. Empty means no filter.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Replaces the filter pattern.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.compiled_filter = OnceLock::new();
    }

    fn compiled_filter(&self) -> Result<Option<&Regex>> {
        self.compiled_filter
            .get_or_init(|| {
                if self.filter.is_empty() {
                    Ok(None)
                } else {
                    pattern::compile_full_match(&self.filter).map(Some)
                }
            })
            .as_ref()
            .map(Option::as_ref)
            .map_err(Clone::clone)
    }

    /// Returns true if `value` passes the filter pattern.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` if the filter does not compile.
    pub fn matches_filter(&self, value: &str) -> Result<bool> {
        Ok(self
            .compiled_filter()?
            .is_none_or(|regex| regex.is_match(value)))
    }

    /// Checks the filter pattern without matching anything.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` if the filter does not compile.
    pub fn validate_filter(&self) -> Result<()> {
        self.compiled_filter().map(|_| ())
    }

    /// Decides whether the rule runs for `form`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` if the filter does not compile.
    pub fn gate(&self, form: &WordForm) -> Result<RuleOutcome> {
        if !self.classes.matches(form) {
            return Ok(RuleOutcome::SkippedClass);
        }
        if self.matches_filter(&form.value)? {
            Ok(RuleOutcome::Applied)
        } else {
            Ok(RuleOutcome::SkippedFilter)
        }
    }

    /// Sort key: index, then id (insertion order) for ties.
    #[must_use]
    pub fn order_key(&self) -> (u32, RuleId) {
        (self.index.unwrap_or(u32::MAX), self.id)
    }

    /// Returns true if both rules do the same thing, ignoring id, index and
    /// combination.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.pos == other.pos
            && self.name == other.name
            && self.filter == other.filter
            && self.classes == other.classes
            && self.steps == other.steps
    }
}

impl PartialEq for ConjugationRule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.combination == other.combination
            && self.index == other.index
            && self.same_content(other)
    }
}

impl Eq for ConjugationRule {}

impl fmt::Debug for ConjugationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConjugationRule")
            .field("id", &self.id)
            .field("pos", &self.pos)
            .field("combination", &self.combination)
            .field("index", &self.index)
            .field("name", &self.name)
            .field("filter", &self.filter)
            .field("classes", &self.classes)
            .field("steps", &self.steps)
            .finish()
    }
}
