//! Pronunciation and romanization guides.
//!
//! A [`PhonologyGuide`] is an ordered list of (pattern, replacement) rules
//! mapping orthographic text to a pronunciation or a romanization. Two
//! evaluation modes are provided:
//!
//! - [`PhonologyGuide::transcribe`] walks the rule list over the whole text,
//!   replacing every match of each rule in turn. With `recurse` set, full
//!   passes repeat until the text stops changing or the recursion bound is
//!   hit.
//! - [`PhonologyGuide::segment`] splits a word into consecutive prefix
//!   matches, backtracking when a choice leaves an unsegmentable remainder.
//!
//! Neither mode fails on malformed rules: a rule that does not compile is
//! skipped and reported as a fault.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::OnceLock;

use polyglot_foundation::{Error, Result};
use regex::Regex;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::pattern::{self, Replacement};

/// Mark inserted at syllable breaks by [`PhonologyGuide::pronounce_segmented`].
pub const SYLLABLE_MARK: char = '˙';

// =============================================================================
// Phonology Rule
// =============================================================================

#[derive(Clone, Debug)]
struct CompiledRule {
    anywhere: Regex,
    prefix: Regex,
    replacement: Replacement,
}

/// One ordered (pattern, replacement) pair of a guide.
///
/// Compiled forms are cached per (literal, ignore-case) mode.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhonologyRule {
    pattern: String,
    replacement: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    cache: [OnceLock<Result<CompiledRule>>; 4],
}

impl PhonologyRule {
    /// Creates a rule.
    #[must_use]
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            cache: Default::default(),
        }
    }

    /// The match pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replaces the pattern and the replacement.
    pub fn set(&mut self, pattern: impl Into<String>, replacement: impl Into<String>) {
        self.pattern = pattern.into();
        self.replacement = replacement.into();
        self.cache = Default::default();
    }

    /// Returns true if the rule only applies at the start of a word.
    #[must_use]
    pub fn is_anchored(&self, literal: bool) -> bool {
        !literal && self.pattern.starts_with('^')
    }

    fn compiled(&self, literal: bool, ignore_case: bool) -> Result<&CompiledRule> {
        let slot = usize::from(literal) * 2 + usize::from(ignore_case);
        self.cache[slot]
            .get_or_init(|| {
                if literal {
                    let escaped = regex::escape(&self.pattern);
                    Ok(CompiledRule {
                        anywhere: pattern::compile_with_case(&escaped, ignore_case)?,
                        prefix: pattern::compile_prefix(&escaped, ignore_case)?,
                        replacement: Replacement::literal(&self.replacement),
                    })
                } else {
                    let anywhere = pattern::compile_with_case(&self.pattern, ignore_case)?;
                    let replacement = Replacement::parse(&self.replacement, &anywhere)?;
                    Ok(CompiledRule {
                        prefix: pattern::compile_prefix(&self.pattern, ignore_case)?,
                        anywhere,
                        replacement,
                    })
                }
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Checks that the rule compiles in the given mode.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` or `MalformedReplacement`.
    pub fn validate(&self, literal: bool, ignore_case: bool) -> Result<()> {
        self.compiled(literal, ignore_case).map(|_| ())
    }
}

impl PartialEq for PhonologyRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.replacement == other.replacement
    }
}

impl Eq for PhonologyRule {}

impl fmt::Debug for PhonologyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhonologyRule")
            .field("pattern", &self.pattern)
            .field("replacement", &self.replacement)
            .finish()
    }
}

impl fmt::Display for PhonologyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.replacement)
    }
}

// =============================================================================
// Transcription results
// =============================================================================

/// How a transcription ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TranscriptionStatus {
    /// At least one rule matched and evaluation settled.
    Complete,
    /// Some whitespace-delimited fragment matched no rule and was left
    /// unchanged, even if other fragments were transcribed.
    NoRuleMatched,
    /// Recursive passes were still changing the text when a bound was hit:
    /// either the pass count reached `limit` or a fragment outgrew the
    /// configured output length. The text is the best effort so far.
    RecursionLimitReached {
        /// The bound in effect.
        limit: usize,
    },
}

impl fmt::Display for TranscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => f.write_str("complete"),
            Self::NoRuleMatched => f.write_str("no rule matched"),
            Self::RecursionLimitReached { limit } => write!(f, "recursion limit ({limit}) reached"),
        }
    }
}

/// Output of [`PhonologyGuide::transcribe`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcription {
    /// The transcribed text.
    pub text: String,
    /// How evaluation ended.
    pub status: TranscriptionStatus,
    /// Most full passes spent on any one fragment.
    pub passes: usize,
    /// Malformed rules skipped during the call, each reported once.
    pub faults: Vec<Error>,
}

impl Transcription {
    /// Returns true if the status is [`TranscriptionStatus::Complete`].
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == TranscriptionStatus::Complete
    }

    /// Returns true if the recursion bound was hit.
    #[must_use]
    pub fn hit_limit(&self) -> bool {
        matches!(self.status, TranscriptionStatus::RecursionLimitReached { .. })
    }
}

/// One piece of a segmented word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// The characters of the word this segment covers.
    pub origin: String,
    /// Their pronunciation.
    pub pronunciation: String,
    /// Position of the rule that produced it.
    pub rule: usize,
}

// =============================================================================
// Phonology Guide
// =============================================================================

/// What a guide produces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuideKind {
    /// Phonetic transcription.
    #[default]
    Pronunciation,
    /// Latin-script romanization.
    Romanization,
}

impl fmt::Display for GuideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pronunciation => f.write_str("pronunciation"),
            Self::Romanization => f.write_str("romanization"),
        }
    }
}

/// An ordered rule list plus its evaluation settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhonologyGuide {
    /// Pronunciation or romanization.
    pub kind: GuideKind,
    /// Repeat full passes until the text settles.
    pub recurse: bool,
    /// Whether the guide is in use. Romanization is opt-in.
    pub enabled: bool,
    /// Compare patterns as plain text instead of regex.
    pub literal: bool,
    /// Match case-insensitively.
    pub ignore_case: bool,
    /// Mark syllable breaks in segmented pronunciations.
    pub syllable_composition: bool,
    syllables: BTreeSet<String>,
    rules: Vec<PhonologyRule>,
}

impl PhonologyGuide {
    /// Creates an empty guide of the given kind.
    #[must_use]
    pub fn new(kind: GuideKind) -> Self {
        Self {
            kind,
            enabled: kind == GuideKind::Pronunciation,
            ..Self::default()
        }
    }

    /// Creates an empty, enabled pronunciation guide.
    #[must_use]
    pub fn pronunciation() -> Self {
        Self::new(GuideKind::Pronunciation)
    }

    /// Creates an empty, disabled romanization guide.
    #[must_use]
    pub fn romanization() -> Self {
        Self::new(GuideKind::Romanization)
    }

    /// Appends a rule (builder style).
    #[must_use]
    pub fn with_rule(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.push(PhonologyRule::new(pattern, replacement));
        self
    }

    /// Sets the recursion flag (builder style).
    #[must_use]
    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Sets the enabled flag (builder style).
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets literal matching (builder style).
    #[must_use]
    pub fn with_literal(mut self, literal: bool) -> Self {
        self.literal = literal;
        self
    }

    /// Sets case-insensitive matching (builder style).
    #[must_use]
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Declares syllables and turns syllable composition on (builder style).
    #[must_use]
    pub fn with_syllables<I, S>(mut self, syllables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.syllables.extend(syllables.into_iter().map(Into::into));
        self.syllable_composition = true;
        self
    }

    // -------------------------------------------------------------------------
    // Rule list
    // -------------------------------------------------------------------------

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[PhonologyRule] {
        &self.rules
    }

    /// Mutable access to one rule.
    pub fn rule_mut(&mut self, index: usize) -> Option<&mut PhonologyRule> {
        self.rules.get_mut(index)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the guide has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: PhonologyRule) {
        self.rules.push(rule);
    }

    /// Inserts a rule at `index`, or at the end if `index` is past it.
    pub fn insert(&mut self, index: usize, rule: PhonologyRule) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    /// Removes the rule at `index`.
    pub fn remove(&mut self, index: usize) -> Option<PhonologyRule> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Swaps the rule at `index` with its predecessor. Returns false if it
    /// was first or out of range.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.rules.len() {
            return false;
        }
        self.rules.swap(index - 1, index);
        true
    }

    /// Swaps the rule at `index` with its successor. Returns false if it was
    /// last or out of range.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.rules.len() {
            return false;
        }
        self.rules.swap(index, index + 1);
        true
    }

    /// Declared syllables.
    pub fn syllables(&self) -> impl Iterator<Item = &str> {
        self.syllables.iter().map(String::as_str)
    }

    /// Declares a syllable.
    pub fn add_syllable(&mut self, syllable: impl Into<String>) {
        self.syllables.insert(syllable.into());
    }

    /// Forgets every declared syllable.
    pub fn clear_syllables(&mut self) {
        self.syllables.clear();
    }

    /// Checks one rule in the guide's current mode.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` or `MalformedReplacement`.
    pub fn validate_rule(&self, rule: &PhonologyRule) -> Result<()> {
        rule.validate(self.literal, self.ignore_case)
    }

    // -------------------------------------------------------------------------
    // Transcription
    // -------------------------------------------------------------------------

    /// Transcribes `text` with the default bounds.
    #[must_use]
    pub fn transcribe(&self, text: &str) -> Transcription {
        self.transcribe_with_config(text, &EngineConfig::default())
    }

    /// Transcribes `text`, running at most `max_recursion` full passes per
    /// whitespace-delimited fragment when `recurse` is set.
    #[must_use]
    pub fn transcribe_with_limit(&self, text: &str, max_recursion: usize) -> Transcription {
        self.transcribe_with_config(text, &EngineConfig::default().with_max_recursion(max_recursion))
    }

    /// Transcribes `text` under the pass and output bounds of `config`.
    #[must_use]
    pub fn transcribe_with_config(&self, text: &str, config: &EngineConfig) -> Transcription {
        let mut faults = Vec::new();
        let mut fragments = Vec::new();
        let mut passes = 0;
        let mut unmatched = false;
        let mut limited = false;

        for fragment in text.split_whitespace() {
            let outcome = self.transcribe_fragment(fragment, config, &mut faults);
            passes = passes.max(outcome.passes);
            unmatched |= !outcome.matched;
            limited |= outcome.limited;
            fragments.push(outcome.text);
        }

        let limit = config.max_recursion;
        let status = if limited {
            warn!(
                kind = %self.kind,
                limit,
                max_output_len = config.max_output_len,
                "recursion limit reached"
            );
            TranscriptionStatus::RecursionLimitReached { limit }
        } else if unmatched {
            TranscriptionStatus::NoRuleMatched
        } else {
            TranscriptionStatus::Complete
        };

        Transcription {
            text: fragments.join(" "),
            status,
            passes,
            faults,
        }
    }

    fn transcribe_fragment(
        &self,
        fragment: &str,
        config: &EngineConfig,
        faults: &mut Vec<Error>,
    ) -> FragmentOutcome {
        let mut text = fragment.to_string();
        let mut passes = 0;
        let mut matched = false;

        loop {
            passes += 1;
            let input = text.clone();
            for rule in &self.rules {
                if rule.pattern.is_empty() {
                    continue;
                }
                let compiled = match rule.compiled(self.literal, self.ignore_case) {
                    Ok(compiled) => compiled,
                    Err(error) => {
                        self.record_fault(faults, rule, error);
                        continue;
                    }
                };
                if compiled.anywhere.is_match(&text) {
                    matched = true;
                    text = compiled
                        .anywhere
                        .replace_all(&text, &compiled.replacement)
                        .into_owned();
                    if self.recurse && text.len() > config.max_output_len {
                        return FragmentOutcome { text, passes, matched, limited: true };
                    }
                }
            }

            if !self.recurse || text == input {
                return FragmentOutcome { text, passes, matched, limited: false };
            }
            if passes >= config.max_recursion {
                return FragmentOutcome { text, passes, matched, limited: true };
            }
        }
    }

    fn record_fault(&self, faults: &mut Vec<Error>, rule: &PhonologyRule, error: Error) {
        if !faults.contains(&error) {
            debug!(kind = %self.kind, %rule, %error, "malformed phonology rule skipped");
            faults.push(error);
        }
    }

    // -------------------------------------------------------------------------
    // Segmentation
    // -------------------------------------------------------------------------

    /// Splits `word` into consecutive rule matches.
    ///
    /// At each position rules are tried in order; a rule is taken if it
    /// matches a non-empty prefix of the remainder and the rest of the word
    /// can be segmented too. Anchored (`^`) rules only apply at the start.
    /// Returns `None` if the word cannot be fully segmented.
    #[must_use]
    pub fn segment(&self, word: &str) -> Option<Vec<Segment>> {
        if word.is_empty() || self.rules.is_empty() {
            return Some(Vec::new());
        }
        let mut dead_ends = HashSet::new();
        let mut faults = Vec::new();
        let segments = self.segment_from(word, 0, &mut dead_ends, &mut faults);
        segments.map(|mut reversed| {
            reversed.reverse();
            reversed
        })
    }

    /// Segments built back to front, so recursion can push onto the tail.
    fn segment_from(
        &self,
        word: &str,
        at: usize,
        dead_ends: &mut HashSet<usize>,
        faults: &mut Vec<Error>,
    ) -> Option<Vec<Segment>> {
        if at == word.len() {
            return Some(Vec::new());
        }
        if dead_ends.contains(&at) {
            return None;
        }

        let rest = &word[at..];
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.pattern.is_empty() || (at > 0 && rule.is_anchored(self.literal)) {
                continue;
            }
            let compiled = match rule.compiled(self.literal, self.ignore_case) {
                Ok(compiled) => compiled,
                Err(error) => {
                    self.record_fault(faults, rule, error);
                    continue;
                }
            };
            let Some(found) = compiled.prefix.find(rest) else {
                continue;
            };
            if found.end() == 0 {
                continue;
            }

            if let Some(mut segments) = self.segment_from(word, at + found.end(), dead_ends, faults) {
                let origin = found.as_str();
                segments.push(Segment {
                    origin: origin.to_string(),
                    pronunciation: compiled
                        .anywhere
                        .replace_all(origin, &compiled.replacement)
                        .into_owned(),
                    rule: index,
                });
                return Some(segments);
            }
        }

        dead_ends.insert(at);
        None
    }

    /// Pronounces `text` by segmentation, marking syllable breaks when
    /// syllable composition is on. Returns `None` if any word cannot be
    /// segmented.
    #[must_use]
    pub fn pronounce_segmented(&self, text: &str) -> Option<String> {
        let mut words = Vec::new();
        for word in text.split_whitespace() {
            let breaks = if self.syllable_composition {
                self.syllable_breaks(word)
            } else {
                Vec::new()
            };

            let mut out = String::new();
            let mut offset = 0;
            for segment in self.segment(word)? {
                out.push_str(&segment.pronunciation);
                offset += segment.origin.len();
                if breaks.contains(&offset) {
                    out.push(SYLLABLE_MARK);
                }
            }
            words.push(out);
        }
        Some(words.join(" "))
    }

    /// Byte offsets inside `word` where one declared syllable ends and
    /// another begins. Empty if the word is not a sequence of syllables.
    #[must_use]
    pub fn syllable_breaks(&self, word: &str) -> Vec<usize> {
        self.breaks_from(word, 0).unwrap_or_default()
    }

    fn breaks_from(&self, word: &str, at: usize) -> Option<Vec<usize>> {
        let rest = &word[at..];
        let ends = rest
            .char_indices()
            .map(|(i, c)| i + c.len_utf8());
        for end in ends {
            if !self.syllables.contains(&rest[..end]) {
                continue;
            }
            if end == rest.len() {
                return Some(Vec::new());
            }
            if let Some(mut later) = self.breaks_from(word, at + end) {
                later.insert(0, at + end);
                return Some(later);
            }
        }
        None
    }
}

struct FragmentOutcome {
    text: String,
    passes: usize,
    matched: bool,
    limited: bool,
}
