//! Per-language settings.

/// Settings that change how a language's words are validated and transcribed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageProperties {
    /// Language name.
    pub name: String,
    /// Compare letters and phonology patterns case-insensitively.
    pub ignore_case: bool,
    /// Treat pronunciation patterns as literal prefixes instead of regex.
    pub disable_proc_regex: bool,
    /// Every word value must be unique.
    pub word_uniqueness: bool,
    /// Every non-empty local gloss must be unique.
    pub local_uniqueness: bool,
    /// Every word must have a part of speech.
    pub types_mandatory: bool,
    /// Every word must have a local gloss.
    pub local_mandatory: bool,
}

impl LanguageProperties {
    /// Creates properties for a named language with every switch off.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
