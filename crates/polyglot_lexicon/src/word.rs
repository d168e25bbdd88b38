//! Lexicon entries.

use std::collections::BTreeMap;

use polyglot_foundation::{ClassId, CombinationId, PosId, ValueId, WordId};

/// An orthographic value plus its class-value assignments.
///
/// This is the input of rule evaluation: rules gate on the value (filter
/// regex) and on the assigned class values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordForm {
    /// The word as written in the constructed language.
    pub value: String,
    /// Assigned value for each word class.
    pub classes: BTreeMap<ClassId, ValueId>,
}

impl WordForm {
    /// Creates a form with no class assignments.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            classes: BTreeMap::new(),
        }
    }

    /// Assigns a class value (builder style).
    #[must_use]
    pub fn with_class(mut self, class: ClassId, value: ValueId) -> Self {
        self.classes.insert(class, value);
        self
    }

    /// Returns the value assigned for `class`, if any.
    #[must_use]
    pub fn class_value(&self, class: ClassId) -> Option<ValueId> {
        self.classes.get(&class).copied()
    }
}

/// A word in the lexicon.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    /// Identifier, assigned by the lexicon on insert.
    pub id: WordId,
    /// Orthographic form and class values.
    pub form: WordForm,
    /// Gloss in the local (natural) language.
    pub local: String,
    /// Free-text definition.
    pub definition: String,
    /// Part of speech, if any.
    pub pos: Option<PosId>,
    /// When set, conjugated forms come from `stored_forms` instead of rules.
    pub rules_override: bool,
    /// Hand-entered pronunciation that replaces the generated one.
    pub pronunciation_override: Option<String>,
    /// Hand-entered forms keyed by combination.
    pub stored_forms: BTreeMap<CombinationId, String>,
}

impl Word {
    /// Creates a word with the given orthographic value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            form: WordForm::new(value),
            ..Self::default()
        }
    }

    /// Sets the part of speech.
    #[must_use]
    pub fn with_pos(mut self, pos: PosId) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Assigns a class value.
    #[must_use]
    pub fn with_class(mut self, class: ClassId, value: ValueId) -> Self {
        self.form.classes.insert(class, value);
        self
    }

    /// Sets the local-language gloss.
    #[must_use]
    pub fn with_local(mut self, local: impl Into<String>) -> Self {
        self.local = local.into();
        self
    }

    /// Sets the definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Sets the pronunciation override.
    #[must_use]
    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation_override = Some(pronunciation.into());
        self
    }

    /// Stores a hand-entered form for `combination`.
    #[must_use]
    pub fn with_stored_form(mut self, combination: CombinationId, form: impl Into<String>) -> Self {
        self.stored_forms.insert(combination, form.into());
        self
    }

    /// Marks the word as overriding its conjugation rules.
    #[must_use]
    pub fn overriding_rules(mut self) -> Self {
        self.rules_override = true;
        self
    }

    /// The orthographic value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.form.value
    }

    /// The stored form for `combination`, if one was entered.
    #[must_use]
    pub fn stored_form(&self, combination: &CombinationId) -> Option<&str> {
        self.stored_forms.get(combination).map(String::as_str)
    }
}
