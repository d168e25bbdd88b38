//! Parts of speech.

use im::OrdMap;
use polyglot_foundation::{Error, PosId, Result};

/// A part of speech (noun, verb, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartOfSpeech {
    /// Identifier, assigned on insert.
    pub id: PosId,
    /// Display name.
    pub name: String,
    /// Short gloss shown next to words.
    pub gloss: String,
    /// Regex every word of this part of speech must fully match. Empty means none.
    pub pattern: String,
    /// Words of this part of speech must have a pronunciation.
    pub pronunciation_mandatory: bool,
    /// Words of this part of speech must have a definition.
    pub definition_mandatory: bool,
}

impl PartOfSpeech {
    /// Creates a part of speech with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the enforced word pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sets the gloss.
    #[must_use]
    pub fn with_gloss(mut self, gloss: impl Into<String>) -> Self {
        self.gloss = gloss.into();
        self
    }

    /// Makes pronunciations mandatory.
    #[must_use]
    pub fn pronunciation_required(mut self) -> Self {
        self.pronunciation_mandatory = true;
        self
    }

    /// Makes definitions mandatory.
    #[must_use]
    pub fn definition_required(mut self) -> Self {
        self.definition_mandatory = true;
        self
    }
}

/// All parts of speech of a language, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PosCollection {
    entries: OrdMap<PosId, PartOfSpeech>,
    next_id: u32,
}

impl PosCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a part of speech, assigning it a fresh id.
    pub fn insert(&mut self, mut pos: PartOfSpeech) -> PosId {
        self.next_id += 1;
        let id = PosId(self.next_id);
        pos.id = id;
        self.entries.insert(id, pos);
        id
    }

    /// Gets a part of speech by id.
    #[must_use]
    pub fn get(&self, id: PosId) -> Option<&PartOfSpeech> {
        self.entries.get(&id)
    }

    /// Gets a part of speech by id, or an error naming the id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPartOfSpeech` if no such part of speech exists.
    pub fn require(&self, id: PosId) -> Result<&PartOfSpeech> {
        self.get(id).ok_or_else(|| Error::unknown_pos(id))
    }

    /// Gets a mutable reference to a part of speech.
    pub fn get_mut(&mut self, id: PosId) -> Option<&mut PartOfSpeech> {
        self.entries.get_mut(&id)
    }

    /// Finds a part of speech by name (exact match).
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&PartOfSpeech> {
        self.entries.values().find(|pos| pos.name == name)
    }

    /// Removes a part of speech.
    pub fn remove(&mut self, id: PosId) -> Option<PartOfSpeech> {
        self.entries.remove(&id)
    }

    /// Iterates over parts of speech in id order.
    pub fn iter(&self) -> impl Iterator<Item = &PartOfSpeech> {
        self.entries.values()
    }

    /// Number of parts of speech.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parts of speech.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
