//! Word classes.
//!
//! A word class is a user-defined grammatical category (gender, animacy,
//! transitivity, ...) with an ordered list of values. Conjugation rules gate
//! on the value a word is assigned for each class.

use std::collections::BTreeSet;

use im::OrdMap;
use polyglot_foundation::{ClassId, Error, ErrorKind, PosId, Result, ValueId};

/// One value of a word class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassValue {
    /// Identifier, unique within its class.
    pub id: ValueId,
    /// Display name.
    pub name: String,
}

/// A grammatical category with ordered values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordClass {
    /// Identifier, assigned on insert.
    pub id: ClassId,
    /// Display name.
    pub name: String,
    /// Values in display order.
    pub values: Vec<ClassValue>,
    /// Parts of speech this class applies to. Empty means all.
    pub applies_to: BTreeSet<PosId>,
}

impl WordClass {
    /// Creates a class with no values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Restricts the class to a part of speech.
    #[must_use]
    pub fn for_pos(mut self, pos: PosId) -> Self {
        self.applies_to.insert(pos);
        self
    }

    /// Appends a value, returning its id.
    pub fn add_value(&mut self, name: impl Into<String>) -> ValueId {
        let next = self.values.iter().map(|v| v.id.raw()).max().unwrap_or(0) + 1;
        let id = ValueId(next);
        self.values.push(ClassValue {
            id,
            name: name.into(),
        });
        id
    }

    /// Looks up a value by id.
    #[must_use]
    pub fn value(&self, id: ValueId) -> Option<&ClassValue> {
        self.values.iter().find(|v| v.id == id)
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn value_by_name(&self, name: &str) -> Option<&ClassValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Removes a value.
    ///
    /// # Errors
    ///
    /// Returns `UnknownClassValue` if the class has no such value.
    pub fn remove_value(&mut self, id: ValueId) -> Result<ClassValue> {
        let index = self
            .values
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| {
                Error::new(ErrorKind::UnknownClassValue {
                    class: self.id,
                    value: id,
                })
            })?;
        Ok(self.values.remove(index))
    }

    /// Returns true if the class applies to words of `pos`.
    #[must_use]
    pub fn applies_to_pos(&self, pos: PosId) -> bool {
        self.applies_to.is_empty() || self.applies_to.contains(&pos)
    }
}

/// All word classes of a language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassCollection {
    entries: OrdMap<ClassId, WordClass>,
    next_id: u32,
}

impl ClassCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a class, assigning it a fresh id.
    pub fn insert(&mut self, mut class: WordClass) -> ClassId {
        self.next_id += 1;
        let id = ClassId(self.next_id);
        class.id = id;
        self.entries.insert(id, class);
        id
    }

    /// Gets a class by id.
    #[must_use]
    pub fn get(&self, id: ClassId) -> Option<&WordClass> {
        self.entries.get(&id)
    }

    /// Gets a mutable reference to a class.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWordClass` if no such class exists.
    pub fn get_mut(&mut self, id: ClassId) -> Result<&mut WordClass> {
        self.entries
            .get_mut(&id)
            .ok_or_else(|| Error::new(ErrorKind::UnknownWordClass(id)))
    }

    /// Removes a class.
    pub fn remove(&mut self, id: ClassId) -> Option<WordClass> {
        self.entries.remove(&id)
    }

    /// Iterates over classes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &WordClass> {
        self.entries.values()
    }

    /// Classes that apply to `pos`.
    pub fn classes_for_pos(&self, pos: PosId) -> impl Iterator<Item = &WordClass> {
        self.entries.values().filter(move |c| c.applies_to_pos(pos))
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
