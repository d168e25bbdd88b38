//! Word storage.
//!
//! Uses a persistent map so that cloning a lexicon (for a background check
//! or an undo snapshot) is O(1) and shares structure with the original.

use std::collections::BTreeMap;

use im::OrdMap;
use polyglot_foundation::{Error, PosId, Result, WordId};

use crate::alphabet::Alphabet;
use crate::word::Word;

/// All words of a language, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lexicon {
    words: OrdMap<WordId, Word>,
    next_id: u32,
}

impl Lexicon {
    /// Creates an empty lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word, assigning it a fresh id.
    pub fn insert(&mut self, mut word: Word) -> WordId {
        self.next_id += 1;
        let id = WordId(self.next_id);
        word.id = id;
        self.words.insert(id, word);
        id
    }

    /// Replaces an existing word, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord` if no word has this id.
    pub fn update(&mut self, id: WordId, mut word: Word) -> Result<()> {
        if !self.words.contains_key(&id) {
            return Err(Error::unknown_word(id));
        }
        word.id = id;
        self.words.insert(id, word);
        Ok(())
    }

    /// Gets a word by id.
    #[must_use]
    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.get(&id)
    }

    /// Gets a word by id, or an error naming the id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord` if no word has this id.
    pub fn require(&self, id: WordId) -> Result<&Word> {
        self.get(id).ok_or_else(|| Error::unknown_word(id))
    }

    /// Gets a mutable reference to a word.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord` if no word has this id.
    pub fn get_mut(&mut self, id: WordId) -> Result<&mut Word> {
        self.words.get_mut(&id).ok_or_else(|| Error::unknown_word(id))
    }

    /// Removes a word.
    pub fn remove(&mut self, id: WordId) -> Option<Word> {
        self.words.remove(&id)
    }

    /// Returns true if a word with this id exists.
    #[must_use]
    pub fn contains(&self, id: WordId) -> bool {
        self.words.contains_key(&id)
    }

    /// Iterates over words in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    /// Words whose value equals `value`.
    pub fn find_by_value<'a>(&'a self, value: &'a str) -> impl Iterator<Item = &'a Word> + 'a {
        self.words.values().filter(move |w| w.value() == value)
    }

    /// Words belonging to `pos`.
    pub fn words_of_pos(&self, pos: PosId) -> impl Iterator<Item = &Word> {
        self.words.values().filter(move |w| w.pos == Some(pos))
    }

    /// Words sorted by the alphabet's letter order, then by id.
    #[must_use]
    pub fn sorted(&self, alphabet: &Alphabet) -> Vec<&Word> {
        let mut words: Vec<&Word> = self.words.values().collect();
        words.sort_by_cached_key(|w| (alphabet.collation_key(w.value()), w.id));
        words
    }

    /// How many words carry each orthographic value.
    #[must_use]
    pub fn value_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for word in self.words.values() {
            *counts.entry(word.value()).or_insert(0) += 1;
        }
        counts
    }

    /// How many words carry each non-empty local gloss.
    #[must_use]
    pub fn local_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for word in self.words.values().filter(|w| !w.local.is_empty()) {
            *counts.entry(word.local.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the lexicon has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut lexicon = Lexicon::new();
        let id = lexicon.insert(Word::new("bus"));
        assert_eq!(lexicon.get(id).unwrap().id, id);
        assert!(lexicon.contains(id));
        assert_eq!(lexicon.remove(id).unwrap().value(), "bus");
        assert!(lexicon.require(id).is_err());
    }

    #[test]
    fn update_keeps_id() {
        let mut lexicon = Lexicon::new();
        let id = lexicon.insert(Word::new("a"));
        lexicon.update(id, Word::new("b")).unwrap();
        assert_eq!(lexicon.get(id).unwrap().value(), "b");
        assert_eq!(lexicon.get(id).unwrap().id, id);
        assert!(lexicon.update(WordId(99), Word::new("c")).is_err());
    }

    #[test]
    fn clone_is_independent() {
        let mut lexicon = Lexicon::new();
        let id = lexicon.insert(Word::new("a"));
        let snapshot = lexicon.clone();
        lexicon.get_mut(id).unwrap().form.value = "changed".into();
        assert_eq!(snapshot.get(id).unwrap().value(), "a");
    }

    #[test]
    fn counts() {
        let mut lexicon = Lexicon::new();
        lexicon.insert(Word::new("ka").with_local("dog"));
        lexicon.insert(Word::new("ka").with_local("cat"));
        lexicon.insert(Word::new("to"));

        let values = lexicon.value_counts();
        assert_eq!(values.get("ka"), Some(&2));
        assert_eq!(values.get("to"), Some(&1));
        let locals = lexicon.local_counts();
        assert_eq!(locals.len(), 2);
        assert_eq!(lexicon.find_by_value("ka").count(), 2);
    }

    #[test]
    fn sorted_uses_alphabet() {
        let mut lexicon = Lexicon::new();
        lexicon.insert(Word::new("ab"));
        lexicon.insert(Word::new("ba"));
        let alphabet = Alphabet::parse("ba");
        let sorted: Vec<_> = lexicon.sorted(&alphabet).iter().map(|w| w.value()).collect();
        assert_eq!(sorted, vec!["ba", "ab"]);
    }
}
