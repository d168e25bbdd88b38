//! Etymology graph with bidirectional indices.
//!
//! Edges run from parent (root) to child (derived word). A word must never
//! appear in its own lineage: [`EtymologyGraph::add_relation`] refuses edges
//! that would close a cycle, and [`EtymologyGraph::words_in_loops`] finds
//! cycles that entered through [`EtymologyGraph::add_relation_unchecked`]
//! (hand-edited or legacy data).

use std::collections::BTreeSet;

use im::{OrdMap, OrdSet};
use polyglot_foundation::{Error, Result, WordId};
use tracing::debug;

/// Parent/child relations between words.
///
/// Maintains bidirectional indices:
/// - Forward: parent -> children
/// - Reverse: child -> parents
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EtymologyGraph {
    children: OrdMap<WordId, OrdSet<WordId>>,
    parents: OrdMap<WordId, OrdSet<WordId>>,
}

impl EtymologyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parent -> child relation.
    ///
    /// Adding an existing relation is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `EtymologicalLoop` if the relation would make a word its own
    /// ancestor (including `parent == child`).
    pub fn add_relation(&mut self, parent: WordId, child: WordId) -> Result<()> {
        if self.creates_loop(parent, child) {
            debug!(%parent, %child, "refusing etymological loop");
            return Err(Error::etymological_loop(parent, child));
        }
        self.add_relation_unchecked(parent, child);
        Ok(())
    }

    /// Adds a relation without loop checking.
    pub fn add_relation_unchecked(&mut self, parent: WordId, child: WordId) {
        self.children.entry(parent).or_default().insert(child);
        self.parents.entry(child).or_default().insert(parent);
    }

    /// Removes a parent -> child relation. Returns true if it existed.
    pub fn remove_relation(&mut self, parent: WordId, child: WordId) -> bool {
        let removed = self
            .children
            .get_mut(&parent)
            .is_some_and(|set| set.remove(&child).is_some());
        if let Some(set) = self.parents.get_mut(&child) {
            set.remove(&parent);
        }
        self.prune(parent);
        self.prune(child);
        removed
    }

    /// Removes every relation involving `word`.
    pub fn remove_word(&mut self, word: WordId) {
        for child in self.children(word) {
            self.remove_relation(word, child);
        }
        for parent in self.parents(word) {
            self.remove_relation(parent, word);
        }
    }

    fn prune(&mut self, word: WordId) {
        if self.children.get(&word).is_some_and(OrdSet::is_empty) {
            self.children.remove(&word);
        }
        if self.parents.get(&word).is_some_and(OrdSet::is_empty) {
            self.parents.remove(&word);
        }
    }

    /// Direct children of `word`, in id order.
    #[must_use]
    pub fn children(&self, word: WordId) -> Vec<WordId> {
        self.children
            .get(&word)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Direct parents of `word`, in id order.
    #[must_use]
    pub fn parents(&self, word: WordId) -> Vec<WordId> {
        self.parents
            .get(&word)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns true if `descendant` is reachable from `ancestor` through
    /// one or more parent -> child edges.
    #[must_use]
    pub fn is_descendant(&self, ancestor: WordId, descendant: WordId) -> bool {
        let mut visited = BTreeSet::new();
        let mut stack = self.children(ancestor);
        while let Some(current) = stack.pop() {
            if current == descendant {
                return true;
            }
            if visited.insert(current) {
                stack.extend(self.children(current));
            }
        }
        false
    }

    /// Returns true if adding `parent -> child` would create a loop.
    #[must_use]
    pub fn creates_loop(&self, parent: WordId, child: WordId) -> bool {
        parent == child || self.is_descendant(child, parent)
    }

    /// Every word that is its own transitive ancestor, in id order.
    #[must_use]
    pub fn words_in_loops(&self) -> Vec<WordId> {
        self.children
            .keys()
            .copied()
            .filter(|&word| self.is_descendant(word, word))
            .collect()
    }

    /// Words that have at least one child.
    pub fn roots(&self) -> impl Iterator<Item = WordId> + '_ {
        self.children.keys().copied()
    }

    /// Number of parent -> child edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.children.values().map(OrdSet::len).sum()
    }
}
