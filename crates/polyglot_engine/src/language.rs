//! The language aggregate.
//!
//! [`Language`] ties the lexicon tables to the rule engine. Cloning is cheap:
//! the word, rule and etymology tables are persistent maps, so a background
//! worker can take an owned snapshot.

use polyglot_foundation::{CombinationId, Error, ErrorKind, PosId, Result, WordId};
use polyglot_lexicon::{
    Alphabet, ClassCollection, EtymologyGraph, LanguageProperties, Lexicon, PosCollection, Word,
};
use tracing::debug;

use crate::config::EngineConfig;
use crate::conjugation::{ConjugationManager, Derivation, Evolution};
use crate::paradigm::Combination;
use crate::pattern::ReplaceScope;
use crate::phonology::{PhonologyGuide, Transcription, TranscriptionStatus};
use crate::transform::TransformStep;

/// Everything that defines one constructed language.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Language {
    /// Per-language settings.
    pub properties: LanguageProperties,
    /// Words.
    pub lexicon: Lexicon,
    /// Parts of speech.
    pub parts_of_speech: PosCollection,
    /// Word classes and their values.
    pub classes: ClassCollection,
    /// Declared letters.
    pub alphabet: Alphabet,
    /// Parent/child relations between words.
    pub etymology: EtymologyGraph,
    /// Rules, paradigms and suppression flags.
    pub conjugations: ConjugationManager,
    /// Pronunciation guide.
    pub pronunciation: PhonologyGuide,
    /// Romanization guide.
    pub romanization: PhonologyGuide,
    /// Evaluation settings. Not part of saved snapshots.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub config: EngineConfig,
}

impl Default for Language {
    fn default() -> Self {
        Self::new("")
    }
}

impl Language {
    /// Creates an empty language.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            properties: LanguageProperties::new(name),
            lexicon: Lexicon::new(),
            parts_of_speech: PosCollection::new(),
            classes: ClassCollection::new(),
            alphabet: Alphabet::default(),
            etymology: EtymologyGraph::new(),
            conjugations: ConjugationManager::new(),
            pronunciation: PhonologyGuide::pronunciation(),
            romanization: PhonologyGuide::romanization(),
            config: EngineConfig::default(),
        }
    }

    /// Builder method to set the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the properties and carries the matching switches into both
    /// phonology guides.
    pub fn set_properties(&mut self, properties: LanguageProperties) {
        for guide in [&mut self.pronunciation, &mut self.romanization] {
            guide.ignore_case = properties.ignore_case;
            guide.literal = properties.disable_proc_regex;
        }
        self.properties = properties;
    }

    // -------------------------------------------------------------------------
    // Words
    // -------------------------------------------------------------------------

    /// Adds a word.
    pub fn add_word(&mut self, word: Word) -> WordId {
        self.lexicon.insert(word)
    }

    /// Removes a word together with its etymology relations.
    pub fn remove_word(&mut self, id: WordId) -> Option<Word> {
        self.etymology.remove_word(id);
        self.lexicon.remove(id)
    }

    /// Gets a word.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord` if no word has this id.
    pub fn word(&self, id: WordId) -> Result<&Word> {
        self.lexicon.require(id)
    }

    /// Records that `parent` is an etymological parent of `child`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord` if either word is missing, or `EtymologicalLoop`
    /// if `child` is already an ancestor of `parent`.
    pub fn add_etymology(&mut self, parent: WordId, child: WordId) -> Result<()> {
        self.word(parent)?;
        self.word(child)?;
        self.etymology.add_relation(parent, child)
    }

    fn pos_of(word: &Word) -> Result<PosId> {
        word.pos
            .ok_or_else(|| Error::new(ErrorKind::MissingPartOfSpeech(word.id)))
    }

    // -------------------------------------------------------------------------
    // Conjugation
    // -------------------------------------------------------------------------

    /// Derives one combination of a word.
    ///
    /// A word with `rules_override` set returns its stored form (empty if
    /// none was entered) with `applied == false`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord` or `MissingPartOfSpeech`.
    pub fn conjugate(&self, id: WordId, combination: &CombinationId) -> Result<Derivation> {
        let word = self.word(id)?;
        if word.rules_override {
            return Ok(Derivation::unchanged(
                word.stored_form(combination).unwrap_or_default(),
            ));
        }
        let pos = Self::pos_of(word)?;
        Ok(self
            .conjugations
            .derive_form_with(&word.form, pos, combination, &self.config))
    }

    /// Derives every combination of a word's paradigm.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord` or `MissingPartOfSpeech`.
    pub fn decline_all(&self, id: WordId) -> Result<Vec<(Combination, Derivation)>> {
        let word = self.word(id)?;
        let pos = Self::pos_of(word)?;
        self.conjugations
            .combinations(pos)
            .into_iter()
            .map(|combination| {
                let derivation = self.conjugate(id, &combination.id)?;
                Ok((combination, derivation))
            })
            .collect()
    }

    /// Stored forms of a word whose combination left its paradigm.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord`.
    pub fn deprecated_forms(&self, id: WordId) -> Result<Vec<(CombinationId, String)>> {
        let word = self.word(id)?;
        Ok(self
            .conjugations
            .deprecated_forms(word)
            .into_iter()
            .map(|(combination, form)| (combination.clone(), form.to_string()))
            .collect())
    }

    /// Runs a find/replace over every stored form of a word, rewriting only
    /// the matches `scope` selects. A form that would become blank keeps its
    /// old value and is reported with an error.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord`, `MalformedPattern` or `MalformedReplacement`;
    /// nothing is changed in that case.
    pub fn evolve_stored_forms(
        &mut self,
        id: WordId,
        regex: &str,
        replacement: &str,
        scope: ReplaceScope,
    ) -> Result<Vec<Evolution>> {
        let step = TransformStep::new(regex, replacement);
        step.validate()?;

        let word = self.lexicon.get_mut(id)?;
        let mut evolutions = Vec::new();
        for (combination, form) in &mut word.stored_forms {
            let evolved = step.apply_scoped(form, scope)?;
            if evolved == *form {
                continue;
            }
            if evolved.trim().is_empty() {
                evolutions.push(Evolution {
                    subject: combination.to_string(),
                    before: form.clone(),
                    after: evolved,
                    error: Some("form blanked (value reverted to original)".into()),
                });
            } else {
                evolutions.push(Evolution {
                    subject: combination.to_string(),
                    before: std::mem::replace(form, evolved.clone()),
                    after: evolved,
                    error: None,
                });
            }
        }
        debug!(word = %id, changes = evolutions.len(), "stored forms evolved");
        Ok(evolutions)
    }

    // -------------------------------------------------------------------------
    // Phonology
    // -------------------------------------------------------------------------

    /// Pronunciation of a word, honouring its hand-entered override.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord`.
    pub fn pronounce(&self, id: WordId) -> Result<Transcription> {
        let word = self.word(id)?;
        if let Some(text) = &word.pronunciation_override {
            return Ok(Transcription {
                text: text.clone(),
                status: TranscriptionStatus::Complete,
                passes: 0,
                faults: Vec::new(),
            });
        }
        Ok(self.pronounce_text(word.value()))
    }

    /// Pronunciation of arbitrary text.
    #[must_use]
    pub fn pronounce_text(&self, text: &str) -> Transcription {
        self.pronunciation
            .transcribe_with_config(text, &self.config)
    }

    /// Romanization of a word, or `None` when romanization is disabled.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord`.
    pub fn romanize(&self, id: WordId) -> Result<Option<Transcription>> {
        let word = self.word(id)?;
        Ok(self.romanize_text(word.value()))
    }

    /// Romanization of arbitrary text, or `None` when romanization is disabled.
    #[must_use]
    pub fn romanize_text(&self, text: &str) -> Option<Transcription> {
        self.romanization
            .enabled
            .then(|| self.romanization.transcribe_with_config(text, &self.config))
    }
}
