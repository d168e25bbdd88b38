//! Session state for the REPL.
//!
//! The session holds the language being explored, the file it came from and
//! the problems found by the last validation pass.

use std::path::{Path, PathBuf};

use polyglot_check::{Problem, spawn_check};
use polyglot_engine::{EngineConfig, Language};
use polyglot_foundation::{CombinationId, Error, ErrorKind, PosId, Result, WordId};
use tracing::debug;

use crate::serialize::{load_from_file, save_to_file};

/// Session state for an interactive REPL session.
pub struct Session {
    /// The current language.
    language: Language,

    /// Engine settings applied to every language loaded into the session.
    config: EngineConfig,

    /// File the language was last loaded from or saved to.
    file: Option<PathBuf>,

    /// Current load path for relative file resolution.
    load_path: PathBuf,

    /// Result of the last validation pass.
    problems: Vec<Problem>,
}

impl Session {
    /// Creates a new session with an empty language.
    #[must_use]
    pub fn new() -> Self {
        Self::with_language(Language::default())
    }

    /// Creates a new session around the given language, keeping its engine
    /// settings.
    #[must_use]
    pub fn with_language(language: Language) -> Self {
        Self {
            config: language.config.clone(),
            language,
            file: None,
            load_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            problems: Vec::new(),
        }
    }

    /// Builder method to set the engine settings.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Returns a reference to the current language.
    #[must_use]
    pub const fn language(&self) -> &Language {
        &self.language
    }

    /// Returns a mutable reference to the current language.
    pub fn language_mut(&mut self) -> &mut Language {
        &mut self.language
    }

    /// Replaces the language, applying the session's engine settings.
    pub fn set_language(&mut self, mut language: Language) {
        language.config = self.config.clone();
        self.language = language;
        self.problems.clear();
    }

    /// Returns the engine settings.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sets the engine settings for this and every later language.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.language.config = config.clone();
        self.config = config;
    }

    /// File the language was last loaded from or saved to.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Gets the current load path.
    #[must_use]
    pub fn load_path(&self) -> &PathBuf {
        &self.load_path
    }

    /// Sets the load path.
    pub fn set_load_path(&mut self, path: PathBuf) {
        self.load_path = path;
    }

    /// Resolves a path relative to the current load path.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = PathBuf::from(path);
        if p.is_absolute() {
            p
        } else {
            self.load_path.join(p)
        }
    }

    // -------------------------------------------------------------------------
    // Files
    // -------------------------------------------------------------------------

    /// Loads a snapshot, replacing the current language.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded; the current
    /// language is kept in that case.
    pub fn load(&mut self, path: &str) -> Result<PathBuf> {
        let resolved = self.resolve_path(path);
        let language = load_from_file(&resolved)?;
        self.set_language(language);
        if let Some(parent) = resolved.parent() {
            self.load_path = parent.to_path_buf();
        }
        self.file = Some(resolved.clone());
        Ok(resolved)
    }

    /// Saves the language to `path`, or to the current file if `path` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no path to save to, or the errors of
    /// [`save_to_file`].
    pub fn save(&mut self, path: Option<&str>) -> Result<PathBuf> {
        let target = match path {
            Some(path) => self.resolve_path(path),
            None => self
                .file
                .clone()
                .ok_or_else(|| Error::new(ErrorKind::NotFound("file to save to".to_string())))?,
        };
        save_to_file(&self.language, &target)?;
        self.file = Some(target.clone());
        Ok(target)
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Resolves a word typed by the user: `#3`, `word#3`, or a word value.
    /// When several words share a value the first by id wins.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWord` for an id that is not in the lexicon, or
    /// `NotFound` for a value no word has.
    pub fn find_word(&self, name: &str) -> Result<WordId> {
        let raw = name.strip_prefix("word#").or_else(|| name.strip_prefix('#'));
        if let Some(id) = raw.and_then(|raw| raw.parse::<u32>().ok()) {
            return self.language.word(WordId(id)).map(|word| word.id);
        }
        self.language
            .lexicon
            .find_by_value(name)
            .map(|word| word.id)
            .min()
            .ok_or_else(|| Error::new(ErrorKind::NotFound(format!("word \"{name}\""))))
    }

    /// Resolves a part of speech by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no part of speech has this name.
    pub fn find_pos(&self, name: &str) -> Result<PosId> {
        self.language
            .parts_of_speech
            .find_by_name(name)
            .map(|pos| pos.id)
            .ok_or_else(|| Error::new(ErrorKind::NotFound(format!("part of speech \"{name}\""))))
    }

    /// Resolves a combination of `pos` by label (`"plural nominative"`) or
    /// raw id (`",2,1,"`).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the paradigm has no such combination.
    pub fn find_combination(&self, pos: PosId, text: &str) -> Result<CombinationId> {
        self.language
            .conjugations
            .combinations(pos)
            .into_iter()
            .find(|combination| combination.label == text || combination.id.as_str() == text)
            .map(|combination| combination.id)
            .ok_or_else(|| Error::new(ErrorKind::NotFound(format!("combination \"{text}\" for {pos}"))))
    }

    /// Word values and part-of-speech names, for completion.
    #[must_use]
    pub fn vocabulary(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .language
            .lexicon
            .iter()
            .map(|word| word.value().to_string())
            .chain(self.language.parts_of_speech.iter().map(|pos| pos.name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Runs the validation pass on a worker over a snapshot of the language
    /// and keeps the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker cannot be started or panics.
    pub fn check(&mut self) -> Result<&[Problem]> {
        let handle = spawn_check(&self.language)?;
        self.problems = handle.join()?;
        debug!(problems = self.problems.len(), "session check finished");
        Ok(&self.problems)
    }

    /// Problems found by the last [`check`](Self::check).
    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
