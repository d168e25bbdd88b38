//! The validation pass.
//!
//! [`check_all`] sweeps a language read-only and collects one [`Problem`] per
//! offending entity. Each entity is checked independently: when checking one
//! fails outright, that failure becomes an `Internal` problem and the sweep
//! moves on.

use std::collections::BTreeMap;

use polyglot_engine::{ConjugationRule, Language, PhonologyGuide, TranscriptionStatus, pattern};
use polyglot_foundation::{Error, Result};
use polyglot_lexicon::{AmbiguityKind, PartOfSpeech, Word};
use tracing::{debug, info};

use crate::problem::{Problem, ProblemCategory, ProblemKind, Subject};

/// Runs every sweep over `language` and returns the problems in report
/// order.
#[must_use]
pub fn check_all(language: &Language) -> Vec<Problem> {
    let mut problems = Vec::new();

    check_words(language, &mut problems);
    check_etymology(language, &mut problems);
    check_parts_of_speech(language, &mut problems);
    check_rules(language, &mut problems);
    check_phonology(language, &mut problems);
    check_alphabet(language, &mut problems);

    problems.sort_by(Problem::report_order);
    info!(
        language = %language.properties.name,
        problems = problems.len(),
        errors = problems.iter().filter(|p| p.is_error()).count(),
        "language check finished"
    );
    problems
}

fn internal(category: ProblemCategory, subject: Subject, label: String, error: &Error) -> Problem {
    Problem::error(category, ProblemKind::Internal, subject, label)
        .with_detail(format!("check failed: {error}"))
}

// =============================================================================
// Words
// =============================================================================

fn word_label(word: &Word) -> String {
    if word.value().is_empty() {
        format!("(blank {})", word.id)
    } else {
        word.value().to_string()
    }
}

/// Legality, alphabet and transcription coverage of every word.
pub fn check_words(language: &Language, problems: &mut Vec<Problem>) {
    let value_counts = language.lexicon.value_counts();
    let local_counts = language.lexicon.local_counts();
    let before = problems.len();

    for word in language.lexicon.iter() {
        let subject = Subject::Word(word.id);
        match word_details(language, word, &value_counts, &local_counts) {
            Ok(details) if details.is_empty() => {}
            Ok(details) => {
                let mut problem = Problem::error(
                    ProblemCategory::Word,
                    ProblemKind::IllegalWord,
                    subject,
                    word_label(word),
                );
                problem.details = details;
                problems.push(problem);
            }
            Err(error) => problems.push(internal(ProblemCategory::Word, subject, word_label(word), &error)),
        }
    }
    debug!(found = problems.len() - before, "word sweep done");
}

fn word_details(
    language: &Language,
    word: &Word,
    value_counts: &BTreeMap<&str, usize>,
    local_counts: &BTreeMap<&str, usize>,
) -> Result<Vec<String>> {
    let properties = &language.properties;
    let mut details = Vec::new();

    if !word.rules_override {
        if word.value().is_empty() {
            details.push("Word value cannot be blank.".to_string());
        }
        if word.pos.is_none() && properties.types_mandatory {
            details.push("Part of speech set to mandatory.".to_string());
        }
        if word.local.is_empty() && properties.local_mandatory {
            details.push("Local word set to mandatory.".to_string());
        }
        if properties.word_uniqueness && value_counts.get(word.value()).is_some_and(|n| *n > 1) {
            details.push("Words set to enforced unique: this word exists elsewhere.".to_string());
        }
        if properties.local_uniqueness
            && !word.local.is_empty()
            && local_counts.get(word.local.as_str()).is_some_and(|n| *n > 1)
        {
            details.push("Local words set to enforced unique: this local word exists elsewhere.".to_string());
        }
        if let Some(pos) = word.pos {
            let pos = language.parts_of_speech.require(pos)?;
            pos_details(language, word, pos, &mut details);
        }
    }

    if !language.alphabet.is_empty() && !language.alphabet.accepts(word.value(), properties.ignore_case) {
        details.push("Word contains characters undefined in alphabet settings.".to_string());
        details.push(format!(
            "Suspect characters: \"{}\"",
            language.alphabet.bad_letters(word.value(), properties.ignore_case)
        ));
    }

    if word.pronunciation_override.is_none() && is_in_use(&language.pronunciation) {
        coverage_details(language, &language.pronunciation, word.value(), "pronunciation", &mut details);
    }
    if is_in_use(&language.romanization) {
        coverage_details(language, &language.romanization, word.value(), "romanization", &mut details);
    }

    Ok(details)
}

fn pos_details(language: &Language, word: &Word, pos: &PartOfSpeech, details: &mut Vec<String>) {
    if pos.pronunciation_mandatory
        && word.pronunciation_override.is_none()
        && language.pronounce_text(word.value()).text.is_empty()
    {
        details.push(format!("Pronunciation required for {} words.", pos.name));
    }
    // A malformed enforced pattern is reported once, against the part of speech.
    if !pos.pattern.is_empty() {
        let mismatch = pattern::compile_full_match(&pos.pattern)
            .is_ok_and(|enforced| !enforced.is_match(word.value()));
        if mismatch {
            details.push(format!("Word does not match enforced pattern for {}.", pos.name));
        }
    }
    if pos.definition_mandatory && word.definition.is_empty() {
        details.push(format!("Definition required for {} words.", pos.name));
    }
}

fn is_in_use(guide: &PhonologyGuide) -> bool {
    guide.enabled && !guide.is_empty()
}

/// A one-pass guide covers a word only if rule matches tile all of it.
/// Recursive guides rewrite their own output, so they are judged by how
/// transcription ended instead.
fn coverage_details(
    language: &Language,
    guide: &PhonologyGuide,
    value: &str,
    what: &str,
    details: &mut Vec<String>,
) {
    if !guide.recurse {
        if guide.pronounce_segmented(value).is_none() {
            details.push(format!("Word {what} cannot be generated (no pattern matches)."));
        }
        return;
    }
    match guide.transcribe_with_config(value, &language.config).status {
        TranscriptionStatus::NoRuleMatched => {
            details.push(format!("Word {what} cannot be generated (no pattern matches)."));
        }
        TranscriptionStatus::RecursionLimitReached { limit } => {
            details.push(format!("Word {what} hit the recursion limit ({limit}); result is partial."));
        }
        TranscriptionStatus::Complete => {}
    }
}

// =============================================================================
// Etymology
// =============================================================================

/// Every word that is its own transitive ancestor.
pub fn check_etymology(language: &Language, problems: &mut Vec<Problem>) {
    let looped = language.etymology.words_in_loops();
    for id in &looped {
        let label = language
            .lexicon
            .get(*id)
            .map_or_else(|| id.to_string(), word_label);
        problems.push(
            Problem::error(ProblemCategory::Word, ProblemKind::EtymologicalLoop, Subject::Word(*id), label)
                .with_detail("This word is included in an illegal etymological loop."),
        );
    }
    debug!(found = looped.len(), "etymology sweep done");
}

// =============================================================================
// Parts of speech
// =============================================================================

/// Enforced patterns of every part of speech.
pub fn check_parts_of_speech(language: &Language, problems: &mut Vec<Problem>) {
    let before = problems.len();
    for pos in language.parts_of_speech.iter() {
        if pos.pattern.is_empty() {
            continue;
        }
        if let Err(error) = pattern::compile_full_match(&pos.pattern) {
            problems.push(
                Problem::error(
                    ProblemCategory::PartOfSpeech,
                    ProblemKind::IllegalPattern,
                    Subject::PartOfSpeech(pos.id),
                    format!("Part of speech: {}", pos.name),
                )
                .with_detail(error.to_string()),
            );
        }
    }
    debug!(found = problems.len() - before, "part of speech sweep done");
}

// =============================================================================
// Conjugation rules
// =============================================================================

/// Filter, step and replacement patterns of every conjugation rule.
pub fn check_rules(language: &Language, problems: &mut Vec<Problem>) {
    let before = problems.len();
    for rule in language.conjugations.rules() {
        let subject = Subject::Rule(rule.id);
        match rule_label(language, rule) {
            Ok(label) => {
                let details = rule_details(rule);
                if !details.is_empty() {
                    let mut problem =
                        Problem::error(ProblemCategory::Rule, ProblemKind::IllegalPattern, subject, label);
                    problem.details = details;
                    problems.push(problem);
                }
            }
            Err(error) => problems.push(internal(ProblemCategory::Rule, subject, rule.id.to_string(), &error)),
        }
    }
    debug!(found = problems.len() - before, "rule sweep done");
}

fn rule_label(language: &Language, rule: &ConjugationRule) -> Result<String> {
    let pos = language.parts_of_speech.require(rule.pos)?;
    let combination = language
        .conjugations
        .combination_label(rule.pos, &rule.combination)
        .unwrap_or_else(|| rule.combination.to_string());
    let name = if rule.name.is_empty() { rule.id.to_string() } else { rule.name.clone() };
    Ok(format!("{}: rule {name} of {combination}", pos.name))
}

fn rule_details(rule: &ConjugationRule) -> Vec<String> {
    let mut details = Vec::new();
    if let Err(error) = rule.validate_filter() {
        details.push(format!("Filter: {error}"));
    }
    for (n, step) in rule.steps.iter().enumerate() {
        if let Err(error) = step.validate() {
            details.push(format!("Step {}: {error}", n + 1));
        }
    }
    details
}

// =============================================================================
// Phonology
// =============================================================================

/// Patterns and replacements of both phonology guides.
pub fn check_phonology(language: &Language, problems: &mut Vec<Problem>) {
    let before = problems.len();
    for guide in [&language.pronunciation, &language.romanization] {
        for (index, rule) in guide.rules().iter().enumerate() {
            if let Err(error) = guide.validate_rule(rule) {
                problems.push(
                    Problem::error(
                        ProblemCategory::Phonology,
                        ProblemKind::IllegalPattern,
                        Subject::PhonologyRule { guide: guide.kind, index },
                        format!("{} rule {}: {rule}", capitalized(&guide.kind.to_string()), index + 1),
                    )
                    .with_detail(error.to_string()),
                );
            }
        }
    }
    debug!(found = problems.len() - before, "phonology sweep done");
}

fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

// =============================================================================
// Alphabet
// =============================================================================

/// Duplicate letters and prefix/suffix ambiguities.
pub fn check_alphabet(language: &Language, problems: &mut Vec<Problem>) {
    let before = problems.len();
    for letter in language.alphabet.duplicates() {
        problems.push(
            Problem::warning(
                ProblemCategory::Alphabet,
                ProblemKind::DuplicateLetter,
                Subject::Letters(letter.to_string(), None),
                format!("Letter \"{letter}\""),
            )
            .with_detail("This letter is declared more than once."),
        );
    }
    for ambiguity in language.alphabet.ambiguities() {
        let position = match ambiguity.kind {
            AmbiguityKind::Prefix => "prefix",
            AmbiguityKind::Suffix => "suffix",
        };
        problems.push(
            Problem::warning(
                ProblemCategory::Alphabet,
                ProblemKind::AmbiguousLetter,
                Subject::Letters(ambiguity.letter.clone(), Some(ambiguity.other.clone())),
                format!("Letters \"{}\" and \"{}\"", ambiguity.letter, ambiguity.other),
            )
            .with_detail(format!(
                "\"{}\" is a {position} of \"{}\", which may lead to inconsistent alphabetic order.",
                ambiguity.letter, ambiguity.other
            )),
        );
    }
    debug!(found = problems.len() - before, "alphabet sweep done");
}
