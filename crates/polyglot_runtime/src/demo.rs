//! A small built-in language for trying the REPL without a snapshot file.

use polyglot_engine::{ConjugationRule, Language, Paradigm};
use polyglot_foundation::CombinationId;
use polyglot_lexicon::{Alphabet, PartOfSpeech, Word};

/// Builds the demo language: three nouns, a singular/plural paradigm, two
/// plural rules and a one-pass pronunciation guide.
#[must_use]
pub fn demo_language() -> Language {
    let mut language = Language::new("Demo");
    language.alphabet = Alphabet::parse("abcdegostu");

    let noun = language
        .parts_of_speech
        .insert(PartOfSpeech::new("noun").with_pattern("[a-z]+"));
    language.conjugations.set_paradigm(
        noun,
        Paradigm::new().with_dimensional("number", &["singular", "plural"]),
    );

    let plural = CombinationId::new(",2,");
    language.conjugations.add_rule(
        ConjugationRule::new(noun, plural.clone())
            .with_name("sibilant")
            .with_index(0)
            .with_filter(".*s$")
            .with_step("s$", "ses"),
    );
    language.conjugations.add_rule(
        ConjugationRule::new(noun, plural)
            .with_name("suffix")
            .with_index(1)
            .with_step("$", "-PL"),
    );

    for value in ["bus", "cat", "dog"] {
        language.add_word(Word::new(value).with_pos(noun));
    }

    language.pronunciation = language
        .pronunciation
        .clone()
        .with_rule("c", "k")
        .with_rule("a", "æ")
        .with_rule("u", "ʌ")
        .with_rule("o", "ɒ")
        .with_rule("[bdegst]", "$0");

    language
}
