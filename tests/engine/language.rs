//! Integration tests for the language aggregate

use polyglot_engine::{
    ConjugationRule, EngineConfig, Language, Paradigm, PhonologyGuide, ReplaceScope,
    TranscriptionStatus,
};
use polyglot_foundation::{CombinationId, ErrorKind, PosId, WordId};
use polyglot_lexicon::{LanguageProperties, PartOfSpeech, Word};

fn singular() -> CombinationId {
    CombinationId::new(",1,")
}

fn plural() -> CombinationId {
    CombinationId::new(",2,")
}

fn language() -> (Language, PosId) {
    let mut language = Language::new("Testish");
    let noun = language.parts_of_speech.insert(PartOfSpeech::new("noun"));
    language
        .conjugations
        .set_paradigm(noun, Paradigm::new().with_dimensional("number", &["singular", "plural"]));
    language
        .conjugations
        .add_rule(ConjugationRule::new(noun, plural()).with_name("plural").with_step("$", "en"));
    (language, noun)
}

// =============================================================================
// Conjugation
// =============================================================================

#[test]
fn decline_all_covers_the_paradigm() {
    let (mut language, noun) = language();
    let id = language.add_word(Word::new("hus").with_pos(noun));
    let forms = language.decline_all(id).unwrap();
    let values: Vec<(&str, &str)> = forms
        .iter()
        .map(|(combination, derivation)| (combination.label.as_str(), derivation.value.as_str()))
        .collect();
    assert_eq!(values, vec![("singular", "hus"), ("plural", "husen")]);
}

#[test]
fn rules_override_uses_stored_forms() {
    let (mut language, noun) = language();
    let id = language.add_word(
        Word::new("man")
            .with_pos(noun)
            .with_stored_form(plural(), "men")
            .overriding_rules(),
    );
    let plural_form = language.conjugate(id, &plural()).unwrap();
    assert_eq!(plural_form.value, "men");
    assert!(!plural_form.applied);
    assert_eq!(language.conjugate(id, &singular()).unwrap().value, "");
}

#[test]
fn conjugate_errors() {
    let (mut language, _) = language();
    let loose = language.add_word(Word::new("loose"));
    let err = language.conjugate(loose, &plural()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingPartOfSpeech(loose));
    let err = language.conjugate(WordId(77), &plural()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownWord(WordId(77)));
}

#[test]
fn traces_follow_the_config() {
    let (mut language, noun) = language();
    let id = language.add_word(Word::new("hus").with_pos(noun));
    assert!(language.conjugate(id, &plural()).unwrap().trace.is_empty());

    let language = language.with_config(EngineConfig::tracing());
    let traced = language.conjugate(id, &plural()).unwrap();
    assert_eq!(traced.trace.len(), 1);
    assert_eq!(traced.trace[0].name, "plural");
}

// =============================================================================
// Stored forms
// =============================================================================

#[test]
fn deprecated_forms_outlive_their_combination() {
    let (mut language, noun) = language();
    let id = language.add_word(
        Word::new("hus")
            .with_pos(noun)
            .with_stored_form(plural(), "husen")
            .with_stored_form(CombinationId::new(",3,"), "husna"),
    );
    let deprecated = language.deprecated_forms(id).unwrap();
    assert_eq!(deprecated, vec![(CombinationId::new(",3,"), "husna".to_string())]);
}

#[test]
fn evolve_stored_forms_with_scope() {
    let (mut language, noun) = language();
    let id = language.add_word(
        Word::new("tata")
            .with_pos(noun)
            .with_stored_form(plural(), "tatata")
            .with_stored_form(singular(), "tata"),
    );
    let changes = language
        .evolve_stored_forms(id, "t", "d", ReplaceScope::LastOnly)
        .unwrap();
    assert_eq!(changes.len(), 2);
    let word = language.word(id).unwrap();
    assert_eq!(word.stored_form(&plural()), Some("tatada"));
    assert_eq!(word.stored_form(&singular()), Some("tada"));
}

#[test]
fn evolve_refuses_to_blank_a_form() {
    let (mut language, noun) = language();
    let id = language.add_word(Word::new("a").with_pos(noun).with_stored_form(plural(), "aa"));
    let changes = language.evolve_stored_forms(id, "a", "", ReplaceScope::All).unwrap();
    assert_eq!(changes.len(), 1);
    assert!(changes[0].error.is_some());
    assert_eq!(language.word(id).unwrap().stored_form(&plural()), Some("aa"));
}

#[test]
fn evolve_rejects_bad_patterns_up_front() {
    let (mut language, noun) = language();
    let id = language.add_word(Word::new("a").with_pos(noun).with_stored_form(plural(), "aa"));
    let err = language
        .evolve_stored_forms(id, "(a", "b", ReplaceScope::All)
        .unwrap_err();
    assert!(err.is_pattern_error());
    assert_eq!(language.word(id).unwrap().stored_form(&plural()), Some("aa"));
}

#[test]
fn evolve_rules_rewrites_steps() {
    let (mut language, _) = language();
    let changes = language.conjugations.evolve_rules(None, "en", "er");
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].before, "$->en");
    assert_eq!(changes[0].after, "$->er");
}

// =============================================================================
// Phonology
// =============================================================================

#[test]
fn pronunciation_override_wins() {
    let (mut language, noun) = language();
    language.pronunciation = PhonologyGuide::pronunciation().with_rule("u", "ʉ");
    let plain = language.add_word(Word::new("hus").with_pos(noun));
    let fixed = language.add_word(Word::new("hus").with_pos(noun).with_pronunciation("hyːs"));

    assert_eq!(language.pronounce(plain).unwrap().text, "hʉs");
    let overridden = language.pronounce(fixed).unwrap();
    assert_eq!(overridden.text, "hyːs");
    assert_eq!(overridden.passes, 0);
    assert_eq!(overridden.status, TranscriptionStatus::Complete);
}

#[test]
fn romanization_only_when_enabled() {
    let (mut language, noun) = language();
    let id = language.add_word(Word::new("шум").with_pos(noun));
    assert!(language.romanize(id).unwrap().is_none());

    language.romanization = PhonologyGuide::romanization()
        .with_enabled(true)
        .with_rule("ш", "sh")
        .with_rule("у", "u")
        .with_rule("м", "m");
    assert_eq!(language.romanize(id).unwrap().unwrap().text, "shum");
}

#[test]
fn recursion_limit_comes_from_the_config() {
    let (language, _) = language();
    let mut language = language.with_config(EngineConfig::default().with_max_recursion(3));
    language.pronunciation = PhonologyGuide::pronunciation().with_recurse(true).with_rule("a", "aa");
    let result = language.pronounce_text("a");
    assert_eq!(result.status, TranscriptionStatus::RecursionLimitReached { limit: 3 });
}

#[test]
fn growing_guide_stops_at_the_output_bound() {
    let (language, _) = language();
    let mut language = language.with_config(EngineConfig::default().with_max_output_len(100));
    language.pronunciation = PhonologyGuide::pronunciation().with_recurse(true).with_rule("a", "aa");
    let result = language.pronounce_text("a");
    assert!(result.hit_limit());
    assert_eq!(result.text.len(), 128);
    assert_eq!(result.passes, 7);
}

#[test]
fn properties_reach_both_guides() {
    let (mut language, _) = language();
    let mut properties = LanguageProperties::new("Testish");
    properties.ignore_case = true;
    properties.disable_proc_regex = true;
    language.set_properties(properties);
    assert!(language.pronunciation.ignore_case && language.pronunciation.literal);
    assert!(language.romanization.ignore_case && language.romanization.literal);
}

// =============================================================================
// Etymology
// =============================================================================

#[test]
fn etymology_requires_known_words() {
    let (mut language, _) = language();
    let a = language.add_word(Word::new("a"));
    let b = language.add_word(Word::new("b"));
    language.add_etymology(a, b).unwrap();
    assert!(matches!(
        language.add_etymology(b, a).unwrap_err().kind,
        ErrorKind::EtymologicalLoop { .. }
    ));
    assert!(matches!(
        language.add_etymology(a, WordId(99)).unwrap_err().kind,
        ErrorKind::UnknownWord(_)
    ));

    language.remove_word(b);
    assert_eq!(language.etymology.edge_count(), 0);
}
