//! Validation sweeps over whole languages

use polyglot_check::{ProblemCategory, ProblemKind, Subject, check_all, has_errors};
use polyglot_engine::{ConjugationRule, Language, Paradigm, PhonologyRule};
use polyglot_foundation::{CombinationId, PosId, WordId};
use polyglot_lexicon::{PartOfSpeech, Word};
use polyglot_runtime::demo_language;
use proptest::prelude::*;

fn language() -> (Language, PosId) {
    let mut language = Language::new("Sweeps");
    let noun = language.parts_of_speech.insert(PartOfSpeech::new("noun"));
    language
        .conjugations
        .set_paradigm(noun, Paradigm::new().with_dimensional("number", &["singular", "plural"]));
    (language, noun)
}

#[test]
fn demo_language_is_clean() {
    let problems = check_all(&demo_language());
    assert!(problems.is_empty(), "unexpected problems: {problems:?}");
}

#[test]
fn breaking_the_demo_is_noticed() {
    let mut language = demo_language();
    language.pronunciation.push(PhonologyRule::new("[x", "y"));
    let problems = check_all(&language);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].category, ProblemCategory::Phonology);
    assert!(has_errors(&problems));
}

#[test]
fn uncovered_letters_are_noticed() {
    let mut language = demo_language();
    // Every letter but "z" has a pronunciation rule.
    let cuz = language.add_word(Word::new("cuz"));
    language.alphabet = polyglot_lexicon::Alphabet::parse("abcdegostuz");

    let problems = check_all(&language);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].subject, Subject::Word(cuz));
    assert!(problems[0].details.iter().any(|d| d.contains("pronunciation cannot be generated")));
}

#[test]
fn problems_come_in_report_order() {
    let (mut language, noun) = language();
    language.alphabet = polyglot_lexicon::Alphabet::new(["a", "a"]);
    language
        .conjugations
        .add_rule(ConjugationRule::new(noun, CombinationId::new(",2,")).with_step("(", "x"));
    language.add_word(Word::new(""));

    let categories: Vec<ProblemCategory> = check_all(&language).iter().map(|p| p.category).collect();
    assert_eq!(
        categories,
        vec![ProblemCategory::Word, ProblemCategory::Rule, ProblemCategory::Alphabet]
    );
}

#[test]
fn warnings_alone_are_not_errors() {
    let (mut language, _) = language();
    language.alphabet = polyglot_lexicon::Alphabet::new(["s", "sh"]);
    let problems = check_all(&language);
    assert!(!problems.is_empty());
    assert!(!has_errors(&problems));
}

proptest! {
    #[test]
    fn bad_filter_is_one_problem_however_many_words(count in 0usize..20) {
        let (mut language, noun) = language();
        for i in 0..count {
            language.add_word(Word::new(format!("w{i}")).with_pos(noun));
        }
        language
            .conjugations
            .add_rule(ConjugationRule::new(noun, CombinationId::new(",2,")).with_filter("(a"));

        let problems = check_all(&language);
        prop_assert_eq!(problems.len(), 1);
        prop_assert_eq!(problems[0].kind, ProblemKind::IllegalPattern);
    }

    #[test]
    fn only_words_on_a_cycle_are_reported(length in 2usize..8) {
        let (mut language, _) = language();
        let ids: Vec<WordId> = (0..length)
            .map(|i| language.add_word(Word::new(format!("w{i}"))))
            .collect();
        for pair in ids.windows(2) {
            language.etymology.add_relation_unchecked(pair[0], pair[1]);
        }
        prop_assert!(check_all(&language).is_empty());

        language.etymology.add_relation_unchecked(ids[length - 1], ids[0]);
        let looped: Vec<Subject> = check_all(&language)
            .into_iter()
            .filter(|p| p.kind == ProblemKind::EtymologicalLoop)
            .map(|p| p.subject)
            .collect();
        let expected: Vec<Subject> = ids.iter().copied().map(Subject::Word).collect();
        prop_assert_eq!(looped, expected);
    }
}
