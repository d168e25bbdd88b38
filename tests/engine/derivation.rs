//! Integration tests for conjugation rule derivation

use polyglot_engine::{ConjugationManager, ConjugationRule, EngineConfig, Paradigm, RuleOutcome};
use polyglot_foundation::{ClassId, CombinationId, PosId, ValueId};
use polyglot_lexicon::WordForm;
use proptest::prelude::*;

const NOUN: PosId = PosId(1);
const GENDER: ClassId = ClassId(1);
const MASCULINE: ValueId = ValueId(1);
const FEMININE: ValueId = ValueId(2);

fn plural() -> CombinationId {
    CombinationId::new(",2,")
}

fn manager() -> ConjugationManager {
    let mut manager = ConjugationManager::new();
    manager.set_paradigm(NOUN, Paradigm::new().with_dimensional("number", &["singular", "plural"]));
    manager
}

// =============================================================================
// Worked example
// =============================================================================

#[test]
fn bus_pluralizes_in_index_order() {
    let mut manager = manager();
    // Added in reverse order: application follows the index, not insertion.
    manager.add_rule(ConjugationRule::new(NOUN, plural()).with_index(1).with_step("$", "-PL"));
    manager.add_rule(
        ConjugationRule::new(NOUN, plural())
            .with_index(0)
            .with_filter(".*s$")
            .with_step("s$", "ses"),
    );

    let bus = manager.derive_form(&WordForm::new("bus"), NOUN, &plural());
    assert_eq!(bus.value, "buses-PL");
    assert!(bus.applied);
    assert!(bus.is_clean());

    let cat = manager.derive_form(&WordForm::new("cat"), NOUN, &plural());
    assert_eq!(cat.value, "cat-PL");
}

#[test]
fn filter_sees_the_base_not_the_running_value() {
    let mut manager = manager();
    manager.add_rule(ConjugationRule::new(NOUN, plural()).with_index(0).with_step("$", "s"));
    manager.add_rule(
        ConjugationRule::new(NOUN, plural())
            .with_index(1)
            .with_filter(".*s")
            .with_step("$", "!"),
    );
    let derived = manager.derive_form(&WordForm::new("cat"), NOUN, &plural());
    assert_eq!(derived.value, "cats");
}

// =============================================================================
// No applicable rule
// =============================================================================

#[test]
fn no_rules_returns_base_unapplied() {
    let manager = manager();
    let derived = manager.derive_form(&WordForm::new("bus"), NOUN, &plural());
    assert_eq!(derived.value, "bus");
    assert!(!derived.applied);
}

#[test]
fn all_rules_filtered_returns_base_unapplied() {
    let mut manager = manager();
    manager.add_rule(ConjugationRule::new(NOUN, plural()).with_filter(".*x").with_step("$", "en"));
    let derived = manager.derive_form(&WordForm::new("bus"), NOUN, &plural());
    assert_eq!(derived.value, "bus");
    assert!(!derived.applied);
}

// =============================================================================
// Malformed patterns
// =============================================================================

#[test]
fn malformed_step_contributes_nothing() {
    let mut manager = manager();
    manager.add_rule(
        ConjugationRule::new(NOUN, plural())
            .with_step("(a", "b")
            .with_step("$", "s"),
    );
    let derived = manager.derive_form_with(&WordForm::new("cat"), NOUN, &plural(), &EngineConfig::tracing());
    assert_eq!(derived.value, "cats");
    assert_eq!(derived.faults.len(), 1);
    assert!(derived.faults[0].is_pattern_error());
    assert!(derived.trace[0].steps[0].malformed);
    assert_eq!(derived.trace[0].steps[0].before, derived.trace[0].steps[0].after);
}

#[test]
fn malformed_filter_skips_the_rule() {
    let mut manager = manager();
    manager.add_rule(ConjugationRule::new(NOUN, plural()).with_filter("[").with_step("$", "s"));
    let derived = manager.derive_form_with(&WordForm::new("cat"), NOUN, &plural(), &EngineConfig::tracing());
    assert_eq!(derived.value, "cat");
    assert!(!derived.applied);
    assert_eq!(derived.trace[0].outcome, RuleOutcome::MalformedFilter);
    assert_eq!(derived.faults.len(), 1);
}

#[test]
fn malformed_replacement_is_a_fault() {
    let mut manager = manager();
    manager.add_rule(ConjugationRule::new(NOUN, plural()).with_step("a", "$2"));
    let derived = manager.derive_form(&WordForm::new("cat"), NOUN, &plural());
    assert_eq!(derived.value, "cat");
    assert_eq!(derived.faults.len(), 1);
}

// =============================================================================
// Class filters
// =============================================================================

#[test]
fn class_filter_gates_rules() {
    let mut manager = manager();
    manager.add_rule(
        ConjugationRule::new(NOUN, plural())
            .with_class(GENDER, FEMININE)
            .with_step("$", "e"),
    );
    let feminine = WordForm::new("lun").with_class(GENDER, FEMININE);
    let masculine = WordForm::new("lun").with_class(GENDER, MASCULINE);
    let unmarked = WordForm::new("lun");

    assert_eq!(manager.derive_form(&feminine, NOUN, &plural()).value, "lune");
    assert_eq!(manager.derive_form(&masculine, NOUN, &plural()).value, "lun");
    assert_eq!(manager.derive_form(&unmarked, NOUN, &plural()).value, "lun");
}

// =============================================================================
// Suppression
// =============================================================================

#[test]
fn suppressed_combination_is_blank() {
    let mut manager = manager();
    manager.add_rule(ConjugationRule::new(NOUN, plural()).with_step("$", "s"));
    manager.set_suppressed(NOUN, plural(), true);
    let derived = manager.derive_form(&WordForm::new("cat"), NOUN, &plural());
    assert!(derived.suppressed);
    assert_eq!(derived.value, "");

    manager.set_suppressed(NOUN, plural(), false);
    assert_eq!(manager.derive_form(&WordForm::new("cat"), NOUN, &plural()).value, "cats");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Application order follows the index no matter the insertion order.
    #[test]
    fn order_is_index_order(indices in Just((0u32..8).collect::<Vec<_>>()).prop_shuffle()) {
        let mut manager = manager();
        for index in &indices {
            manager.add_rule(
                ConjugationRule::new(NOUN, plural())
                    .with_index(*index)
                    .with_step("$", index.to_string()),
            );
        }
        let derived = manager.derive_form(&WordForm::new("x"), NOUN, &plural());
        prop_assert_eq!(derived.value, "x01234567");
    }

    /// The same inputs always produce the same output.
    #[test]
    fn derivation_is_deterministic(
        base in "[a-z]{1,8}",
        gender in prop_oneof![Just(None), Just(Some(MASCULINE)), Just(Some(FEMININE))],
    ) {
        let mut manager = manager();
        manager.add_rule(
            ConjugationRule::new(NOUN, plural())
                .with_class(GENDER, FEMININE)
                .with_filter(".*[aeiou]")
                .with_step("([aeiou])$", "${1}s"),
        );
        manager.add_rule(ConjugationRule::new(NOUN, plural()).with_filter("[^aeiou].*").with_step("^", "e"));
        let mut form = WordForm::new(base);
        if let Some(value) = gender {
            form = form.with_class(GENDER, value);
        }
        let first = manager.derive_form(&form, NOUN, &plural());
        let second = manager.derive_form(&form, NOUN, &plural());
        prop_assert_eq!(first, second);
    }

    /// A word no rule applies to comes back unchanged.
    #[test]
    fn unmatched_words_are_untouched(base in "[b-df-hj-np-tv-z]{1,8}") {
        let mut manager = manager();
        manager.add_rule(ConjugationRule::new(NOUN, plural()).with_filter(".*[aeiou].*").with_step("$", "s"));
        let derived = manager.derive_form(&WordForm::new(base.clone()), NOUN, &plural());
        prop_assert_eq!(derived.value, base);
        prop_assert!(!derived.applied);
    }
}
