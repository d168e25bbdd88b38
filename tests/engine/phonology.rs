//! Integration tests for pronunciation and romanization guides

use polyglot_engine::{DEFAULT_MAX_OUTPUT_LEN, PhonologyGuide, SYLLABLE_MARK, TranscriptionStatus};
use proptest::prelude::*;

fn guide() -> PhonologyGuide {
    PhonologyGuide::pronunciation()
        .with_rule("sh", "ʃ")
        .with_rule("a", "ɑ")
        .with_rule("[tk]", "$0")
}

// =============================================================================
// Passes
// =============================================================================

#[test]
fn single_pass_when_not_recursive() {
    // "aa" only appears after the first rule ran, and is never revisited.
    let guide = PhonologyGuide::pronunciation()
        .with_rule("aa", "A")
        .with_rule("a", "aa");
    let result = guide.transcribe("a");
    assert_eq!(result.text, "aa");
    assert_eq!(result.passes, 1);
    assert!(result.is_complete());
}

#[test]
fn recursion_runs_to_a_fixed_point() {
    let guide = PhonologyGuide::pronunciation()
        .with_recurse(true)
        .with_rule("aa", "A")
        .with_rule("a", "aa");
    let result = guide.transcribe("a");
    // pass 1: a -> aa; pass 2: aa -> A; pass 3: no change
    assert_eq!(result.text, "A");
    assert_eq!(result.passes, 3);
    assert!(result.is_complete());
}

#[test]
fn runaway_recursion_is_bounded() {
    let guide = PhonologyGuide::pronunciation().with_recurse(true).with_rule("a", "aa");
    let result = guide.transcribe_with_limit("a", 5);
    assert_eq!(result.status, TranscriptionStatus::RecursionLimitReached { limit: 5 });
    assert!(result.hit_limit());
    assert_eq!(result.passes, 5);
    // Best effort text is kept.
    assert_eq!(result.text, "a".repeat(32));
}

#[test]
fn doubling_with_default_bounds_returns() {
    let guide = PhonologyGuide::pronunciation().with_recurse(true).with_rule("a", "aa");
    let result = guide.transcribe("a");
    assert!(result.hit_limit());
    assert!(result.text.len() > DEFAULT_MAX_OUTPUT_LEN);
    assert!(result.text.len() <= 2 * DEFAULT_MAX_OUTPUT_LEN);
}

// =============================================================================
// Coverage and faults
// =============================================================================

#[test]
fn words_are_transcribed_separately() {
    let result = guide().transcribe("shat  kat");
    assert_eq!(result.text, "ʃɑt kɑt");
}

#[test]
fn no_match_is_reported() {
    let result = guide().transcribe("xyz");
    assert_eq!(result.status, TranscriptionStatus::NoRuleMatched);
    assert_eq!(result.text, "xyz");
}

#[test]
fn one_unmatched_word_is_reported() {
    let result = guide().transcribe("shat xyz");
    assert_eq!(result.status, TranscriptionStatus::NoRuleMatched);
    assert_eq!(result.text, "ʃɑt xyz");
}

#[test]
fn malformed_rule_is_skipped_once() {
    let guide = guide().with_rule("(", "x");
    let result = guide.transcribe("shat shat");
    assert_eq!(result.text, "ʃɑt ʃɑt");
    assert_eq!(result.faults.len(), 1);
}

#[test]
fn literal_mode_escapes_patterns() {
    let guide = PhonologyGuide::pronunciation().with_literal(true).with_rule(".", "dot");
    assert_eq!(guide.transcribe("a.b").text, "adotb");
}

#[test]
fn ignore_case_matches_capitals() {
    let guide = PhonologyGuide::pronunciation().with_ignore_case(true).with_rule("sh", "ʃ");
    assert_eq!(guide.transcribe("SHa").text, "ʃa");
}

// =============================================================================
// Segmentation
// =============================================================================

#[test]
fn segmentation_backtracks() {
    // "s" is tried before "sh" would fit, but "s" + "h..." dead-ends.
    let guide = PhonologyGuide::pronunciation()
        .with_rule("s", "s")
        .with_rule("sh", "ʃ")
        .with_rule("a", "ɑ");
    let segments = guide.segment("sha").unwrap();
    let origins: Vec<&str> = segments.iter().map(|s| s.origin.as_str()).collect();
    assert_eq!(origins, vec!["sh", "a"]);
    assert_eq!(segments[0].rule, 1);
}

#[test]
fn unsegmentable_word() {
    assert!(guide().segment("shax").is_none());
    assert!(guide().pronounce_segmented("ta shax").is_none());
}

#[test]
fn syllable_marks() {
    let guide = guide().with_syllables(["ta", "sha"]);
    assert_eq!(guide.syllable_breaks("tasha"), vec![2]);
    assert_eq!(guide.pronounce_segmented("tasha").unwrap(), format!("tɑ{SYLLABLE_MARK}ʃɑ"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// A non-recursive guide runs exactly one pass per word.
    #[test]
    fn one_pass_without_recursion(text in "[ash ]{0,12}") {
        let result = guide().transcribe(&text);
        let expected = usize::from(text.split_whitespace().next().is_some());
        prop_assert_eq!(result.passes, expected);
    }

    /// A recursive guide never runs more than the limit.
    #[test]
    fn recursion_never_exceeds_limit(text in "[ab]{1,4}", limit in 1usize..8) {
        let guide = PhonologyGuide::pronunciation()
            .with_recurse(true)
            .with_rule("a", "ab")
            .with_rule("b", "ba");
        let result = guide.transcribe_with_limit(&text, limit);
        prop_assert!(result.passes <= limit);
        prop_assert!(result.hit_limit());
    }
}
