//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use polyglot_foundation::{Error, ErrorContext, ErrorKind, PosId, RuleId, WordId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn malformed_pattern_names_the_pattern() {
    let err = Error::malformed_pattern("(a", "unclosed group");
    assert!(err.is_pattern_error());
    let msg = format!("{err}");
    assert!(msg.contains("(a"));
    assert!(msg.contains("unclosed group"));
}

#[test]
fn malformed_replacement_is_a_pattern_error() {
    let err = Error::malformed_replacement("$3", "no group 3");
    assert!(err.is_pattern_error());
    assert!(matches!(err.kind, ErrorKind::MalformedReplacement { .. }));
}

#[test]
fn lookup_errors_are_not_pattern_errors() {
    assert!(!Error::unknown_word(WordId(1)).is_pattern_error());
    assert!(!Error::unknown_pos(PosId(1)).is_pattern_error());
    assert!(!Error::unknown_rule(RuleId(1)).is_pattern_error());
}

#[test]
fn etymological_loop_display() {
    let err = Error::etymological_loop(WordId(3), WordId(7));
    assert_eq!(err.to_string(), "etymological loop: word#3 cannot be a parent of word#7");
}

#[test]
fn recursion_limit_display() {
    let err = Error::recursion_limit(100);
    assert_eq!(err.to_string(), "recursion limit (100) reached");
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_is_kept_separately() {
    let err = Error::malformed_pattern("(a", "unclosed group").with_context(
        ErrorContext::new()
            .with_source("rule plural (rule#2)")
            .with_frame("pos#1 ,2,"),
    );
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("rule plural (rule#2)"));
    assert_eq!(context.stack, vec!["pos#1 ,2,"]);
    assert_eq!(context.to_string(), "at rule plural (rule#2)\n  in pos#1 ,2,\n");
}
