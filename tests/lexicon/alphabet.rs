//! Integration tests for the alphabet

use polyglot_lexicon::{Alphabet, AmbiguityKind, Lexicon, Word};

#[test]
fn multi_character_letters_sort_as_one() {
    // "ch" sorts after "c" and before "d", as in traditional Spanish order.
    let alphabet = Alphabet::parse("a, c, ch, d, e, o");
    let mut lexicon = Lexicon::new();
    for value in ["dedo", "chaco", "coda", "ache"] {
        lexicon.insert(Word::new(value));
    }
    let sorted: Vec<&str> = lexicon.sorted(&alphabet).iter().map(|w| w.value()).collect();
    assert_eq!(sorted, vec!["ache", "coda", "chaco", "dedo"]);
}

#[test]
fn unknown_characters_sort_last() {
    let alphabet = Alphabet::parse("ba");
    let mut lexicon = Lexicon::new();
    for value in ["ax", "ab", "bz"] {
        lexicon.insert(Word::new(value));
    }
    let sorted: Vec<&str> = lexicon.sorted(&alphabet).iter().map(|w| w.value()).collect();
    assert_eq!(sorted, vec!["bz", "ab", "ax"]);
}

#[test]
fn ignore_case_membership() {
    let alphabet = Alphabet::parse("abc");
    assert!(!alphabet.accepts("Cab", false));
    assert!(alphabet.accepts("Cab", true));
    assert_eq!(alphabet.bad_letters("Cabx", false), "Cx");
    assert_eq!(alphabet.bad_letters("Cabx", true), "x");
}

#[test]
fn ambiguity_kinds() {
    let alphabet = Alphabet::parse("s, sh, hs");
    let found = alphabet.ambiguities();
    assert!(found
        .iter()
        .any(|a| a.letter == "s" && a.other == "sh" && a.kind == AmbiguityKind::Prefix));
    assert!(found
        .iter()
        .any(|a| a.letter == "s" && a.other == "hs" && a.kind == AmbiguityKind::Suffix));
    assert_eq!(found.len(), 2);
}

#[test]
fn empty_alphabet_accepts_everything() {
    let alphabet = Alphabet::default();
    assert!(alphabet.accepts("anything at all", false));
    assert!(alphabet.duplicates().is_empty());
}
