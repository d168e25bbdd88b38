//! Integration tests for words and the lexicon

use polyglot_foundation::{CombinationId, ErrorKind, PosId, WordId};
use polyglot_lexicon::{Lexicon, PartOfSpeech, PosCollection, Word};

#[test]
fn ids_are_assigned_in_order() {
    let mut lexicon = Lexicon::new();
    let a = lexicon.insert(Word::new("a"));
    let b = lexicon.insert(Word::new("b"));
    assert_eq!((a, b), (WordId(1), WordId(2)));
    assert_eq!(lexicon.require(b).unwrap().value(), "b");
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut lexicon = Lexicon::new();
    let a = lexicon.insert(Word::new("a"));
    lexicon.remove(a);
    let b = lexicon.insert(Word::new("b"));
    assert_ne!(a, b);
    assert!(!lexicon.contains(a));
}

#[test]
fn update_keeps_the_id() {
    let mut lexicon = Lexicon::new();
    let id = lexicon.insert(Word::new("old"));
    lexicon.update(id, Word::new("new")).unwrap();
    assert_eq!(lexicon.require(id).unwrap().id, id);
    assert_eq!(lexicon.require(id).unwrap().value(), "new");

    let err = lexicon.update(WordId(99), Word::new("x")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownWord(WordId(99)));
}

#[test]
fn counts_for_uniqueness() {
    let mut lexicon = Lexicon::new();
    lexicon.insert(Word::new("ka").with_local("dog"));
    lexicon.insert(Word::new("ka").with_local("cat"));
    lexicon.insert(Word::new("ti"));
    assert_eq!(lexicon.value_counts().get("ka"), Some(&2));
    assert_eq!(lexicon.local_counts().get("dog"), Some(&1));
    assert_eq!(lexicon.local_counts().get(""), None);
}

#[test]
fn stored_forms_and_parts_of_speech() {
    let mut parts = PosCollection::new();
    let noun = parts.insert(PartOfSpeech::new("noun").with_pattern("[a-z]+"));
    assert_eq!(parts.find_by_name("noun").map(|p| p.id), Some(noun));
    assert!(parts.require(PosId(42)).is_err());

    let word = Word::new("bus")
        .with_pos(noun)
        .with_stored_form(CombinationId::new(",2,"), "bussen")
        .overriding_rules();
    assert!(word.rules_override);
    assert_eq!(word.stored_form(&CombinationId::new(",2,")), Some("bussen"));
    assert_eq!(word.stored_form(&CombinationId::new(",1,")), None);
}
