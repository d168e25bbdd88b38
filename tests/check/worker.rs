//! Background validation worker

use polyglot_check::{check_all, spawn_check};
use polyglot_lexicon::Word;
use polyglot_runtime::demo_language;

#[test]
fn worker_reports_the_snapshot_it_was_given() {
    let mut language = demo_language();
    let handle = spawn_check(&language).unwrap();

    // An empty word is illegal, but the worker already holds its own copy.
    language.add_word(Word::new(""));
    let problems = handle.join().unwrap();

    assert!(problems.is_empty());
    assert_eq!(check_all(&language).len(), 1);
}

#[test]
fn several_workers_at_once() {
    let language = demo_language();
    let handles: Vec<_> = (0..4).map(|_| spawn_check(&language).unwrap()).collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_empty());
    }
}
