//! Snapshot files

use polyglot_engine::{EngineConfig, PhonologyGuide};
use polyglot_foundation::{CombinationId, ErrorKind, WordId};
use polyglot_lexicon::Word;
use polyglot_runtime::{demo_language, from_bytes, load_from_file, save_to_file, to_bytes};
use proptest::prelude::*;

use crate::scratch_path;

#[test]
fn reloaded_language_behaves_the_same() {
    let mut language = demo_language();
    let noun = language.parts_of_speech.find_by_name("noun").unwrap().id;
    let bus = WordId(1);
    let cat = WordId(2);
    language.add_etymology(bus, cat).unwrap();
    language
        .conjugations
        .set_suppressed(noun, CombinationId::new(",1,"), true);
    language.romanization = PhonologyGuide::romanization().with_enabled(true).with_rule("c", "k");

    let path = scratch_path("behaves");
    save_to_file(&language, &path).unwrap();
    let restored = load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(restored, language);
    assert_eq!(restored.etymology.children(bus), vec![cat]);
    assert!(restored.conjugate(cat, &CombinationId::new(",1,")).unwrap().suppressed);
    assert_eq!(restored.romanize(cat).unwrap().unwrap().text, "kat");
}

#[test]
fn ids_keep_counting_after_reload() {
    let mut restored = from_bytes(&to_bytes(&demo_language()).unwrap()).unwrap();
    let id = restored.add_word(Word::new("stud"));
    assert_eq!(id, WordId(4));
}

#[test]
fn engine_settings_stay_behind() {
    let language = demo_language().with_config(EngineConfig::tracing().with_max_recursion(3));
    let restored = from_bytes(&to_bytes(&language).unwrap()).unwrap();
    assert_eq!(restored.config, EngineConfig::default());
}

#[test]
fn truncated_file_is_rejected() {
    let bytes = to_bytes(&demo_language()).unwrap();
    let path = scratch_path("truncated");
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    let err = load_from_file(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err.kind, ErrorKind::SerializationError(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn derived_forms_survive_a_snapshot(value in "[a-z]{1,8}") {
        let mut language = demo_language();
        let noun = language.parts_of_speech.find_by_name("noun").unwrap().id;
        let id = language.add_word(Word::new(value).with_pos(noun));
        let restored = from_bytes(&to_bytes(&language).unwrap()).unwrap();

        let before = language.decline_all(id).unwrap();
        let after = restored.decline_all(id).unwrap();
        prop_assert_eq!(before, after);
    }
}
