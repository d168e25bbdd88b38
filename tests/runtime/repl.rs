//! Scripted REPL sessions

use polyglot_runtime::{
    LineEditor, ReadResult, Repl, Reply, Result, Session, demo_language, save_to_file,
};

use crate::scratch_path;

/// Feeds fixed lines and remembers what reached the history.
#[derive(Default)]
struct ScriptedEditor {
    lines: Vec<String>,
    next: usize,
    history: Vec<String>,
    vocabulary: Vec<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        let result = match self.lines.get(self.next) {
            Some(line) if line == "^C" => ReadResult::Interrupted,
            Some(line) => ReadResult::Line(line.clone()),
            None => ReadResult::Eof,
        };
        self.next += 1;
        Ok(result)
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn set_vocabulary(&mut self, vocabulary: Vec<String>) {
        self.vocabulary = vocabulary;
    }
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Output(text) => text,
        other => panic!("expected output, got {other:?}"),
    }
}

#[test]
fn load_through_the_repl() {
    let path = scratch_path("repl_load");
    save_to_file(&demo_language(), &path).unwrap();

    let mut repl = Repl::with_editor(ScriptedEditor::default()).without_banner();
    assert!(repl.eval("decline bus").is_err());

    let loaded = text(repl.eval(&format!("load \"{}\"", path.display())).unwrap());
    let _ = std::fs::remove_file(&path);

    assert!(loaded.ends_with("(3 words)"));
    assert_eq!(text(repl.eval("decline bus plural").unwrap()), "plural: buses-PL");
}

#[test]
fn save_through_the_repl() {
    let path = scratch_path("repl_save");
    let mut repl = Repl::with_editor(ScriptedEditor::default())
        .with_session(Session::with_language(demo_language()))
        .without_banner();

    assert!(repl.eval("save").is_err());
    let saved = text(repl.eval(&format!("save \"{}\"", path.display())).unwrap());
    assert!(saved.starts_with("saved "));
    // The file is remembered for a plain `save`.
    assert!(text(repl.eval("save").unwrap()).starts_with("saved "));

    let mut fresh = Session::new();
    fresh.load(&path.to_string_lossy()).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(fresh.vocabulary(), vec!["bus", "cat", "dog", "noun"]);
}

#[test]
fn scripted_session_keeps_going_past_errors() {
    let editor = ScriptedEditor::new(&["frobnicate", "", "^C", "decline dog \\", "plural", "quit", "words"]);
    let mut repl = Repl::with_editor(editor)
        .with_session(Session::with_language(demo_language()))
        .without_banner();
    repl.run().unwrap();

    assert_eq!(
        repl.editor().history,
        vec!["frobnicate".to_string(), "decline dog  plural".to_string(), "quit".to_string()]
    );
}

#[test]
fn check_then_break_the_language() {
    let mut repl = Repl::with_editor(ScriptedEditor::default())
        .with_session(Session::with_language(demo_language()))
        .without_banner();
    assert_eq!(text(repl.eval("check").unwrap()), "no problems found");

    repl.session_mut()
        .language_mut()
        .pronunciation
        .push(polyglot_engine::PhonologyRule::new("(", "x"));
    let report = text(repl.eval("check").unwrap());
    assert!(report.contains("[error]"));
    assert_eq!(repl.session().problems().len(), 1);
}
