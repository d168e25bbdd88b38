//! The main REPL implementation.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::command::{COMMANDS, Command};
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;
use polyglot_check::has_errors;
use polyglot_engine::{Derivation, RuleOutcome, Transcription, TranscriptionStatus};
use polyglot_foundation::{Error, ErrorKind, Result};

/// What evaluating one command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Text to print.
    Output(String),
    /// Nothing to print.
    Silent,
    /// The user asked to leave.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (language, file, last problems).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (after a trailing backslash).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "pg> ".to_string(),
            continuation_prompt: ".. ".to_string(),
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self.editor.set_vocabulary(self.session.vocabulary());
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Returns a reference to the line editor.
    #[must_use]
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.print_error(&e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false); // EOF
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(Reply::Output(text)) => println!("{text}"),
            Ok(Reply::Silent) => {}
            Ok(Reply::Quit) => return Ok(false),
            Err(e) => self.print_error(&e),
        }

        Ok(true)
    }

    /// Reads one command, joining lines that end with a backslash.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.prompt
            } else {
                &self.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    let trimmed = line.trim_end();
                    if let Some(head) = trimmed.strip_suffix('\\') {
                        input.push_str(head);
                        input.push(' ');
                        first_line = false;
                        continue;
                    }
                    input.push_str(&line);
                    return Ok(Some(input));
                }
                ReadResult::Interrupted => {
                    if first_line {
                        println!();
                    } else {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::InvalidCommand(
                        "unexpected EOF after line continuation".to_string(),
                    )));
                }
            }
        }
    }

    /// Evaluates one command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not parse or the command fails.
    pub fn eval(&mut self, input: &str) -> Result<Reply> {
        match Command::parse(input)? {
            Some(command) => self.execute(command),
            None => Ok(Reply::Silent),
        }
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if a name does not resolve or file access fails.
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        let text = match command {
            Command::Help => help_text(),
            Command::Words => self.list_words(),
            Command::PartsOfSpeech => self.list_parts_of_speech(),
            Command::Combinations(pos) => self.list_combinations(&pos)?,
            Command::Decline { word, combination } => self.decline(&word, combination.as_deref())?,
            Command::Trace { word, combination } => self.trace(&word, &combination)?,
            Command::Pronounce(text) => format_transcription(&self.session.language().pronounce_text(&text)),
            Command::Romanize(text) => match self.session.language().romanize_text(&text) {
                Some(transcription) => format_transcription(&transcription),
                None => "romanization is disabled".to_string(),
            },
            Command::Segment(text) => self.segment(&text),
            Command::Check => self.check()?,
            Command::Load(path) => {
                let path = self.session.load(&path)?;
                self.editor.set_vocabulary(self.session.vocabulary());
                format!(
                    "loaded {} ({} words)",
                    path.display(),
                    self.session.language().lexicon.len()
                )
            }
            Command::Save(path) => {
                let path = self.session.save(path.as_deref())?;
                format!("saved {}", path.display())
            }
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Output(text))
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    fn list_words(&self) -> String {
        let language = self.session.language();
        if language.lexicon.is_empty() {
            return "no words".to_string();
        }
        let mut out = String::new();
        for word in language.lexicon.sorted(&language.alphabet) {
            let pos = word
                .pos
                .and_then(|pos| language.parts_of_speech.get(pos))
                .map_or("-", |pos| pos.name.as_str());
            let _ = write!(out, "#{} {} ({pos})", word.id.raw(), word.value());
            if !word.local.is_empty() {
                let _ = write!(out, " = {}", word.local);
            }
            out.push('\n');
        }
        out.pop();
        out
    }

    fn list_parts_of_speech(&self) -> String {
        let language = self.session.language();
        if language.parts_of_speech.is_empty() {
            return "no parts of speech".to_string();
        }
        language
            .parts_of_speech
            .iter()
            .map(|pos| {
                format!(
                    "{}: {} words, {} rules, {} combinations",
                    pos.name,
                    language.lexicon.words_of_pos(pos.id).count(),
                    language.conjugations.rules_for_pos(pos.id).len(),
                    language.conjugations.combinations(pos.id).len(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn list_combinations(&self, name: &str) -> Result<String> {
        let pos = self.session.find_pos(name)?;
        let conjugations = &self.session.language().conjugations;
        let combinations = conjugations.combinations(pos);
        if combinations.is_empty() {
            return Ok(format!("{name} has no combinations"));
        }
        Ok(combinations
            .iter()
            .map(|combination| {
                let suppressed = if conjugations.is_suppressed(pos, &combination.id) {
                    " (suppressed)"
                } else {
                    ""
                };
                format!("{}  {}{suppressed}", combination.label, combination.id)
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn decline(&self, word: &str, combination: Option<&str>) -> Result<String> {
        let id = self.session.find_word(word)?;
        let language = self.session.language();

        if let Some(combination) = combination {
            let pos = language
                .word(id)?
                .pos
                .ok_or_else(|| Error::new(ErrorKind::MissingPartOfSpeech(id)))?;
            let combination = self.session.find_combination(pos, combination)?;
            let label = language
                .conjugations
                .combination_label(pos, &combination)
                .unwrap_or_else(|| combination.to_string());
            return Ok(format_derivation(&label, &language.conjugate(id, &combination)?));
        }

        let forms = language.decline_all(id)?;
        if forms.is_empty() {
            return Ok(format!("{word} has no combinations"));
        }
        Ok(forms
            .iter()
            .map(|(combination, derivation)| format_derivation(&combination.label, derivation))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn trace(&self, word: &str, combination: &str) -> Result<String> {
        let id = self.session.find_word(word)?;
        let mut language = self.session.language().clone();
        language.config.record_traces = true;

        let pos = language
            .word(id)?
            .pos
            .ok_or_else(|| Error::new(ErrorKind::MissingPartOfSpeech(id)))?;
        let combination = self.session.find_combination(pos, combination)?;
        let derivation = language.conjugate(id, &combination)?;

        let mut out = format_derivation(
            &language
                .conjugations
                .combination_label(pos, &combination)
                .unwrap_or_else(|| combination.to_string()),
            &derivation,
        );
        if derivation.trace.is_empty() {
            out.push_str("\n  no rules ran");
        }
        for rule in &derivation.trace {
            let _ = write!(out, "\n  rule {} ({}): {}", rule.name, rule.rule, outcome_text(rule.outcome));
            for step in &rule.steps {
                let malformed = if step.malformed { " [malformed, skipped]" } else { "" };
                let _ = write!(out, "\n    {}: {} => {}{malformed}", step.step, step.before, step.after);
            }
        }
        Ok(out)
    }

    fn segment(&self, text: &str) -> String {
        let guide = &self.session.language().pronunciation;
        let mut lines: Vec<String> = text
            .split_whitespace()
            .map(|word| match guide.segment(word) {
                Some(segments) => {
                    let parts: Vec<String> = segments
                        .iter()
                        .map(|segment| format!("{}={}", segment.origin, segment.pronunciation))
                        .collect();
                    format!("{word}: {}", parts.join(" "))
                }
                None => format!("{word}: cannot be segmented"),
            })
            .collect();
        if guide.syllable_composition {
            if let Some(pronounced) = guide.pronounce_segmented(text) {
                lines.push(format!("syllables: {pronounced}"));
            }
        }
        lines.join("\n")
    }

    fn check(&mut self) -> Result<String> {
        let problems = self.session.check()?;
        if problems.is_empty() {
            return Ok("no problems found".to_string());
        }
        let errors = problems.iter().filter(|p| p.is_error()).count();
        let mut out: Vec<String> = problems.iter().map(ToString::to_string).collect();
        out.push(format!(
            "{} problems ({errors} errors){}",
            problems.len(),
            if has_errors(problems) { "" } else { ", nothing broken" }
        ));
        Ok(out.join("\n"))
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        println!("\x1b[1;36mPolyGlot rule engine\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        let language = self.session.language();
        if !language.properties.name.is_empty() {
            println!(
                "Language: {} ({} words)",
                language.properties.name,
                language.lexicon.len()
            );
        }
        println!("Type help for commands. Use Ctrl+D to exit.\n");

        // Flush to ensure banner appears
        let _ = io::stdout().flush();
    }
}

fn help_text() -> String {
    let mut usages: Vec<&str> = COMMANDS.iter().filter_map(|word| Command::usage(word)).collect();
    // quit and exit share one line
    usages.dedup();

    let mut out = String::from("Commands:");
    for usage in usages {
        let _ = write!(out, "\n  {usage}");
    }
    out.push_str("\nEnd a line with \\ to continue it on the next.");
    out
}

fn outcome_text(outcome: RuleOutcome) -> &'static str {
    match outcome {
        RuleOutcome::Applied => "applied",
        RuleOutcome::SkippedClass => "skipped (class filter)",
        RuleOutcome::SkippedFilter => "skipped (filter)",
        RuleOutcome::MalformedFilter => "skipped (malformed filter)",
    }
}

fn format_derivation(label: &str, derivation: &Derivation) -> String {
    let mut out = format!("{label}: {}", derivation.value);
    if derivation.suppressed {
        out.push_str(" (suppressed)");
    } else if !derivation.applied {
        out.push_str(" (unchanged)");
    }
    for fault in &derivation.faults {
        let _ = write!(out, "\n    ! {fault}");
    }
    out
}

fn format_transcription(transcription: &Transcription) -> String {
    let mut out = transcription.text.clone();
    if transcription.status != TranscriptionStatus::Complete {
        let _ = write!(out, " ({})", transcription.status);
    }
    for fault in &transcription.faults {
        let _ = write!(out, "\n    ! {fault}");
    }
    out
}
