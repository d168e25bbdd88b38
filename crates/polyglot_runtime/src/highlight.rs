//! Syntax highlighting for the REPL.

use std::borrow::Cow;

use crate::command::COMMANDS;

/// Highlighter for REPL command lines.
pub struct PolyglotHighlighter;

impl PolyglotHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    ///
    /// The command word is green when known and red otherwise. Quoted text
    /// is yellow; combination ids (`,2,1,`, `#3`) and numbers are magenta.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut seen_command = false;

        while let Some(c) = chars.next() {
            match c {
                c if c.is_whitespace() => result.push(c),

                // Strings
                '"' => {
                    result.push_str("\x1b[33m"); // yellow
                    result.push(c);
                    for next in chars.by_ref() {
                        result.push(next);
                        if next == '"' {
                            break;
                        }
                    }
                    result.push_str("\x1b[0m");
                    seen_command = true;
                }

                _ => {
                    let mut word = String::new();
                    word.push(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_whitespace() || next == '"' {
                            break;
                        }
                        word.push(next);
                        chars.next();
                    }

                    let color = if seen_command {
                        if is_combination_id(&word) || word.chars().all(|ch| ch.is_ascii_digit()) {
                            "\x1b[35m" // magenta
                        } else {
                            ""
                        }
                    } else if COMMANDS.contains(&word.as_str()) || word == "?" {
                        "\x1b[1;32m" // bold green
                    } else {
                        "\x1b[31m" // red
                    };
                    seen_command = true;

                    if color.is_empty() {
                        result.push_str(&word);
                    } else {
                        result.push_str(color);
                        result.push_str(&word);
                        result.push_str("\x1b[0m");
                    }
                }
            }
        }

        Cow::Owned(result)
    }
}

fn is_combination_id(word: &str) -> bool {
    let dimensional = word.len() > 1
        && word.starts_with(',')
        && word.ends_with(',')
        && word.chars().all(|c| c == ',' || c.is_ascii_digit());
    let singleton = word
        .strip_prefix('#')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()));
    dimensional || singleton
}

impl Default for PolyglotHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
