//! REPL command parsing.
//!
//! A command is one line: a command word followed by arguments. Arguments
//! split on whitespace; double quotes group words that contain spaces.

use polyglot_foundation::{Error, ErrorKind, Result};

/// Every command word the REPL understands.
pub const COMMANDS: &[&str] = &[
    "help", "words", "pos", "combos", "decline", "trace", "pronounce", "romanize", "segment",
    "check", "load", "save", "quit", "exit",
];

/// A parsed REPL command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `help`
    Help,
    /// `words`
    Words,
    /// `pos`
    PartsOfSpeech,
    /// `combos <pos>`
    Combinations(String),
    /// `decline <word> [<combination>]`
    Decline {
        /// Word value or id.
        word: String,
        /// Combination label or id; every combination when absent.
        combination: Option<String>,
    },
    /// `trace <word> <combination>`
    Trace {
        /// Word value or id.
        word: String,
        /// Combination label or id.
        combination: String,
    },
    /// `pronounce <text>`
    Pronounce(String),
    /// `romanize <text>`
    Romanize(String),
    /// `segment <text>`
    Segment(String),
    /// `check`
    Check,
    /// `load <path>`
    Load(String),
    /// `save [<path>]`
    Save(Option<String>),
    /// `quit` or `exit`
    Quit,
}

impl Command {
    /// Parses one input line. Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown command word, missing arguments or an
    /// unterminated quote.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        let Some((word, rest)) = split_command(line) else {
            return Ok(None);
        };
        let args = split_args(rest)?;

        let command = match word {
            "help" | "?" => Self::Help,
            "words" => Self::Words,
            "pos" => Self::PartsOfSpeech,
            "combos" => Self::Combinations(joined(word, &args)?),
            "decline" => {
                let (first, others) = args.split_first().ok_or_else(|| usage(word))?;
                Self::Decline {
                    word: first.clone(),
                    combination: (!others.is_empty()).then(|| others.join(" ")),
                }
            }
            "trace" => match args.split_first() {
                Some((first, others)) if !others.is_empty() => Self::Trace {
                    word: first.clone(),
                    combination: others.join(" "),
                },
                _ => return Err(usage(word)),
            },
            "pronounce" => Self::Pronounce(text_argument(word, rest)?),
            "romanize" => Self::Romanize(text_argument(word, rest)?),
            "segment" => Self::Segment(text_argument(word, rest)?),
            "check" => Self::Check,
            "load" => Self::Load(joined(word, &args)?),
            "save" => Self::Save((!args.is_empty()).then(|| args.join(" "))),
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(Error::new(ErrorKind::InvalidCommand(format!(
                    "unknown command: {other} (try help)"
                ))));
            }
        };
        Ok(Some(command))
    }

    /// One-line usage text for a command word.
    #[must_use]
    pub fn usage(word: &str) -> Option<&'static str> {
        let text = match word {
            "help" => "help",
            "words" => "words",
            "pos" => "pos",
            "combos" => "combos <pos>",
            "decline" => "decline <word> [<combination>]",
            "trace" => "trace <word> <combination>",
            "pronounce" => "pronounce <text>",
            "romanize" => "romanize <text>",
            "segment" => "segment <text>",
            "check" => "check",
            "load" => "load <path>",
            "save" => "save [<path>]",
            "quit" | "exit" => "quit",
            _ => return None,
        };
        Some(text)
    }
}

fn usage(word: &str) -> Error {
    let text = Command::usage(word).unwrap_or(word);
    Error::new(ErrorKind::InvalidCommand(format!("usage: {text}")))
}

fn joined(word: &str, args: &[String]) -> Result<String> {
    if args.is_empty() {
        Err(usage(word))
    } else {
        Ok(args.join(" "))
    }
}

/// Free text is taken verbatim, without quote handling.
fn text_argument(word: &str, rest: &str) -> Result<String> {
    let text = rest.trim();
    if text.is_empty() {
        Err(usage(word))
    } else {
        Ok(text.to_string())
    }
}

fn split_command(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    Some(match line.find(char::is_whitespace) {
        Some(at) => (&line[..at], &line[at..]),
        None => (line, ""),
    })
}

/// Splits arguments on whitespace, keeping double-quoted runs together.
///
/// # Errors
///
/// Returns an error for an unterminated quote.
pub fn split_args(text: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_arg = false;

    for c in text.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_arg = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_arg {
                    args.push(std::mem::take(&mut current));
                    has_arg = false;
                }
            }
            c => {
                current.push(c);
                has_arg = true;
            }
        }
    }

    if in_quotes {
        return Err(Error::new(ErrorKind::InvalidCommand("unterminated quote".to_string())));
    }
    if has_arg {
        args.push(current);
    }
    Ok(args)
}
