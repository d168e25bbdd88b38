//! Pattern compilation and replacement templates.
//!
//! User-authored patterns are compiled with the `regex` crate. Filter and
//! part-of-speech patterns are whole-string matches, so they are anchored
//! before compilation. Replacement text follows the `$n` / `${name}` group
//! reference syntax with `\` escapes, and is validated against the pattern it
//! will be used with: a reference to a group the pattern does not define is
//! an error rather than a silent empty string.

use std::fmt;

use polyglot_foundation::{Error, Result};
use regex::{Captures, Regex, RegexBuilder, Replacer};

/// Group openers the host engine does not support.
const LOOKAROUND_OPENERS: [&str; 4] = ["?=", "?!", "?<=", "?<!"];

// =============================================================================
// Validation and compilation
// =============================================================================

/// Returns true if `pattern` compiles.
#[must_use]
pub fn is_legal(pattern: &str) -> bool {
    compile(pattern).is_ok()
}

/// Compiles a pattern.
///
/// # Errors
///
/// Returns `MalformedPattern` if the pattern does not compile.
pub fn compile(pattern: &str) -> Result<Regex> {
    build(pattern, pattern, false)
}

/// Compiles a pattern, optionally matching case-insensitively.
///
/// # Errors
///
/// Returns `MalformedPattern` if the pattern does not compile.
pub fn compile_with_case(pattern: &str, ignore_case: bool) -> Result<Regex> {
    build(pattern, pattern, ignore_case)
}

/// Compiles a pattern that must match the whole input.
///
/// # Errors
///
/// Returns `MalformedPattern` if the pattern does not compile.
pub fn compile_full_match(pattern: &str) -> Result<Regex> {
    build(pattern, &format!("^(?:{pattern})$"), false)
}

/// Compiles a pattern that must match at the start of the input.
///
/// A leading `^` in `pattern` is accepted and redundant.
///
/// # Errors
///
/// Returns `MalformedPattern` if the pattern does not compile.
pub fn compile_prefix(pattern: &str, ignore_case: bool) -> Result<Regex> {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    build(pattern, &format!("^(?:{body})"), ignore_case)
}

fn build(original: &str, source: &str, ignore_case: bool) -> Result<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| {
            let message = if has_lookaround(original) {
                "lookahead and lookbehind groups are not supported".to_string()
            } else {
                describe(&e)
            };
            Error::malformed_pattern(original, message)
        })
}

fn describe(error: &regex::Error) -> String {
    match error {
        regex::Error::Syntax(text) => text
            .lines()
            .rev()
            .find(|line| line.starts_with("error:"))
            .map_or_else(|| text.clone(), |line| line["error:".len()..].trim().to_string()),
        regex::Error::CompiledTooBig(limit) => format!("compiled pattern exceeds {limit} bytes"),
        other => other.to_string(),
    }
}

/// Returns true if `pattern` contains a lookahead or lookbehind group.
///
/// Parentheses inside a character class are literal and never open a group.
#[must_use]
pub fn has_lookaround(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    let mut class_depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' => {
                class_depth += 1;
                // A `]` straight after `[` or `[^` is a literal member.
                if bytes.get(i + 1) == Some(&b'^') {
                    i += 1;
                }
                if bytes.get(i + 1) == Some(&b']') {
                    i += 1;
                }
            }
            b']' if class_depth > 0 => class_depth -= 1,
            b'(' if class_depth == 0 => {
                let rest = &pattern[i + 1..];
                if LOOKAROUND_OPENERS.iter().any(|opener| rest.starts_with(opener)) {
                    return true;
                }
            }
            _ => {}
        }
        i += 1;
    }
    false
}

// =============================================================================
// Replacement templates
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    Literal(String),
    Group(usize),
}

/// A parsed replacement template, ready to expand against captures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    parts: Vec<Part>,
}

impl Replacement {
    /// Parses `text` against the groups `regex` defines.
    ///
    /// `$n` takes as many digits as still name an existing group, so with
    /// three groups `$12` is group 1 followed by a literal `2`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedReplacement` for a dangling `$`, an unterminated
    /// `${`, a trailing `\`, or a reference to a missing group.
    pub fn parse(text: &str, regex: &Regex) -> Result<Self> {
        let group_count = regex.captures_len() - 1;
        let fail = |message: String| Error::malformed_replacement(text, message);

        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    let escaped = chars
                        .next()
                        .ok_or_else(|| fail("character to be escaped is missing".into()))?;
                    literal.push(escaped);
                }
                '$' => {
                    let group = match chars.next() {
                        None => return Err(fail("group index is missing after '$'".into())),
                        Some('{') => {
                            let mut name = String::new();
                            loop {
                                match chars.next() {
                                    Some('}') => break,
                                    Some(ch) => name.push(ch),
                                    None => {
                                        return Err(fail(format!("unterminated group name \"${{{name}\"")));
                                    }
                                }
                            }
                            if name.is_empty() {
                                return Err(fail("empty group name".into()));
                            }
                            regex
                                .capture_names()
                                .position(|n| n == Some(name.as_str()))
                                .ok_or_else(|| fail(format!("no group named \"{name}\"")))?
                        }
                        Some(d) if d.is_ascii_digit() => {
                            let mut index = digit(d);
                            if index > group_count {
                                return Err(fail(format!("no group {index}")));
                            }
                            while let Some(&next) = chars.peek() {
                                if !next.is_ascii_digit() {
                                    break;
                                }
                                let candidate = index * 10 + digit(next);
                                if candidate > group_count {
                                    break;
                                }
                                index = candidate;
                                chars.next();
                            }
                            index
                        }
                        Some(other) => {
                            return Err(fail(format!("illegal group reference \"${other}\"")));
                        }
                    };
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(Part::Group(group));
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    /// A replacement that inserts `text` verbatim.
    #[must_use]
    pub fn literal(text: &str) -> Self {
        let parts = if text.is_empty() {
            Vec::new()
        } else {
            vec![Part::Literal(text.to_string())]
        };
        Self { parts }
    }

    /// Appends the expansion for `caps` to `dst`.
    ///
    /// Groups that did not participate in the match expand to nothing.
    pub fn expand(&self, caps: &Captures<'_>, dst: &mut String) {
        for part in &self.parts {
            match part {
                Part::Literal(text) => dst.push_str(text),
                Part::Group(index) => {
                    if let Some(m) = caps.get(*index) {
                        dst.push_str(m.as_str());
                    }
                }
            }
        }
    }
}

fn digit(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize)
}

impl Replacer for &Replacement {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        self.expand(caps, dst);
    }
}

// =============================================================================
// Scoped replacement
// =============================================================================

/// Which matches a scoped replacement rewrites.
///
/// Matches are numbered left to right. "Middle" is every match that is
/// neither the first nor the last; a single match is both first and last.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplaceScope {
    /// Every match.
    #[default]
    All,
    /// Only the first match.
    FirstOnly,
    /// The first and middle matches.
    FirstAndMiddle,
    /// Only middle matches.
    MiddleOnly,
    /// The middle and last matches.
    MiddleAndLast,
    /// Only the last match.
    LastOnly,
}

impl ReplaceScope {
    /// Returns true if the match at `index` out of `count` is rewritten.
    #[must_use]
    pub fn selects(self, index: usize, count: usize) -> bool {
        let first = index == 0;
        let last = index + 1 == count;
        let middle = !first && !last;
        match self {
            Self::All => true,
            Self::FirstOnly => first,
            Self::FirstAndMiddle => first || middle,
            Self::MiddleOnly => middle,
            Self::MiddleAndLast => middle || last,
            Self::LastOnly => last,
        }
    }
}

impl fmt::Display for ReplaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all instances",
            Self::FirstOnly => "first instance only",
            Self::FirstAndMiddle => "first and middle instances",
            Self::MiddleOnly => "middle instances only",
            Self::MiddleAndLast => "middle and last instances",
            Self::LastOnly => "last instance only",
        };
        f.write_str(label)
    }
}

/// Replaces the matches of `regex` in `input` selected by `scope`.
#[must_use]
pub fn replace_scoped(
    regex: &Regex,
    replacement: &Replacement,
    input: &str,
    scope: ReplaceScope,
) -> String {
    if scope == ReplaceScope::All {
        return regex.replace_all(input, replacement).into_owned();
    }

    let matches: Vec<Captures<'_>> = regex.captures_iter(input).collect();
    let count = matches.len();
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for (index, caps) in matches.iter().enumerate() {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&input[last..whole.start()]);
        if scope.selects(index, count) {
            replacement.expand(caps, &mut out);
        } else {
            out.push_str(whole.as_str());
        }
        last = whole.end();
    }
    out.push_str(&input[last..]);
    out
}
