//! Declared alphabet of a language.
//!
//! Letters may span several characters (`"sh"`, `"ng"`). Membership of a word
//! is decided by greedy accumulation: characters are appended to a pending
//! letter until it names a declared letter, and the word is rejected as soon
//! as the pending letter grows past the longest declared letter.

/// How one letter overlaps another.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AmbiguityKind {
    /// The letter is a proper prefix of the other.
    Prefix,
    /// The letter is a proper suffix of the other.
    Suffix,
}

/// A pair of letters that makes greedy segmentation ambiguous.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ambiguity {
    /// The shorter letter.
    pub letter: String,
    /// The longer letter containing it.
    pub other: String,
    /// Where the shorter letter sits inside the longer one.
    pub kind: AmbiguityKind,
}

/// Ordered list of letters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alphabet {
    letters: Vec<String>,
}

impl Alphabet {
    /// Creates an alphabet from explicit letters.
    #[must_use]
    pub fn new<I, S>(letters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            letters: letters.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses the plain-text alphabet form.
    ///
    /// A comma-delimited text declares multi-character letters
    /// (`"a, b, sh"`); otherwise every character is one letter.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.contains(',') {
            Self::new(
                text.split(',')
                    .map(str::trim)
                    .filter(|letter| !letter.is_empty()),
            )
        } else {
            Self::new(text.chars().map(String::from))
        }
    }

    /// Letters in declared order.
    #[must_use]
    pub fn letters(&self) -> &[String] {
        &self.letters
    }

    /// Returns true if no letters are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Position of a letter in declared order.
    #[must_use]
    pub fn position(&self, letter: &str) -> Option<usize> {
        self.letters.iter().position(|l| l == letter)
    }

    fn contains(&self, candidate: &str, ignore_case: bool) -> bool {
        if ignore_case {
            let lowered = candidate.to_lowercase();
            self.letters.iter().any(|l| l.to_lowercase() == lowered)
        } else {
            self.letters.iter().any(|l| l == candidate)
        }
    }

    fn longest(&self) -> usize {
        self.letters
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Returns true if `word` is made only of declared letters.
    ///
    /// An empty alphabet accepts everything.
    #[must_use]
    pub fn accepts(&self, word: &str, ignore_case: bool) -> bool {
        if self.is_empty() {
            return true;
        }

        let longest = self.longest();
        let mut pending = String::new();
        let mut pending_len = 0;
        for c in word.chars() {
            pending.push(c);
            pending_len += 1;
            if pending_len > longest {
                return false;
            }
            if self.contains(&pending, ignore_case) {
                pending.clear();
                pending_len = 0;
            }
        }
        pending.is_empty()
    }

    /// Characters of `word` that appear in no declared letter, deduplicated.
    #[must_use]
    pub fn bad_letters(&self, word: &str, ignore_case: bool) -> String {
        let mut bad = String::new();
        for c in word.chars() {
            let known = self.letters.iter().any(|l| {
                if ignore_case {
                    l.to_lowercase().contains(&c.to_lowercase().to_string())
                } else {
                    l.contains(c)
                }
            });
            if !known && !bad.contains(c) {
                bad.push(c);
            }
        }
        bad
    }

    /// Letters declared more than once.
    #[must_use]
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let mut dupes = Vec::new();
        for letter in &self.letters {
            if seen.contains(&letter.as_str()) {
                if !dupes.contains(&letter.as_str()) {
                    dupes.push(letter.as_str());
                }
            } else {
                seen.push(letter.as_str());
            }
        }
        dupes
    }

    /// Letter pairs where one is a proper prefix or suffix of another.
    #[must_use]
    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let mut found = Vec::new();
        for letter in &self.letters {
            for other in &self.letters {
                if letter.len() >= other.len() {
                    continue;
                }
                if other.starts_with(letter.as_str()) {
                    found.push(Ambiguity {
                        letter: letter.clone(),
                        other: other.clone(),
                        kind: AmbiguityKind::Prefix,
                    });
                }
                if other.ends_with(letter.as_str()) {
                    found.push(Ambiguity {
                        letter: letter.clone(),
                        other: other.clone(),
                        kind: AmbiguityKind::Suffix,
                    });
                }
            }
        }
        found
    }

    /// Sort key of a word under the declared letter order.
    ///
    /// Letters are matched longest first; characters outside the alphabet
    /// sort after every declared letter, by code point.
    #[must_use]
    pub fn collation_key(&self, word: &str) -> Vec<(usize, u32)> {
        let mut key = Vec::new();
        let mut rest = word;
        while let Some(c) = rest.chars().next() {
            let matched = self
                .letters
                .iter()
                .enumerate()
                .filter(|(_, l)| !l.is_empty() && rest.starts_with(l.as_str()))
                .max_by_key(|(_, l)| l.len());
            if let Some((index, letter)) = matched {
                key.push((index, 0));
                rest = &rest[letter.len()..];
            } else {
                key.push((self.letters.len(), u32::from(c)));
                rest = &rest[c.len_utf8()..];
            }
        }
        key
    }
}
