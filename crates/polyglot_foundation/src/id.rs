//! Typed identifiers for lexicon and rule-table entities.
//!
//! Every entity kind gets its own `u32` newtype so a class id can never be
//! passed where a value id is expected.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            /// Creates an identifier from its raw value.
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Returns the identifier following this one.
            #[must_use]
            pub const fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(
    /// Identifies a word in the lexicon.
    WordId,
    "word"
);

define_id!(
    /// Identifies a part of speech.
    PosId,
    "pos"
);

define_id!(
    /// Identifies a word class (a user-defined grammatical category such as gender).
    ClassId,
    "class"
);

define_id!(
    /// Identifies one value of a word class.
    ValueId,
    "value"
);

define_id!(
    /// Identifies a conjugation rule, independent of its ordering index.
    RuleId,
    "rule"
);

define_id!(
    /// Identifies a declension (a paradigm axis such as tense or case).
    DeclensionId,
    "declension"
);

define_id!(
    /// Identifies one dimension of a declension (such as past or accusative).
    DimensionId,
    "dimension"
);
