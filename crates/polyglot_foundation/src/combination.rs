//! Combination identifiers.
//!
//! A combination names one cell of an inflectional paradigm. Dimensional
//! combinations list one dimension per dimensional declension, in declension
//! order, delimited (and bracketed) by commas: `",3,7,"`. Singleton
//! declensions stand alone and are written `"#<declension id>"`.

use std::fmt;

use crate::id::{DeclensionId, DimensionId};

/// The key of one paradigm cell, used to index rules and stored forms.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombinationId(String);

impl CombinationId {
    /// Creates a combination id from its raw string form.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Builds a dimensional combination from one dimension per declension.
    #[must_use]
    pub fn from_dimensions(dimensions: &[DimensionId]) -> Self {
        let mut raw = String::from(",");
        for dim in dimensions {
            raw.push_str(&dim.raw().to_string());
            raw.push(',');
        }
        Self(raw)
    }

    /// Builds the combination of a singleton (dimensionless) declension.
    #[must_use]
    pub fn singleton(declension: DeclensionId) -> Self {
        Self(format!("#{}", declension.raw()))
    }

    /// Returns the raw string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is a singleton combination.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.0.starts_with('#')
    }

    /// Parses the dimension selections of a dimensional combination.
    ///
    /// Returns `None` for singletons and malformed ids.
    #[must_use]
    pub fn dimensions(&self) -> Option<Vec<DimensionId>> {
        let inner = self.0.strip_prefix(',')?.strip_suffix(',')?;
        if inner.is_empty() {
            return Some(Vec::new());
        }
        inner
            .split(',')
            .map(|part| part.parse::<u32>().ok().map(DimensionId))
            .collect()
    }

    /// Returns the dimension selected for the declension at `index`.
    #[must_use]
    pub fn dimension_at(&self, index: usize) -> Option<DimensionId> {
        self.dimensions()?.get(index).copied()
    }
}

impl fmt::Debug for CombinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CombinationId({:?})", self.0)
    }
}

impl fmt::Display for CombinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CombinationId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for CombinationId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
