//! Inflectional paradigms.
//!
//! A paradigm is the ordered list of declensions of one part of speech.
//! Dimensional declensions (tense, number, ...) combine as a cartesian
//! product; singleton declensions (gerund, ...) each add one stand-alone cell.

use polyglot_foundation::{CombinationId, DeclensionId, DimensionId};

/// One value of a dimensional declension.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    /// Identifier, unique within its declension.
    pub id: DimensionId,
    /// Display name.
    pub name: String,
}

/// Shape of a declension.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclensionKind {
    /// Combines with the other dimensional declensions.
    Dimensional(Vec<Dimension>),
    /// Stands alone as a single cell.
    Singleton,
}

/// One axis of a paradigm.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declension {
    /// Identifier, unique within the paradigm.
    pub id: DeclensionId,
    /// Display name.
    pub name: String,
    /// Dimensional or singleton.
    pub kind: DeclensionKind,
}

impl Declension {
    /// Returns true for singleton declensions.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        matches!(self.kind, DeclensionKind::Singleton)
    }

    /// Dimensions of a dimensional declension (empty for singletons).
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        match &self.kind {
            DeclensionKind::Dimensional(dimensions) => dimensions,
            DeclensionKind::Singleton => &[],
        }
    }
}

/// One cell of a paradigm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combination {
    /// Key used by rules and stored forms.
    pub id: CombinationId,
    /// Dimension names joined by spaces, or the singleton's name.
    pub label: String,
}

/// Ordered declensions of a part of speech.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paradigm {
    declensions: Vec<Declension>,
}

impl Paradigm {
    /// Creates an empty paradigm.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_declension_id(&self) -> DeclensionId {
        let max = self.declensions.iter().map(|d| d.id.raw()).max().unwrap_or(0);
        DeclensionId(max + 1)
    }

    /// Appends a dimensional declension with dimensions numbered from 1.
    pub fn add_dimensional<S: AsRef<str>>(&mut self, name: impl Into<String>, dimensions: &[S]) -> DeclensionId {
        let id = self.next_declension_id();
        let dimensions = (1..)
            .zip(dimensions)
            .map(|(raw, dim_name)| Dimension {
                id: DimensionId(raw),
                name: dim_name.as_ref().to_string(),
            })
            .collect();
        self.declensions.push(Declension {
            id,
            name: name.into(),
            kind: DeclensionKind::Dimensional(dimensions),
        });
        id
    }

    /// Appends a singleton declension.
    pub fn add_singleton(&mut self, name: impl Into<String>) -> DeclensionId {
        let id = self.next_declension_id();
        self.declensions.push(Declension {
            id,
            name: name.into(),
            kind: DeclensionKind::Singleton,
        });
        id
    }

    /// Builder form of [`Paradigm::add_dimensional`].
    #[must_use]
    pub fn with_dimensional<S: AsRef<str>>(mut self, name: impl Into<String>, dimensions: &[S]) -> Self {
        self.add_dimensional(name, dimensions);
        self
    }

    /// Builder form of [`Paradigm::add_singleton`].
    #[must_use]
    pub fn with_singleton(mut self, name: impl Into<String>) -> Self {
        self.add_singleton(name);
        self
    }

    /// Removes a declension. Returns it if it existed.
    pub fn remove_declension(&mut self, id: DeclensionId) -> Option<Declension> {
        let index = self.declensions.iter().position(|d| d.id == id)?;
        Some(self.declensions.remove(index))
    }

    /// Declensions in order.
    #[must_use]
    pub fn declensions(&self) -> &[Declension] {
        &self.declensions
    }

    /// Dimensional declensions in order; their position is the index used
    /// by combination ids.
    pub fn dimensional(&self) -> impl Iterator<Item = &Declension> {
        self.declensions.iter().filter(|d| !d.is_singleton())
    }

    /// Every combination: the dimensional product first, then singletons.
    ///
    /// A dimensional declension with no dimensions empties the product.
    #[must_use]
    pub fn combinations(&self) -> Vec<Combination> {
        let axes: Vec<&Declension> = self.dimensional().collect();
        let mut cells: Vec<(Vec<DimensionId>, Vec<&str>)> = Vec::new();
        if !axes.is_empty() {
            cells.push((Vec::new(), Vec::new()));
            for axis in axes {
                let dimensions = axis.dimensions();
                cells = cells
                    .into_iter()
                    .flat_map(|(ids, names)| {
                        dimensions.iter().map(move |dim| {
                            let mut ids = ids.clone();
                            let mut names = names.clone();
                            ids.push(dim.id);
                            names.push(dim.name.as_str());
                            (ids, names)
                        })
                    })
                    .collect();
            }
        }

        let mut combinations: Vec<Combination> = cells
            .into_iter()
            .map(|(ids, names)| Combination {
                id: CombinationId::from_dimensions(&ids),
                label: names.join(" "),
            })
            .collect();
        combinations.extend(
            self.declensions
                .iter()
                .filter(|d| d.is_singleton())
                .map(|d| Combination {
                    id: CombinationId::singleton(d.id),
                    label: d.name.clone(),
                }),
        );
        combinations
    }

    /// Returns true if `id` names a cell of this paradigm.
    #[must_use]
    pub fn contains(&self, id: &CombinationId) -> bool {
        self.label(id).is_some()
    }

    /// Label of a combination, or `None` if it is not a cell of this paradigm.
    #[must_use]
    pub fn label(&self, id: &CombinationId) -> Option<String> {
        if id.is_singleton() {
            return self
                .declensions
                .iter()
                .find(|d| d.is_singleton() && CombinationId::singleton(d.id) == *id)
                .map(|d| d.name.clone());
        }

        let selected = id.dimensions()?;
        let axes: Vec<&Declension> = self.dimensional().collect();
        if axes.is_empty() || selected.len() != axes.len() {
            return None;
        }
        let names = axes
            .iter()
            .zip(&selected)
            .map(|(axis, dim)| {
                axis.dimensions()
                    .iter()
                    .find(|d| d.id == *dim)
                    .map(|d| d.name.as_str())
            })
            .collect::<Option<Vec<_>>>()?;
        Some(names.join(" "))
    }
}
