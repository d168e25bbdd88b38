//! Core identifiers and error types for PolyGlot.
//!
//! This crate provides:
//! - Typed identifiers ([`WordId`], [`PosId`], [`ClassId`], [`ValueId`], [`RuleId`], ...)
//! - [`CombinationId`] - The key of one cell of an inflectional paradigm
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod combination;
pub mod error;
pub mod id;

pub use combination::CombinationId;
pub use error::{Error, ErrorContext, ErrorKind};
pub use id::{ClassId, DeclensionId, DimensionId, PosId, RuleId, ValueId, WordId};

/// Result type alias using the PolyGlot error type.
pub type Result<T> = std::result::Result<T, Error>;
