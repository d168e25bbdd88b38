//! Language validation for PolyGlot.
//!
//! This crate provides:
//! - [`check_all`] - The validation pass over a whole language
//! - [`Problem`] - One finding, with category, severity and details
//! - [`spawn_check`] / [`CheckHandle`] - The pass on a background worker

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod checker;
pub mod problem;
pub mod worker;

pub use checker::check_all;
pub use problem::{Problem, ProblemCategory, ProblemKind, Severity, Subject, has_errors};
pub use worker::{CheckHandle, spawn_check};

pub use polyglot_foundation::{Error, ErrorKind, Result};
