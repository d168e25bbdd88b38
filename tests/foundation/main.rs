//! Integration tests for Layer 0: Foundation
//!
//! Tests for identifiers, combination ids and errors.

mod combinations;
mod errors;
