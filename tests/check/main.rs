//! Integration tests for Layer 3: Check
//!
//! Tests for the validation pass over whole languages and the background worker.

mod sweeps;
mod worker;
