//! # Turf Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Determinism test harness
//! - Conservation checkers for value splits
//! - Canonical fixtures
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod conservation;
pub mod determinism;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;
