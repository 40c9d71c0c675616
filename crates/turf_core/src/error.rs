//! Error types for the faction-economy engine.

use thiserror::Error;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Top-level error type for all engine computations.
///
/// Only genuinely malformed inputs and arithmetic range failures are
/// errors. Degenerate-but-valid inputs (zero amounts, zero totals, zero
/// durations) take explicit early-return-zero paths and never error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Input slices disagree on faction count.
    #[error("Mismatched input lengths: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected number of entries.
        expected: usize,
        /// Actual number of entries.
        actual: usize,
    },

    /// A basis-point argument exceeds its 10000 denominator.
    #[error("Basis points out of range: {value} > 10000 ({context})")]
    BasisPointsOutOfRange {
        /// The offending value.
        value: u64,
        /// What the value parameterizes.
        context: &'static str,
    },

    /// A percentage argument exceeds 100.
    #[error("Percentage out of range: {value} > 100 ({context})")]
    PercentOutOfRange {
        /// The offending value.
        value: u64,
        /// What the value parameterizes.
        context: &'static str,
    },

    /// Per-faction stakes do not sum to the supplied total.
    #[error("Stake totals inconsistent: entries sum to {sum}, total given as {total}")]
    StakeTotalMismatch {
        /// Sum of the per-faction entries.
        sum: u128,
        /// Total supplied by the caller.
        total: u128,
    },

    /// A rank outside the valid `1..=10` domain.
    #[error("Invalid rank: {0} (valid ranks are 1..=10)")]
    InvalidRank(u8),

    /// Fixed-point arithmetic overflowed.
    ///
    /// The whole call must be treated as failed with no partial result.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// Division by zero where a nonzero denominator is required.
    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),
}
