//! Determinism testing utilities.
//!
//! Provides a harness for verifying that engine computations produce
//! identical results given identical inputs.
//!
//! # Testing Strategy
//!
//! Economic computations must be 100% reproducible so that any host can
//! re-derive a settlement from recorded inputs. Sources of non-determinism
//! include:
//!
//! - **Floating-point math**: Different CPUs can produce different results.
//!   We use integer fixed-point arithmetic throughout.
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Stores iterate in sorted key order (`BTreeMap`).
//!
//! - **System randomness**: No entropy inside the engine. All "random"
//!   behavior derives from caller-supplied seeds.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: Individual operations recompute identically
//! 2. **Property tests**: Random inputs must still produce deterministic outputs
//! 3. **Serialization tests**: Encoded snapshots are byte-stable

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use turf_core::factions::{FactionId, FACTION_SLOTS};

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic computation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the computation was deterministic, with a detailed message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Computation is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a computation multiple times and verify all outputs hash identically.
///
/// # Example
///
/// ```
/// use turf_test_utils::determinism::verify_determinism;
/// use turf_core::math::sqrt;
///
/// let result = verify_determinism(5, || sqrt(1u128 << 40));
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<T, F>(runs: usize, compute: F) -> DeterminismResult
where
    T: Hash,
    F: Fn() -> T,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let output = compute();
        let mut hasher = DefaultHasher::new();
        output.hash(&mut hasher);
        hashes.push(hasher.finish());
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Verify that serializing a value twice yields identical bytes.
///
/// Catches unordered containers leaking into snapshot types.
///
/// # Panics
///
/// Panics if serialization fails.
#[must_use]
pub fn verify_serialization_determinism<T: Serialize>(value: &T) -> bool {
    let first = bincode::serialize(value).expect("serialization failed");
    let second = bincode::serialize(value).expect("serialization failed");
    first == second
}

/// Proptest strategies for engine inputs.
pub mod strategies {
    use super::{FactionId, FACTION_SLOTS};
    use proptest::prelude::*;

    /// Largest amount the strategies generate. Keeps products of two
    /// generated values inside `u128` so intermediate multiplications in
    /// the engine cannot overflow.
    pub const MAX_AMOUNT: u128 = 1_000_000_000_000_000_000;

    /// Token or currency amounts.
    pub fn amount() -> impl Strategy<Value = u128> {
        0u128..=MAX_AMOUNT
    }

    /// Valid basis-point values.
    pub fn basis_points() -> impl Strategy<Value = u64> {
        0u64..=10_000
    }

    /// Valid percent values.
    pub fn percent() -> impl Strategy<Value = u64> {
        0u64..=100
    }

    /// Any faction, aligned or neutral.
    pub fn any_faction() -> impl Strategy<Value = FactionId> {
        prop::sample::select(vec![
            FactionId::Neutral,
            FactionId::LawEnforcement,
            FactionId::CriminalSyndicate,
            FactionId::Vigilante,
        ])
    }

    /// One of the three aligned factions.
    pub fn aligned_faction() -> impl Strategy<Value = FactionId> {
        prop::sample::select(FactionId::ALL.to_vec())
    }

    /// A per-faction stake array (neutral slot zero) with its exact total.
    pub fn stakes_with_total() -> impl Strategy<Value = ([u128; FACTION_SLOTS], u128)> {
        (amount(), amount(), amount()).prop_map(|(a, b, c)| {
            let stakes = [0, a, b, c];
            (stakes, a + b + c)
        })
    }
}
