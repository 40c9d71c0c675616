//! Test fixtures and helpers.
//!
//! Canonical engine inputs for consistent testing across crates.

use turf_core::factions::{FactionId, FACTION_SLOTS};
use turf_core::fees::FeeDistributionPercentages;
use turf_core::math::PRECISION;
use turf_core::reputation::Member;
use turf_core::staking::Stake;

/// Scale an integer token amount to fixed-point precision.
#[must_use]
pub fn tokens(n: u128) -> u128 {
    n * PRECISION
}

/// A contested three-way influence split: 60% / 30% / 10%.
#[must_use]
pub fn majority_stakes() -> ([u128; FACTION_SLOTS], u128) {
    ([0, 600, 300, 100], 1_000)
}

/// A dead-heat influence split with no majority holder.
#[must_use]
pub fn deadlock_stakes() -> ([u128; FACTION_SLOTS], u128) {
    ([0, 400, 400, 200], 1_000)
}

/// The default marketplace fee split: 40% dao, 30% territory,
/// 20% seller faction, 10% burn.
#[must_use]
pub fn default_fee_splits() -> FeeDistributionPercentages {
    FeeDistributionPercentages {
        dao_bp: 4_000,
        territory_bp: 3_000,
        seller_faction_bp: 2_000,
        burn_bp: 1_000,
    }
}

/// A month-old active stake held for the Syndicate.
#[must_use]
pub fn syndicate_stake(start_time: u64) -> Stake {
    Stake {
        owner_id: 1,
        territory_id: 7,
        amount: tokens(10_000),
        faction: FactionId::CriminalSyndicate,
        start_time,
        last_claim_time: start_time,
        active: true,
    }
}

/// A mid-rank Law Enforcement member.
#[must_use]
pub fn veteran_officer(joined_at: u64) -> Member {
    Member {
        faction: FactionId::LawEnforcement,
        rank: 5,
        reputation: 5_000,
        joined_at,
        active: true,
    }
}
