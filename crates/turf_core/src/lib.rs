//! # Turf Core
//!
//! Deterministic faction-economy computation engine for Turf Wars.
//!
//! This crate contains **only** deterministic logic:
//! - No storage
//! - No IO
//! - No system randomness
//! - No floating-point math (uses fixed-point)
//!
//! This separation enables:
//! - Identical results on every host and on re-execution
//! - Pull-based accounting (callers own all state)
//! - Replayable conflict resolution from recorded seeds
//! - Property-based conservation testing
//!
//! ## Crate Structure
//!
//! - [`math`] - Fixed-point math utilities
//! - [`factions`] - Faction identifiers
//! - [`territory`] - Control and contest assessment
//! - [`staking`] - Stake rewards and penalties
//! - [`fees`] - Marketplace fees and transaction taxes
//! - [`revenue`] - Revenue splits and territory valuation
//! - [`reputation`] - Reputation, ranks, and role gating
//! - [`conflict`] - Seeded engagement resolution
//! - [`attributes`] - Named per-entity scaled values

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod attributes;
pub mod conflict;
pub mod error;
pub mod factions;
pub mod fees;
pub mod math;
pub mod reputation;
pub mod revenue;
pub mod staking;
pub mod territory;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::attributes::AttributeStore;
    pub use crate::conflict::{
        resolve_conflict, CombatRole, ConflictOutcome, ConflictWinner,
    };
    pub use crate::error::{EngineError, Result};
    pub use crate::factions::{FactionId, FACTION_COUNT, FACTION_SLOTS};
    pub use crate::fees::{
        distribute_tax, marketplace_fee, transaction_tax, FeeDistributionPercentages,
        MarketplaceFee, TaxDistribution,
    };
    pub use crate::math::{exp_decay, mul_div, sqrt, BPS_DENOMINATOR, PRECISION};
    pub use crate::reputation::{
        rank_eligibility, reputation_after_action, role_requirements, ActionType, Member,
        RankRequirements, RoleRequirements,
    };
    pub use crate::revenue::{
        anti_monopoly_adjustment, revenue_distribution, territory_value, RevenueDistribution,
    };
    pub use crate::staking::{
        emergency_withdrawal_penalty, pending_reward, staking_reward, Stake,
    };
    pub use crate::territory::{
        assess_territory, contested_status, controlling_faction, ContestDecision,
        ControlDecision, TerritoryControlState,
    };
}
