//! Reputation deltas, rank progression, and role gating.
//!
//! The engine only computes the NEXT value from the CURRENT one plus an
//! action record; the member registry owns the stored state and applies
//! results atomically. Reputation never goes below zero, and a member can
//! climb at most one rank per evaluation.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::factions::FactionId;

/// Lowest valid rank.
pub const MIN_RANK: u8 = 1;

/// Highest valid rank; members here are never promotion-eligible.
pub const MAX_RANK: u8 = 10;

const DAY: u64 = 24 * 60 * 60;

/// A faction member as stored by the external registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Faction the member belongs to.
    pub faction: FactionId,
    /// Current rank in `1..=10`.
    pub rank: u8,
    /// Current reputation score.
    pub reputation: u64,
    /// Unix time the member joined the faction.
    pub joined_at: u64,
    /// Whether the membership is active.
    pub active: bool,
}

/// Thresholds a member must clear to reach a given rank.
///
/// Derived purely from `(rank, faction)`; recomputed on demand, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRequirements {
    /// Minimum reputation.
    pub reputation_required: u64,
    /// Minimum seconds of faction membership.
    pub time_in_faction_required: u64,
    /// Minimum completed actions.
    pub actions_required: u32,
}

/// Thresholds gating access to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirements {
    /// Minimum rank.
    pub min_rank: u8,
    /// Minimum reputation.
    pub reputation_required: u64,
}

/// Reputation-affecting action kinds.
///
/// Stored action records carry raw ids; ids that do not map to a known
/// action are treated as reputation no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ActionType {
    /// Completed marketplace trade.
    Trade = 1,
    /// Won a faction engagement.
    CombatVictory = 2,
    /// Captured a territory for the faction.
    TerritoryCapture = 3,
    /// Civic work: patrols, aid, infrastructure.
    CommunityService = 4,
    /// Heists, smuggling, racketeering.
    CriminalActivity = 5,
    /// Acting against one's own faction.
    Betrayal = 6,
}

impl ActionType {
    /// Look up an action by raw record id.
    #[must_use]
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Trade),
            2 => Some(Self::CombatVictory),
            3 => Some(Self::TerritoryCapture),
            4 => Some(Self::CommunityService),
            5 => Some(Self::CriminalActivity),
            6 => Some(Self::Betrayal),
            _ => None,
        }
    }

    /// Signed multiplier (percent of action value) for this action when
    /// performed by a member of `faction`.
    ///
    /// Faction overrides replace the base multiplier: criminal activity
    /// amplifies Criminal Syndicate reputation but actively damages Law
    /// Enforcement reputation, community service does the reverse, and
    /// betrayal is negative for everyone.
    #[must_use]
    pub const fn multiplier_percent(self, faction: FactionId) -> i64 {
        match (self, faction) {
            (Self::Trade, _) => 100,

            (Self::CombatVictory, FactionId::Vigilante) => 175,
            (Self::CombatVictory, _) => 150,

            (Self::TerritoryCapture, _) => 200,

            (Self::CommunityService, FactionId::LawEnforcement) => 150,
            (Self::CommunityService, FactionId::CriminalSyndicate) => -50,
            (Self::CommunityService, _) => 100,

            (Self::CriminalActivity, FactionId::CriminalSyndicate) => 200,
            (Self::CriminalActivity, FactionId::LawEnforcement) => -150,
            (Self::CriminalActivity, _) => 100,

            (Self::Betrayal, _) => -300,
        }
    }
}

/// Reputation after applying one action record.
///
/// Unknown action ids are a no-op. The result is clamped at a floor of
/// zero; reputation is never negative.
#[must_use]
pub fn reputation_after_action(
    action_id: u32,
    action_value: u64,
    current_reputation: u64,
    faction: FactionId,
) -> u64 {
    let Some(action) = ActionType::from_id(action_id) else {
        return current_reputation;
    };

    let delta =
        i128::from(action_value) * i128::from(action.multiplier_percent(faction)) / 100;
    let next = i128::from(current_reputation) + delta;
    next.clamp(0, i128::from(u64::MAX)) as u64
}

fn validate_rank(rank: u8) -> Result<()> {
    if rank < MIN_RANK || rank > MAX_RANK {
        return Err(EngineError::InvalidRank(rank));
    }
    Ok(())
}

/// Scale a base threshold by a faction-specific percentage.
fn adjust(base: u64, percent: u64) -> u64 {
    (u128::from(base) * u128::from(percent) / 100) as u64
}

/// Per-faction adjustment percentages for (reputation, time, actions).
///
/// Each faction trades one axis against another: Law Enforcement has a
/// harder reputation bar but a shorter tenure bar, the Syndicate promotes
/// on cheap reputation but demands more completed jobs, Vigilantes wait
/// longer but need fewer actions.
const fn faction_axis_percents(faction: FactionId) -> (u64, u64, u64) {
    match faction {
        FactionId::LawEnforcement => (120, 80, 100),
        FactionId::CriminalSyndicate => (80, 100, 120),
        FactionId::Vigilante => (100, 120, 80),
        FactionId::Neutral => (100, 100, 100),
    }
}

/// Requirements to HOLD the given rank, adjusted for the member's faction.
///
/// Base thresholds: reputation grows quadratically (`100 * rank^2`), tenure
/// linearly (`7 days * rank`), actions linearly (`5 * rank`).
pub fn rank_requirements(rank: u8, faction: FactionId) -> Result<RankRequirements> {
    validate_rank(rank)?;
    let rank_u64 = u64::from(rank);

    let base_reputation = 100 * rank_u64 * rank_u64;
    let base_time = 7 * DAY * rank_u64;
    let base_actions = 5 * rank_u64;

    let (rep_pct, time_pct, action_pct) = faction_axis_percents(faction);

    Ok(RankRequirements {
        reputation_required: adjust(base_reputation, rep_pct),
        time_in_faction_required: adjust(base_time, time_pct),
        actions_required: adjust(base_actions, action_pct) as u32,
    })
}

/// Whether a member is eligible for promotion to the next rank.
///
/// Members at [`MAX_RANK`] are never eligible. Otherwise all three
/// thresholds for `current_rank + 1` must hold simultaneously.
pub fn rank_eligibility(
    current_rank: u8,
    reputation: u64,
    time_in_faction_secs: u64,
    actions_completed: u32,
    faction: FactionId,
) -> Result<bool> {
    validate_rank(current_rank)?;
    if current_rank == MAX_RANK {
        return Ok(false);
    }

    let req = rank_requirements(current_rank + 1, faction)?;
    Ok(reputation >= req.reputation_required
        && time_in_faction_secs >= req.time_in_faction_required
        && actions_completed >= req.actions_required)
}

/// Rank after one promotion evaluation: at most one step up.
pub fn next_rank(
    current_rank: u8,
    reputation: u64,
    time_in_faction_secs: u64,
    actions_completed: u32,
    faction: FactionId,
) -> Result<u8> {
    if rank_eligibility(
        current_rank,
        reputation,
        time_in_faction_secs,
        actions_completed,
        faction,
    )? {
        Ok(current_rank + 1)
    } else {
        Ok(current_rank)
    }
}

/// Thresholds gating a role, by role id band.
///
/// Roles 1-10 are leadership with hardcoded per-role thresholds, 11-20 are
/// specialist roles whose reputation bar is faction-adjusted, and 21+ are
/// general membership roles with a flat minimal bar.
#[must_use]
pub fn role_requirements(role_id: u32, faction: FactionId) -> RoleRequirements {
    match role_id {
        // Leadership band: fixed thresholds per seat.
        1 => RoleRequirements {
            min_rank: 10,
            reputation_required: 10_000,
        },
        2 => RoleRequirements {
            min_rank: 9,
            reputation_required: 8_000,
        },
        3 => RoleRequirements {
            min_rank: 8,
            reputation_required: 6_500,
        },
        4 => RoleRequirements {
            min_rank: 7,
            reputation_required: 5_000,
        },
        5..=10 => RoleRequirements {
            min_rank: 6,
            reputation_required: 3_500,
        },
        // Specialist band: faction-adjusted reputation bar.
        11..=20 => {
            let (rep_pct, _, _) = faction_axis_percents(faction);
            RoleRequirements {
                min_rank: 4,
                reputation_required: adjust(1_500, rep_pct),
            }
        }
        // General band.
        _ => RoleRequirements {
            min_rank: MIN_RANK,
            reputation_required: 100,
        },
    }
}
