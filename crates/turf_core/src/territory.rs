//! Territory control evaluation.
//!
//! Control is always derived on demand from the current per-faction stake
//! totals supplied by the caller. The engine never caches a control
//! decision: a stale decision applied after a concurrent stake change is a
//! caller-side serialization bug, not something this module can detect.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::factions::{FactionId, FACTION_SLOTS};
use crate::math;

/// Dominance below this percentage is always contested, regardless of the
/// gap to the runner-up.
pub const CONTESTED_MAJORITY_PERCENT: u64 = 50;

/// Outcome of a controlling-faction evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlDecision {
    /// Faction holding control, or `Neutral` when no faction clears the
    /// threshold. Partial dominance does not grant control.
    pub controlling_faction: FactionId,
    /// Highest faction's share of total stake, in whole percent.
    pub control_percent: u64,
    /// Whether the highest faction cleared the control threshold.
    pub has_control: bool,
}

/// Outcome of a contested-status evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestDecision {
    /// Faction with the largest stake (first-seen wins exact ties).
    pub dominant_faction: FactionId,
    /// Faction with the second-largest stake.
    pub challenger_faction: FactionId,
    /// Dominant faction's share in whole percent.
    pub dominant_percent: u64,
    /// Challenger faction's share in whole percent.
    pub challenger_percent: u64,
    /// Whether the territory counts as contested.
    pub is_contested: bool,
}

/// Combined control state for a territory, derived and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryControlState {
    /// Controlling faction (`Neutral` if none clears the threshold).
    pub controlling_faction: FactionId,
    /// Controlling faction's share in whole percent.
    pub control_percentage: u64,
    /// Whether the territory is contested.
    pub is_contested: bool,
    /// Faction with the largest stake.
    pub dominant_faction: FactionId,
    /// Faction with the second-largest stake.
    pub challenger_faction: FactionId,
}

fn validate_stakes(stakes: &[u128; FACTION_SLOTS], total_staked: u128) -> Result<()> {
    let mut sum: u128 = 0;
    for &stake in stakes {
        sum = sum
            .checked_add(stake)
            .ok_or(EngineError::Overflow("stake sum"))?;
    }
    if sum != total_staked {
        return Err(EngineError::StakeTotalMismatch {
            sum,
            total: total_staked,
        });
    }
    Ok(())
}

fn validate_percent(value: u64, context: &'static str) -> Result<()> {
    if value > 100 {
        return Err(EngineError::PercentOutOfRange { value, context });
    }
    Ok(())
}

fn share_percent(stake: u128, total: u128) -> Result<u64> {
    // total > 0 checked by callers; result is <= 100 and fits u64.
    Ok(math::mul_div(stake, 100, total, "stake share")? as u64)
}

/// Determine which faction controls a territory.
///
/// The faction with the maximal stake wins; exact ties go to the
/// lowest-indexed faction (ascending scan with strict `>`). Control is only
/// granted when that faction's share reaches `threshold_percent`; below the
/// threshold the controlling faction resets to `Neutral` even though a
/// maximal stake exists.
pub fn controlling_faction(
    stakes: &[u128; FACTION_SLOTS],
    total_staked: u128,
    threshold_percent: u64,
) -> Result<ControlDecision> {
    validate_percent(threshold_percent, "control threshold")?;
    validate_stakes(stakes, total_staked)?;

    if total_staked == 0 {
        return Ok(ControlDecision {
            controlling_faction: FactionId::Neutral,
            control_percent: 0,
            has_control: false,
        });
    }

    let mut leader = FactionId::Neutral;
    let mut highest: u128 = 0;
    for faction in FactionId::ALL {
        let stake = stakes[faction.id() as usize];
        if stake > highest {
            highest = stake;
            leader = faction;
        }
    }

    let control_percent = share_percent(highest, total_staked)?;
    let has_control = control_percent >= threshold_percent;

    Ok(ControlDecision {
        controlling_faction: if has_control {
            leader
        } else {
            FactionId::Neutral
        },
        control_percent,
        has_control,
    })
}

/// Determine whether a territory is contested.
///
/// A single linear scan tracks the top two factions. The territory is
/// contested when the dominant share is below 50%, or when the lead over
/// the challenger is narrower than `contest_gap_percent` — a faction can
/// hold a majority and still be contested if the runner-up is close.
pub fn contested_status(
    stakes: &[u128; FACTION_SLOTS],
    total_staked: u128,
    contest_gap_percent: u64,
) -> Result<ContestDecision> {
    validate_percent(contest_gap_percent, "contest gap")?;
    validate_stakes(stakes, total_staked)?;

    if total_staked == 0 {
        return Ok(ContestDecision {
            dominant_faction: FactionId::Neutral,
            challenger_faction: FactionId::Neutral,
            dominant_percent: 0,
            challenger_percent: 0,
            is_contested: false,
        });
    }

    let mut dominant = FactionId::Neutral;
    let mut dominant_stake: u128 = 0;
    let mut challenger = FactionId::Neutral;
    let mut challenger_stake: u128 = 0;

    for faction in FactionId::ALL {
        let stake = stakes[faction.id() as usize];
        if stake > dominant_stake {
            challenger = dominant;
            challenger_stake = dominant_stake;
            dominant = faction;
            dominant_stake = stake;
        } else if stake > challenger_stake {
            challenger = faction;
            challenger_stake = stake;
        }
    }

    let dominant_percent = share_percent(dominant_stake, total_staked)?;
    let challenger_percent = share_percent(challenger_stake, total_staked)?;
    let is_contested = dominant_percent < CONTESTED_MAJORITY_PERCENT
        || dominant_percent - challenger_percent < contest_gap_percent;

    Ok(ContestDecision {
        dominant_faction: dominant,
        challenger_faction: challenger,
        dominant_percent,
        challenger_percent,
        is_contested,
    })
}

/// Full control assessment: controlling faction plus contested status.
pub fn assess_territory(
    stakes: &[u128; FACTION_SLOTS],
    total_staked: u128,
    threshold_percent: u64,
    contest_gap_percent: u64,
) -> Result<TerritoryControlState> {
    let control = controlling_faction(stakes, total_staked, threshold_percent)?;
    let contest = contested_status(stakes, total_staked, contest_gap_percent)?;

    tracing::debug!(
        controlling = ?control.controlling_faction,
        percent = control.control_percent,
        contested = contest.is_contested,
        "Territory control assessed"
    );

    Ok(TerritoryControlState {
        controlling_faction: control.controlling_faction,
        control_percentage: control.control_percent,
        is_contested: contest.is_contested,
        dominant_faction: contest.dominant_faction,
        challenger_faction: contest.challenger_faction,
    })
}
