//! Staking yield, early-exit penalties, and lock-period multipliers.
//!
//! Rewards are pull-model: they are computed on demand from a stake's
//! `last_claim_time`, never accrued by a background process. Callers must
//! compute the pending reward before any state change that resets
//! `last_claim_time`, or the unclaimed span is lost.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::factions::FactionId;
use crate::math::{self, BPS_DENOMINATOR, PRECISION, SECONDS_PER_YEAR};

/// Penalty charged when almost fully vested: 5% in basis points.
pub const MIN_PENALTY_BP: u64 = 500;

/// Penalty charged when exiting immediately after staking: 50%.
pub const MAX_PENALTY_BP: u64 = 5_000;

/// Lock periods below one week earn no period multiplier.
pub const MIN_STAKE_PERIOD: u64 = 7 * 24 * 60 * 60;

/// Lock periods are clamped to one year for multiplier purposes.
pub const MAX_STAKE_PERIOD: u64 = SECONDS_PER_YEAR;

/// Hard cap on the combined period multiplier: 3.0 scaled.
pub const MAX_MULTIPLIER: u128 = 3 * PRECISION;

/// Territory-value scores at or above this cap yield the full 2.0x
/// territory multiplier.
pub const TERRITORY_SCORE_CAP: u128 = 10_000;

/// A stake locked against a territory.
///
/// Owned by the external ledger; the engine only reads it. Aggregated
/// per-faction amount vectors for control decisions are the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    /// Ledger id of the staking player.
    pub owner_id: u64,
    /// Territory the stake is locked against.
    pub territory_id: u64,
    /// Staked amount in smallest token units.
    pub amount: u128,
    /// Faction the stake is attributed to.
    pub faction: FactionId,
    /// Unix time the stake was created.
    pub start_time: u64,
    /// Unix time rewards were last claimed.
    pub last_claim_time: u64,
    /// Whether the stake is still live.
    pub active: bool,
}

fn validate_bp(value: u64, context: &'static str) -> Result<()> {
    if value > BPS_DENOMINATOR {
        return Err(EngineError::BasisPointsOutOfRange { value, context });
    }
    Ok(())
}

/// Territory multiplier in `[1.0, 2.0]` scaled, linear in the value score.
fn territory_multiplier(territory_score: u128) -> Result<u128> {
    let capped = math::min(territory_score, TERRITORY_SCORE_CAP);
    let bonus = math::mul_div(capped, PRECISION, TERRITORY_SCORE_CAP, "territory multiplier")?;
    PRECISION
        .checked_add(bonus)
        .ok_or(EngineError::Overflow("territory multiplier"))
}

/// Faction multiplier `(100 + bonus) / 100` scaled; not capped beyond the
/// raw input range.
fn faction_multiplier(faction_bonus_percent: u64) -> Result<u128> {
    let numerator = 100u128
        .checked_add(u128::from(faction_bonus_percent))
        .ok_or(EngineError::Overflow("faction multiplier"))?;
    math::mul_div(numerator, PRECISION, 100, "faction multiplier")
}

/// Compute the staking yield for a stake span.
///
/// `reward = annual_rate * amount * (duration / year)` scaled by the
/// territory multiplier (linear in `territory_score`, capped at 2.0x) and
/// the faction multiplier. Zero amount or zero duration short-circuits to
/// zero without further computation.
pub fn staking_reward(
    amount: u128,
    duration_secs: u64,
    annual_rate_bp: u64,
    territory_score: u128,
    faction_bonus_percent: u64,
) -> Result<u128> {
    validate_bp(annual_rate_bp, "annual rate")?;

    if amount == 0 || duration_secs == 0 {
        return Ok(0);
    }

    let annual = math::mul_div(
        amount,
        u128::from(annual_rate_bp),
        u128::from(BPS_DENOMINATOR),
        "base reward",
    )?;
    let base = math::mul_div(
        annual,
        u128::from(duration_secs),
        u128::from(SECONDS_PER_YEAR),
        "base reward",
    )?;

    let with_territory = math::mul_div(
        base,
        territory_multiplier(territory_score)?,
        PRECISION,
        "reward territory scaling",
    )?;
    math::mul_div(
        with_territory,
        faction_multiplier(faction_bonus_percent)?,
        PRECISION,
        "reward faction scaling",
    )
}

/// Apply exponential emission decay to an annual rate.
///
/// `decay_rate_scaled` is the PRECISION-scaled annual decay constant and
/// `elapsed_secs` the age of the emission schedule. The result feeds
/// [`staking_reward`] as its `annual_rate_bp`.
pub fn decayed_annual_rate(
    base_rate_bp: u64,
    decay_rate_scaled: u128,
    elapsed_secs: u64,
) -> Result<u64> {
    validate_bp(base_rate_bp, "base emission rate")?;
    let factor = math::exp_decay(decay_rate_scaled, elapsed_secs)?;
    let decayed = math::mul_div(u128::from(base_rate_bp), factor, PRECISION, "decayed rate")?;
    // factor <= PRECISION, so the result still fits in basis points.
    Ok(decayed as u64)
}

/// Reward accrued by a stake since its last claim, as of `now`.
///
/// Inactive stakes and non-positive spans yield zero.
pub fn pending_reward(
    stake: &Stake,
    now: u64,
    annual_rate_bp: u64,
    territory_score: u128,
    faction_bonus_percent: u64,
) -> Result<u128> {
    if !stake.active || now <= stake.last_claim_time {
        return Ok(0);
    }
    staking_reward(
        stake.amount,
        now - stake.last_claim_time,
        annual_rate_bp,
        territory_score,
        faction_bonus_percent,
    )
}

/// Early-exit penalty in basis points.
///
/// Zero once fully vested; otherwise linear between [`MIN_PENALTY_BP`] and
/// [`MAX_PENALTY_BP`] in the fraction of lock time REMAINING — the longer
/// the remaining lock, the higher the penalty.
pub fn emergency_withdrawal_penalty(original_period: u64, time_staked: u64) -> Result<u64> {
    if time_staked >= original_period {
        return Ok(0);
    }
    // original_period > time_staked >= 0 here, so the period is nonzero.
    let remaining = u128::from(original_period - time_staked);
    let span = u128::from(MAX_PENALTY_BP - MIN_PENALTY_BP);
    let scaled = math::mul_div(span, remaining, u128::from(original_period), "exit penalty")?;
    Ok(MIN_PENALTY_BP + scaled as u64)
}

/// Reward multiplier earned by committing to a lock period.
///
/// Below [`MIN_STAKE_PERIOD`] the multiplier is flat 1.0 — a stake that is
/// refundable at will earns no commitment bonus. Above it, the multiplier
/// ramps linearly from 1.0 to 2.0 at [`MAX_STAKE_PERIOD`] (longer periods
/// clamp), is scaled by `(100 + faction_bonus) / 100`, and is finally
/// capped at [`MAX_MULTIPLIER`].
pub fn stake_period_multiplier(period_secs: u64, faction_bonus_percent: u64) -> Result<u128> {
    if period_secs < MIN_STAKE_PERIOD {
        return Ok(PRECISION);
    }

    let clamped = period_secs.min(MAX_STAKE_PERIOD);
    let ramp = math::mul_div(
        u128::from(clamped - MIN_STAKE_PERIOD),
        PRECISION,
        u128::from(MAX_STAKE_PERIOD - MIN_STAKE_PERIOD),
        "period multiplier",
    )?;
    let base = PRECISION
        .checked_add(ramp)
        .ok_or(EngineError::Overflow("period multiplier"))?;
    let boosted = math::mul_div(
        base,
        100 + u128::from(faction_bonus_percent),
        100,
        "period multiplier bonus",
    )?;
    Ok(math::min(boosted, MAX_MULTIPLIER))
}
