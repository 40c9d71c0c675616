//! Revenue distribution across factions, anti-monopoly dampening, and
//! territory valuation.
//!
//! Distribution here is the conservation-critical path: every split must
//! account for the input total to the last unit, with remainders assigned
//! to a single deterministic recipient.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::factions::FACTION_COUNT;
use crate::math::{self, BPS_DENOMINATOR};

/// Floor applied to any faction share backed by nonzero influence.
///
/// Skipped entirely when the distributable pool is too small to honor the
/// floors without exceeding it.
pub const MINIMUM_DISTRIBUTION: u128 = 100;

/// Economic-activity bonus to territory value is capped at +100%.
pub const ACTIVITY_BONUS_CAP_BP: u128 = 10_000;

/// Control-duration bonus to territory value is capped at +50%.
pub const DURATION_BONUS_CAP_BP: u128 = 5_000;

/// Basis points of duration bonus per square root of a control block.
pub const DURATION_BONUS_PER_SQRT_BLOCK_BP: u128 = 50;

/// Contested territories are valued at 70% (a flat 30% penalty).
pub const CONTESTED_PENALTY_NUMERATOR: u128 = 70;

/// A revenue pool split across dao, burn, and faction shares.
///
/// `dao + burn + sum(faction_shares) == total`, always.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueDistribution {
    /// Dao reserve taken off the top.
    pub dao: u128,
    /// Burned amount taken off the top.
    pub burn: u128,
    /// Per-faction shares, in the order of the input influence slice.
    pub faction_shares: Vec<u128>,
}

impl RevenueDistribution {
    /// Total value accounted for by this distribution.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.dao + self.burn + self.faction_shares.iter().sum::<u128>()
    }
}

fn validate_bp(value: u64, context: &'static str) -> Result<()> {
    if value > BPS_DENOMINATOR {
        return Err(EngineError::BasisPointsOutOfRange { value, context });
    }
    Ok(())
}

/// Index of the highest entry, first-seen winning exact ties.
fn top_index(values: &[u128]) -> usize {
    let mut top = 0;
    for (i, &value) in values.iter().enumerate() {
        if value > values[top] {
            top = i;
        }
    }
    top
}

/// Split a revenue pool across factions proportional to influence.
///
/// Dao and burn reserves come off the top. With zero total influence the
/// remainder is split equally, division remainder to faction index 0.
/// Otherwise shares are proportional to influence, any faction with nonzero
/// influence is floored at [`MINIMUM_DISTRIBUTION`] (when the pool can bear
/// it), and the residual from rounding or floor bumps is assigned to the
/// single highest-influence faction.
pub fn revenue_distribution(
    total: u128,
    influence: &[u128],
    dao_bp: u64,
    burn_bp: u64,
) -> Result<RevenueDistribution> {
    validate_bp(dao_bp, "revenue dao reserve")?;
    validate_bp(burn_bp, "revenue burn reserve")?;
    validate_bp(dao_bp + burn_bp, "revenue reserves")?;
    if influence.is_empty() {
        return Err(EngineError::LengthMismatch {
            expected: FACTION_COUNT,
            actual: 0,
        });
    }

    let dao = math::mul_div(
        total,
        u128::from(dao_bp),
        u128::from(BPS_DENOMINATOR),
        "dao reserve",
    )?;
    let burn = math::mul_div(
        total,
        u128::from(burn_bp),
        u128::from(BPS_DENOMINATOR),
        "burn reserve",
    )?;
    let pool = total - dao - burn;

    let mut total_influence: u128 = 0;
    for &inf in influence {
        total_influence = total_influence
            .checked_add(inf)
            .ok_or(EngineError::Overflow("influence sum"))?;
    }

    let mut shares = vec![0u128; influence.len()];

    if total_influence == 0 {
        let equal = pool / influence.len() as u128;
        for share in &mut shares {
            *share = equal;
        }
        shares[0] += pool - equal * influence.len() as u128;
        return Ok(RevenueDistribution {
            dao,
            burn,
            faction_shares: shares,
        });
    }

    for (share, &inf) in shares.iter_mut().zip(influence) {
        *share = math::mul_div(pool, inf, total_influence, "proportional share")?;
    }

    // The highest-influence faction absorbs all residue: rounding dust and
    // the cost of floor bumps both come out of (or land in) its share.
    let top = top_index(influence);

    let mut floored = shares.clone();
    for (share, &inf) in floored.iter_mut().zip(influence) {
        if inf > 0 && *share < MINIMUM_DISTRIBUTION {
            *share = MINIMUM_DISTRIBUTION;
        }
    }
    let floored_others: u128 = floored
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != top)
        .map(|(_, &s)| s)
        .sum();
    if floored_others <= pool {
        shares = floored;
        shares[top] = pool - floored_others;
    } else {
        // Pool too small to honor the floors: distribute proportionally.
        let raw_others: u128 = shares
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != top)
            .map(|(_, &s)| s)
            .sum();
        shares[top] = pool - raw_others;
    }

    Ok(RevenueDistribution {
        dao,
        burn,
        faction_shares: shares,
    })
}

/// Dampen a dominant share down toward a target dominance level.
///
/// No-op when current dominance is already at or below the target.
/// Otherwise a proportional amount is removed from the top share and
/// redistributed across the remaining nonzero shares proportional to their
/// size (equally across the other slots when none are eligible), with any
/// rounding leftover given to the first eligible nondominant share in scan
/// order. The sum of shares is preserved exactly.
pub fn anti_monopoly_adjustment(
    shares: &[u128],
    dominance_bp: u64,
    target_bp: u64,
) -> Result<Vec<u128>> {
    validate_bp(dominance_bp, "current dominance")?;
    validate_bp(target_bp, "target dominance")?;

    let mut adjusted = shares.to_vec();
    if dominance_bp <= target_bp || shares.len() < 2 {
        return Ok(adjusted);
    }

    let top = top_index(shares);
    if shares[top] == 0 {
        return Ok(adjusted);
    }

    let excess_bp = u128::from(dominance_bp - target_bp);
    let reduction = math::mul_div(
        shares[top],
        excess_bp,
        u128::from(dominance_bp),
        "monopoly reduction",
    )?;
    if reduction == 0 {
        return Ok(adjusted);
    }

    tracing::debug!(
        top_index = top,
        reduction,
        dominance_bp,
        target_bp,
        "Anti-monopoly dampening applied"
    );

    adjusted[top] -= reduction;

    let others_total: u128 = shares
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != top)
        .map(|(_, &s)| s)
        .sum();

    let mut distributed: u128 = 0;
    if others_total > 0 {
        for (i, share) in adjusted.iter_mut().enumerate() {
            if i == top || shares[i] == 0 {
                continue;
            }
            let portion = math::mul_div(reduction, shares[i], others_total, "monopoly share")?;
            *share += portion;
            distributed += portion;
        }
    } else {
        let others = (shares.len() - 1) as u128;
        let equal = reduction / others;
        for (i, share) in adjusted.iter_mut().enumerate() {
            if i != top {
                *share += equal;
                distributed += equal;
            }
        }
    }

    // Rounding leftover goes to the first nondominant share that took part
    // in the redistribution (scan order).
    let leftover = reduction - distributed;
    if leftover > 0 {
        for (i, share) in adjusted.iter_mut().enumerate() {
            if i == top {
                continue;
            }
            if others_total == 0 || shares[i] > 0 {
                *share += leftover;
                break;
            }
        }
    }

    Ok(adjusted)
}

/// Value a territory from its base worth, activity, and control history.
///
/// The multiplier starts at 100% and gains an activity bonus (capped at
/// +100%) plus a control-duration bonus scaling with the square root of the
/// duration (capped at +50%, so longevity pays with diminishing returns).
/// Contested territories take a flat 30% penalty on the whole multiplier.
pub fn territory_value(
    base_value: u128,
    economic_activity_bp: u128,
    control_duration_blocks: u64,
    is_contested: bool,
) -> Result<u128> {
    let activity_bonus = math::min(economic_activity_bp, ACTIVITY_BONUS_CAP_BP);
    let duration_bonus = math::min(
        math::sqrt(u128::from(control_duration_blocks))
            .checked_mul(DURATION_BONUS_PER_SQRT_BLOCK_BP)
            .ok_or(EngineError::Overflow("duration bonus"))?,
        DURATION_BONUS_CAP_BP,
    );

    let mut multiplier_bp = u128::from(BPS_DENOMINATOR) + activity_bonus + duration_bonus;
    if is_contested {
        multiplier_bp = multiplier_bp * CONTESTED_PENALTY_NUMERATOR / 100;
    }

    math::mul_div(
        base_value,
        multiplier_bp,
        u128::from(BPS_DENOMINATOR),
        "territory value",
    )
}
