//! Marketplace fees and peer-to-peer transaction tax.
//!
//! Every split in this module conserves value exactly: the emitted parts
//! always sum to the computed fee or tax to the last unit, with rounding
//! dust assigned to a documented, deterministic recipient.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::factions::{FactionId, FACTION_SLOTS};
use crate::math::{self, BPS_DENOMINATOR};

/// Smallest fee charged on any nonzero-price trade or transfer.
pub const MIN_FEE: u128 = 1;

/// Sellers trading in territory their faction controls pay 70% of the base
/// fee rate (a 30% discount).
pub const TERRITORY_DISCOUNT_NUMERATOR: u64 = 70;

/// Same-faction transfers pay half the base tax rate.
pub const SAME_FACTION_TAX_NUMERATOR: u64 = 50;

/// Cross-faction transfers pay one and a half times the base tax rate.
pub const CROSS_FACTION_TAX_NUMERATOR: u64 = 150;

/// Share of post-burn tax routed to the central treasury, in percent.
pub const TAX_TREASURY_PERCENT: u64 = 30;

/// Stakeholder split for marketplace fees, in basis points.
///
/// The caller guarantees the four parts sum to at most 10000; the engine
/// re-validates and folds any unallocated remainder into the dao share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeDistributionPercentages {
    /// Share routed to the dao treasury.
    pub dao_bp: u64,
    /// Share routed to the territory's controlling faction.
    pub territory_bp: u64,
    /// Share routed to the seller's faction.
    pub seller_faction_bp: u64,
    /// Share burned.
    pub burn_bp: u64,
}

impl FeeDistributionPercentages {
    /// Validate that the parts sum to at most the full denominator.
    pub fn validate(&self) -> Result<()> {
        for (value, context) in [
            (self.dao_bp, "dao split"),
            (self.territory_bp, "territory split"),
            (self.seller_faction_bp, "seller split"),
            (self.burn_bp, "burn split"),
        ] {
            if value > BPS_DENOMINATOR {
                return Err(EngineError::BasisPointsOutOfRange { value, context });
            }
        }
        let sum = self.dao_bp + self.territory_bp + self.seller_faction_bp + self.burn_bp;
        if sum > BPS_DENOMINATOR {
            return Err(EngineError::BasisPointsOutOfRange {
                value: sum,
                context: "fee split total",
            });
        }
        Ok(())
    }
}

/// A marketplace fee and its stakeholder split.
///
/// `dao + territory_controller + seller_faction + burn == fee`, always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceFee {
    /// Total fee charged on the sale.
    pub fee: u128,
    /// Dao share, including all rounding dust.
    pub dao: u128,
    /// Share for the faction controlling the listing's territory.
    pub territory_controller: u128,
    /// Share for the seller's faction.
    pub seller_faction: u128,
    /// Burned share.
    pub burn: u128,
}

/// Tax on a peer-to-peer transfer, split across its stakeholders.
///
/// `burn + treasury + sum(faction_amounts) == tax`, always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDistribution {
    /// Burned share.
    pub burn: u128,
    /// Central treasury share.
    pub treasury: u128,
    /// Per-faction shares, indexed by faction id (slot 0 unused).
    pub faction_amounts: [u128; FACTION_SLOTS],
}

impl TaxDistribution {
    /// Total value accounted for by this distribution.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.burn + self.treasury + self.faction_amounts.iter().sum::<u128>()
    }
}

fn validate_bp(value: u64, context: &'static str) -> Result<()> {
    if value > BPS_DENOMINATOR {
        return Err(EngineError::BasisPointsOutOfRange { value, context });
    }
    Ok(())
}

fn bp_share(amount: u128, bp: u64, context: &'static str) -> Result<u128> {
    math::mul_div(amount, u128::from(bp), u128::from(BPS_DENOMINATOR), context)
}

/// Compute the marketplace fee for a sale and split it across stakeholders.
///
/// The fee rate is discounted by 30% iff the listing's territory is
/// controlled by the seller's own faction. The resulting fee is floored at
/// [`MIN_FEE`] whenever the price is nonzero, then split per
/// `split_percentages`; the territory and seller shares are zeroed when the
/// corresponding actor does not exist, and all rounding dust lands in the
/// dao share so the four parts sum exactly to the fee.
pub fn marketplace_fee(
    price: u128,
    base_fee_bp: u64,
    seller_faction: FactionId,
    controlling_faction: FactionId,
    split_percentages: &FeeDistributionPercentages,
) -> Result<MarketplaceFee> {
    validate_bp(base_fee_bp, "marketplace fee rate")?;
    split_percentages.validate()?;

    let discounted = seller_faction.is_aligned() && controlling_faction == seller_faction;
    let effective_bp = if discounted {
        base_fee_bp * TERRITORY_DISCOUNT_NUMERATOR / 100
    } else {
        base_fee_bp
    };

    let mut fee = bp_share(price, effective_bp, "marketplace fee")?;
    if price > 0 && fee < MIN_FEE {
        fee = MIN_FEE;
    }

    let territory_controller = if controlling_faction.is_aligned() {
        bp_share(fee, split_percentages.territory_bp, "territory share")?
    } else {
        0
    };
    let seller_share = if seller_faction.is_aligned() {
        bp_share(fee, split_percentages.seller_faction_bp, "seller share")?
    } else {
        0
    };
    let burn = bp_share(fee, split_percentages.burn_bp, "burn share")?;

    // Splits sum to <= 10000 bp, so the allocated parts never exceed the
    // fee; everything unallocated (including dust) is the dao's.
    let dao = fee - territory_controller - seller_share - burn;

    Ok(MarketplaceFee {
        fee,
        dao,
        territory_controller,
        seller_faction: seller_share,
        burn,
    })
}

/// Compute the tax charged on a peer-to-peer transfer.
///
/// Same-faction transfers pay half the base rate, cross-faction transfers
/// pay one and a half times (capped at the full denominator), and transfers
/// with no faction involved pay the base rate. Nonzero amounts are floored
/// at [`MIN_FEE`].
pub fn transaction_tax(
    amount: u128,
    sender_faction: FactionId,
    receiver_faction: FactionId,
    base_rate_bp: u64,
) -> Result<u128> {
    validate_bp(base_rate_bp, "transaction tax rate")?;

    let effective_bp = if sender_faction.is_aligned() && receiver_faction.is_aligned() {
        if sender_faction == receiver_faction {
            base_rate_bp * SAME_FACTION_TAX_NUMERATOR / 100
        } else {
            (base_rate_bp * CROSS_FACTION_TAX_NUMERATOR / 100).min(BPS_DENOMINATOR)
        }
    } else {
        base_rate_bp
    };

    let mut tax = bp_share(amount, effective_bp, "transaction tax")?;
    if amount > 0 && tax < MIN_FEE {
        tax = MIN_FEE;
    }
    Ok(tax)
}

/// Split a collected transaction tax across burn, treasury, and factions.
///
/// A `burn_bp` fraction is burned, 30% of the remainder goes to the central
/// treasury, and the rest is split between the factions involved: 50/50
/// when sender and receiver belong to different factions (odd unit to the
/// receiver side), all to the single faction when only one side is aligned
/// or both share a faction, and all to the treasury when neither is.
pub fn distribute_tax(
    tax: u128,
    sender_faction: FactionId,
    receiver_faction: FactionId,
    burn_bp: u64,
) -> Result<TaxDistribution> {
    validate_bp(burn_bp, "tax burn rate")?;

    let burn = bp_share(tax, burn_bp, "tax burn")?;
    let after_burn = tax - burn;
    let mut treasury = math::mul_div(
        after_burn,
        u128::from(TAX_TREASURY_PERCENT),
        100,
        "tax treasury share",
    )?;
    let pool = after_burn - treasury;

    let mut faction_amounts = [0u128; FACTION_SLOTS];
    match (
        sender_faction.is_aligned(),
        receiver_faction.is_aligned(),
    ) {
        (true, true) if sender_faction != receiver_faction => {
            let sender_half = pool / 2;
            faction_amounts[sender_faction.id() as usize] += sender_half;
            faction_amounts[receiver_faction.id() as usize] += pool - sender_half;
        }
        (true, _) => faction_amounts[sender_faction.id() as usize] += pool,
        (false, true) => faction_amounts[receiver_faction.id() as usize] += pool,
        (false, false) => treasury += pool,
    }

    Ok(TaxDistribution {
        burn,
        treasury,
        faction_amounts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splits() -> FeeDistributionPercentages {
        FeeDistributionPercentages {
            dao_bp: 4000,
            territory_bp: 3000,
            seller_faction_bp: 2000,
            burn_bp: 1000,
        }
    }

    #[test]
    fn test_territory_discount_applies_on_match() {
        let matched = marketplace_fee(
            10_000,
            250,
            FactionId::LawEnforcement,
            FactionId::LawEnforcement,
            &splits(),
        )
        .unwrap();
        assert_eq!(matched.fee, 175);

        let unmatched = marketplace_fee(
            10_000,
            250,
            FactionId::LawEnforcement,
            FactionId::CriminalSyndicate,
            &splits(),
        )
        .unwrap();
        assert_eq!(unmatched.fee, 250);
    }

    #[test]
    fn test_neutral_seller_gets_no_discount() {
        // Both sides neutral is not a "match" for discount purposes.
        let fee = marketplace_fee(10_000, 250, FactionId::Neutral, FactionId::Neutral, &splits())
            .unwrap();
        assert_eq!(fee.fee, 250);
        assert_eq!(fee.seller_faction, 0);
        assert_eq!(fee.territory_controller, 0);
    }

    #[test]
    fn test_fee_split_conserves_value() {
        let fee = marketplace_fee(
            999_983,
            317,
            FactionId::Vigilante,
            FactionId::CriminalSyndicate,
            &splits(),
        )
        .unwrap();
        assert_eq!(
            fee.dao + fee.territory_controller + fee.seller_faction + fee.burn,
            fee.fee
        );
    }

    #[test]
    fn test_dust_folds_into_dao() {
        // A fee of 7 with 30/20/10% shares leaves dust that must reach the dao.
        let fee = marketplace_fee(
            7,
            10_000,
            FactionId::Vigilante,
            FactionId::Vigilante,
            &splits(),
        )
        .unwrap();
        assert_eq!(
            fee.dao + fee.territory_controller + fee.seller_faction + fee.burn,
            fee.fee
        );
        // 4000 bp of 4 would be 1; the dao actually holds its share plus dust.
        assert!(fee.dao >= fee.fee * 4000 / 10_000);
    }

    #[test]
    fn test_absent_actors_get_nothing() {
        let fee = marketplace_fee(
            100_000,
            250,
            FactionId::Neutral,
            FactionId::LawEnforcement,
            &splits(),
        )
        .unwrap();
        assert_eq!(fee.seller_faction, 0);
        assert!(fee.territory_controller > 0);

        let no_controller = marketplace_fee(
            100_000,
            250,
            FactionId::Vigilante,
            FactionId::Neutral,
            &splits(),
        )
        .unwrap();
        assert_eq!(no_controller.territory_controller, 0);
        assert!(no_controller.seller_faction > 0);
    }

    #[test]
    fn test_min_fee_floor() {
        let fee = marketplace_fee(
            10,
            1,
            FactionId::Neutral,
            FactionId::Neutral,
            &FeeDistributionPercentages::default(),
        )
        .unwrap();
        assert_eq!(fee.fee, MIN_FEE);

        let zero_price = marketplace_fee(
            0,
            250,
            FactionId::Neutral,
            FactionId::Neutral,
            &FeeDistributionPercentages::default(),
        )
        .unwrap();
        assert_eq!(zero_price.fee, 0);
    }

    #[test]
    fn test_rejects_overcommitted_split() {
        let bad = FeeDistributionPercentages {
            dao_bp: 5000,
            territory_bp: 3000,
            seller_faction_bp: 2000,
            burn_bp: 1000,
        };
        assert!(matches!(
            marketplace_fee(1000, 250, FactionId::Neutral, FactionId::Neutral, &bad),
            Err(EngineError::BasisPointsOutOfRange { value: 11_000, .. })
        ));
    }

    #[test]
    fn test_transaction_tax_rates() {
        let same = transaction_tax(
            100_000,
            FactionId::Vigilante,
            FactionId::Vigilante,
            200,
        )
        .unwrap();
        let cross = transaction_tax(
            100_000,
            FactionId::Vigilante,
            FactionId::LawEnforcement,
            200,
        )
        .unwrap();
        let neutral = transaction_tax(100_000, FactionId::Neutral, FactionId::Vigilante, 200)
            .unwrap();

        assert_eq!(same, 1_000); // half rate
        assert_eq!(cross, 3_000); // 1.5x rate
        assert_eq!(neutral, 2_000); // base rate
    }

    #[test]
    fn test_transaction_tax_min_fee() {
        let tiny = transaction_tax(3, FactionId::Neutral, FactionId::Neutral, 100).unwrap();
        assert_eq!(tiny, MIN_FEE);
        let zero = transaction_tax(0, FactionId::Neutral, FactionId::Neutral, 100).unwrap();
        assert_eq!(zero, 0);
    }

    #[test]
    fn test_distribute_tax_cross_faction() {
        let dist = distribute_tax(
            10_000,
            FactionId::LawEnforcement,
            FactionId::CriminalSyndicate,
            1000,
        )
        .unwrap();
        assert_eq!(dist.burn, 1_000);
        assert_eq!(dist.treasury, 2_700); // 30% of 9000
        let pool = 6_300;
        assert_eq!(
            dist.faction_amounts[FactionId::LawEnforcement.id() as usize],
            pool / 2
        );
        assert_eq!(
            dist.faction_amounts[FactionId::CriminalSyndicate.id() as usize],
            pool - pool / 2
        );
        assert_eq!(dist.total(), 10_000);
    }

    #[test]
    fn test_distribute_tax_odd_unit_to_receiver() {
        let dist = distribute_tax(
            101,
            FactionId::LawEnforcement,
            FactionId::Vigilante,
            0,
        )
        .unwrap();
        // 101 - 30 treasury = 71 pool; sender floors to 35, receiver takes 36.
        let le = dist.faction_amounts[FactionId::LawEnforcement.id() as usize];
        let vig = dist.faction_amounts[FactionId::Vigilante.id() as usize];
        assert_eq!(le, 35);
        assert_eq!(vig, 36);
        assert_eq!(dist.total(), 101);
    }

    #[test]
    fn test_distribute_tax_single_faction() {
        let only_sender =
            distribute_tax(10_000, FactionId::Vigilante, FactionId::Neutral, 0).unwrap();
        assert_eq!(
            only_sender.faction_amounts[FactionId::Vigilante.id() as usize],
            7_000
        );
        assert_eq!(only_sender.total(), 10_000);

        let same_faction =
            distribute_tax(10_000, FactionId::Vigilante, FactionId::Vigilante, 0).unwrap();
        assert_eq!(
            same_faction.faction_amounts[FactionId::Vigilante.id() as usize],
            7_000
        );
    }

    #[test]
    fn test_distribute_tax_no_factions_all_treasury() {
        let dist = distribute_tax(10_000, FactionId::Neutral, FactionId::Neutral, 500).unwrap();
        assert_eq!(dist.burn, 500);
        assert_eq!(dist.treasury, 9_500);
        assert_eq!(dist.faction_amounts, [0; FACTION_SLOTS]);
        assert_eq!(dist.total(), 10_000);
    }
}
