//! Conservation checkers for value splits.
//!
//! Every split in the engine must account for its input to the last unit.
//! These helpers centralize the bookkeeping so tests assert one line per
//! split instead of re-summing fields by hand.

use turf_core::fees::{MarketplaceFee, TaxDistribution};
use turf_core::revenue::RevenueDistribution;

/// Assert that a set of parts sums exactly to the expected total.
///
/// # Panics
///
/// Panics with both values when the parts do not add up.
pub fn assert_conserved(expected_total: u128, parts: &[u128]) {
    let sum: u128 = parts.iter().copied().sum();
    assert_eq!(
        sum, expected_total,
        "value not conserved: parts sum to {sum}, expected {expected_total}"
    );
}

/// Assert that a marketplace fee's shares sum exactly to the fee.
pub fn assert_fee_conserved(fee: &MarketplaceFee) {
    assert_conserved(
        fee.fee,
        &[fee.dao, fee.territory_controller, fee.seller_faction, fee.burn],
    );
}

/// Assert that a tax distribution accounts for the whole tax.
pub fn assert_tax_conserved(tax: u128, distribution: &TaxDistribution) {
    assert_eq!(
        distribution.total(),
        tax,
        "tax not conserved: distribution totals {}, expected {tax}",
        distribution.total()
    );
}

/// Assert that a revenue distribution accounts for the whole input.
pub fn assert_revenue_conserved(total: u128, distribution: &RevenueDistribution) {
    assert_eq!(
        distribution.total(),
        total,
        "revenue not conserved: distribution totals {}, expected {total}",
        distribution.total()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::determinism::strategies;
    use proptest::prelude::*;
    use turf_core::fees::{distribute_tax, marketplace_fee, FeeDistributionPercentages};
    use turf_core::revenue::{anti_monopoly_adjustment, revenue_distribution};

    fn splits() -> FeeDistributionPercentages {
        FeeDistributionPercentages {
            dao_bp: 4_000,
            territory_bp: 3_000,
            seller_faction_bp: 2_000,
            burn_bp: 1_000,
        }
    }

    proptest! {
        #[test]
        fn prop_marketplace_fee_conserves(
            price in strategies::amount(),
            base_fee_bp in strategies::basis_points(),
            seller in strategies::any_faction(),
            controller in strategies::any_faction(),
        ) {
            let fee = marketplace_fee(price, base_fee_bp, seller, controller, &splits())
                .unwrap();
            assert_fee_conserved(&fee);
        }

        #[test]
        fn prop_tax_distribution_conserves(
            tax in strategies::amount(),
            sender in strategies::any_faction(),
            receiver in strategies::any_faction(),
            burn_bp in strategies::basis_points(),
        ) {
            let distribution = distribute_tax(tax, sender, receiver, burn_bp).unwrap();
            assert_tax_conserved(tax, &distribution);
        }

        #[test]
        fn prop_revenue_distribution_conserves(
            total in strategies::amount(),
            (influence, _) in strategies::stakes_with_total(),
            dao_bp in 0u64..=5_000,
            burn_bp in 0u64..=5_000,
        ) {
            let distribution =
                revenue_distribution(total, &influence, dao_bp, burn_bp).unwrap();
            assert_revenue_conserved(total, &distribution);
        }

        #[test]
        fn prop_anti_monopoly_conserves(
            (shares, total) in strategies::stakes_with_total(),
            dominance_bp in 1u64..=10_000,
            target_bp in strategies::basis_points(),
        ) {
            let adjusted =
                anti_monopoly_adjustment(&shares, dominance_bp, target_bp).unwrap();
            assert_conserved(total, &adjusted);
        }
    }
}
