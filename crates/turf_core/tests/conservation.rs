//! Conservation checks across the fee and revenue surfaces, driven by the
//! shared test harness and fixtures.

use turf_core::factions::FactionId;
use turf_core::fees::{distribute_tax, marketplace_fee, transaction_tax};
use turf_core::revenue::{anti_monopoly_adjustment, revenue_distribution};
use turf_test_utils::conservation::{
    assert_conserved, assert_fee_conserved, assert_revenue_conserved, assert_tax_conserved,
};
use turf_test_utils::fixtures;

const ALL_PARTIES: [FactionId; 4] = [
    FactionId::Neutral,
    FactionId::LawEnforcement,
    FactionId::CriminalSyndicate,
    FactionId::Vigilante,
];

#[test]
fn marketplace_fee_conserves_across_all_matchups() {
    let splits = fixtures::default_fee_splits();
    for seller in ALL_PARTIES {
        for controller in ALL_PARTIES {
            let fee = marketplace_fee(999_983, 317, seller, controller, &splits).unwrap();
            assert_fee_conserved(&fee);
        }
    }
}

#[test]
fn taxed_transfer_conserves_end_to_end() {
    for amount in [1u128, 101, 9_999, 1_000_003] {
        let tax = transaction_tax(
            amount,
            FactionId::LawEnforcement,
            FactionId::Vigilante,
            200,
        )
        .unwrap();
        let dist =
            distribute_tax(tax, FactionId::LawEnforcement, FactionId::Vigilante, 250).unwrap();
        assert_tax_conserved(tax, &dist);
    }
}

#[test]
fn revenue_distribution_conserves_fixture_stakes() {
    let (stakes, _) = fixtures::majority_stakes();
    let dist = revenue_distribution(1_000_003, &stakes, 1_000, 500).unwrap();
    assert_revenue_conserved(1_000_003, &dist);
}

#[test]
fn anti_monopoly_conserves_deadlocked_stakes() {
    let (stakes, total) = fixtures::deadlock_stakes();
    let adjusted = anti_monopoly_adjustment(&stakes, 4_000, 3_000).unwrap();
    assert_conserved(total, &adjusted);
}
