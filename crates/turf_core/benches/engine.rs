//! Engine benchmarks for turf_core.
//!
//! Run with: `cargo bench -p turf_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use turf_core::conflict::resolve_conflict;
use turf_core::factions::FactionId;
use turf_core::math::{exp_decay, PRECISION};
use turf_core::revenue::{anti_monopoly_adjustment, revenue_distribution};
use turf_core::staking::staking_reward;

pub fn engine_benchmark(c: &mut Criterion) {
    c.bench_function("revenue_distribution", |b| {
        let influence = [0u128, 700, 200, 100];
        b.iter(|| {
            revenue_distribution(black_box(1_000_000), black_box(&influence), 1_000, 500)
                .unwrap()
        })
    });

    c.bench_function("anti_monopoly_adjustment", |b| {
        let shares = vec![700u128, 200, 100];
        b.iter(|| anti_monopoly_adjustment(black_box(&shares), 7_000, 5_000).unwrap())
    });

    c.bench_function("resolve_conflict", |b| {
        b.iter(|| {
            resolve_conflict(
                FactionId::CriminalSyndicate,
                FactionId::LawEnforcement,
                black_box(5_000),
                black_box(4_800),
                black_box(42),
            )
            .unwrap()
        })
    });

    c.bench_function("exp_decay", |b| {
        b.iter(|| exp_decay(black_box(PRECISION / 10_000_000), black_box(86_400)).unwrap())
    });

    c.bench_function("staking_reward", |b| {
        b.iter(|| {
            staking_reward(
                black_box(1_000_000 * PRECISION),
                black_box(30 * 24 * 60 * 60),
                1_000,
                5_000,
                10,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, engine_benchmark);
criterion_main!(benches);
