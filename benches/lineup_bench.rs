//! Criterion benchmarks for lineup optimization.
//!
//! Compares exhaustive enumeration with the genetic algorithm on a
//! synthetic candidate pool of growing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_lineup::brute::BruteForceConfig;
use u_lineup::ga::GaConfig;
use u_lineup::model::{Candidate, ConstraintSet, Position, RosterTemplate};
use u_lineup::scoring::{Objective, StrategyProfile};
use u_lineup::{Optimizer, OptimizerConfig};

// ===========================================================================
// Synthetic pool
// ===========================================================================

const TEAMS: [&str; 8] = ["KC", "BUF", "SF", "DAL", "MIA", "CIN", "BAL", "PHI"];

fn pool(per_position: usize) -> Vec<Candidate> {
    let positions = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::DST,
    ];
    let mut out = Vec::new();
    for (p, &pos) in positions.iter().enumerate() {
        for i in 0..per_position {
            let salary = 3_000 + ((i * 7 + p * 3) % 12) as u32 * 500;
            let points = 4.0 + salary as f64 / 500.0 + ((i * 5 + p) % 7) as f64;
            out.push(
                Candidate::new(format!("{pos}{i}"), pos, TEAMS[(i + p) % TEAMS.len()], salary, points)
                    .with_ownership(((i * 13 + p * 7) % 40) as f64 + 2.0),
            );
        }
    }
    out
}

fn run(optimizer: &Optimizer, candidates: &[Candidate]) {
    let result = optimizer.optimize(
        black_box(candidates),
        &RosterTemplate::classic(),
        &ConstraintSet::new(50_000),
        Objective::Balanced,
        &StrategyProfile::default(),
        None,
    );
    black_box(result.ok());
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("brute_force");
    group.sample_size(10);

    let optimizer = Optimizer::new(
        OptimizerConfig::default()
            .with_threshold(u128::MAX)
            .with_brute(BruteForceConfig::default().with_max_combinations(Some(50_000))),
    )
    .expect("valid config");
    for &n in &[5usize, 8, 12] {
        let candidates = pool(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &candidates, |b, cs| {
            b.iter(|| run(&optimizer, cs))
        });
    }
    group.finish();
}

fn bench_genetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("genetic");
    group.sample_size(10);

    let optimizer = Optimizer::new(
        OptimizerConfig::default()
            .with_threshold(0)
            .with_ga(GaConfig::fast().with_seed(42)),
    )
    .expect("valid config");
    for &n in &[5usize, 8, 12, 30] {
        let candidates = pool(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &candidates, |b, cs| {
            b.iter(|| run(&optimizer, cs))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_brute_force, bench_genetic);
criterion_main!(benches);
