use criterion::{criterion_group, criterion_main, Criterion};
use sweepcore::board::GridBuilder;
use sweepcore::config::PolicyParams;
use sweepcore::deduction::DeductionEngine;
use sweepcore::policy::DecisionPolicy;
use sweepcore::risk::{AdjacencyEstimator, RiskEstimator};

fn hazard_positions(rows: usize, cols: usize) -> Vec<(usize, usize)> {
    // Deterministic scatter, roughly 15% density.
    let mut out = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if (r * 7 + c * 13) % 20 < 3 && (r, c) != (0, 0) {
                out.push((r, c));
            }
        }
    }
    out
}

fn bench_deduction_fixpoint(c: &mut Criterion) {
    let base = GridBuilder::new(24, 24)
        .with_hazards(&hazard_positions(24, 24))
        .build()
        .unwrap();
    let engine = DeductionEngine::default();

    c.bench_function("deduction_fixpoint_24x24", |b| {
        b.iter(|| {
            let mut grid = base.clone();
            grid.reveal(0, 0, true).unwrap();
            engine.fixpoint(&mut grid).unwrap()
        })
    });
}

fn bench_risk_estimate(c: &mut Criterion) {
    let mut grid = GridBuilder::new(24, 24)
        .with_hazards(&hazard_positions(24, 24))
        .build()
        .unwrap();
    grid.reveal(0, 0, true).unwrap();
    let estimator = AdjacencyEstimator::default();

    c.bench_function("risk_estimate_24x24", |b| b.iter(|| estimator.estimate(&grid)));
}

fn bench_policy_run(c: &mut Criterion) {
    let base = GridBuilder::new(16, 16)
        .with_hazards(&hazard_positions(16, 16))
        .build()
        .unwrap();

    c.bench_function("policy_run_16x16", |b| {
        b.iter(|| {
            let mut grid = base.clone();
            let mut policy = DecisionPolicy::new(PolicyParams::default()).with_seed(42);
            policy.run(&mut grid).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_deduction_fixpoint,
    bench_risk_estimate,
    bench_policy_run
);
criterion_main!(benches);
