//! Benchmarks for the Monte Carlo experiment and the exact probability.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use u_drills::probability::{exact_probability, experiment, Expectation, Hat};
use u_drills::random::create_rng;

// ============================================================================
// Draw
// ============================================================================

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    let hat = Hat::new([("black", 6), ("red", 4), ("green", 3)]).unwrap();

    for n in [1, 5, 13] {
        group.bench_function(format!("draw_{n}_of_13"), |b| {
            let mut rng = create_rng(42);
            b.iter(|| {
                let mut working = hat.clone();
                black_box(working.draw(n, &mut rng))
            });
        });
    }

    group.finish();
}

// ============================================================================
// Experiment
// ============================================================================

fn bench_experiment(c: &mut Criterion) {
    let mut group = c.benchmark_group("experiment");
    let hat = Hat::new([("black", 6), ("red", 4), ("green", 3)]).unwrap();
    let expected = Expectation::new([("red", 2), ("green", 1)]).unwrap();

    for trials in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(trials as u64));
        group.bench_function(format!("classic_{trials}_trials"), |b| {
            let mut rng = create_rng(7);
            b.iter(|| experiment(&hat, &expected, 5, trials, &mut rng).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// Exact
// ============================================================================

fn bench_exact(c: &mut Criterion) {
    let hat = Hat::new([("a", 40), ("b", 30), ("c", 20), ("d", 10)]).unwrap();
    let expected = Expectation::new([("a", 5), ("b", 4), ("c", 3)]).unwrap();

    c.bench_function("exact_100_balls_3_constraints", |b| {
        b.iter(|| exact_probability(black_box(&hat), black_box(&expected), 25));
    });
}

criterion_group!(benches, bench_draw, bench_experiment, bench_exact);
criterion_main!(benches);
