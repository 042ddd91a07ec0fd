//! Benchmarks for curve evaluation and calibration.
//!
//! Run with: cargo bench -p nss-curves

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use nss_curves::prelude::*;

// =============================================================================
// TEST DATA
// =============================================================================

fn maturities(n: usize) -> Vec<f64> {
    let step = 30.0 / (n - 1) as f64;
    (0..n).map(|i| step * i as f64).collect()
}

fn ns_curve() -> NelsonSiegel {
    NelsonSiegel::new(0.017, -0.023, 0.24, 2.2)
}

fn nss_curve() -> Svensson {
    Svensson::new(0.017, -0.023, 0.24, 0.1, 2.2, 3.1)
}

// =============================================================================
// EVALUATION
// =============================================================================

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    let ns = ns_curve();
    let nss = nss_curve();

    for n in [10, 100, 1000] {
        let t = maturities(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("ns_zeros", n), &t, |b, t| {
            b.iter(|| ns.zeros(black_box(t)))
        });
        group.bench_with_input(BenchmarkId::new("nss_zeros", n), &t, |b, t| {
            b.iter(|| nss.zeros(black_box(t)))
        });
        group.bench_with_input(BenchmarkId::new("nss_factor_matrix", n), &t, |b, t| {
            b.iter(|| nss.factor_matrix(black_box(t)))
        });
    }

    group.finish();
}

// =============================================================================
// CALIBRATION
// =============================================================================

fn bench_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibration");
    group.sample_size(20);

    let t = maturities(50);
    let ns_y = ns_curve().zeros(&t);
    let nss_y = nss_curve().zeros(&t);

    group.bench_function("ns_ols", |b| {
        b.iter(|| fit_nelson_siegel_betas(black_box(2.2), &t, &ns_y))
    });
    group.bench_function("ns_default_start", |b| {
        b.iter(|| calibrate_ns(&t, &ns_y, black_box(DEFAULT_NS_TAU0)))
    });
    group.bench_function("nss_default_start", |b| {
        b.iter(|| calibrate_nss(&t, &nss_y, black_box(DEFAULT_NSS_TAU0)))
    });

    group.finish();
}

criterion_group!(benches, bench_evaluation, bench_calibration);
criterion_main!(benches);
