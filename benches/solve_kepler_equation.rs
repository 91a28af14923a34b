use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rvcurve::kepler::KeplerSolver;
use rvcurve::orbital_elements::OrbitalElements;
use rvcurve::rv_model::RvModel;

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

fn random_anomalies(rng: &mut StdRng, samples: usize) -> Vec<f64> {
    (0..samples).map(|_| rand_angle(rng)).collect()
}

/// Typical regime: e ∈ [0.0, 0.7]
fn bench_typical(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let solver = KeplerSolver::default();

    c.bench_function("true_anomaly/typical_e<=0.7", |b| {
        b.iter_batched(
            || (rng.random_range(0.0..=0.7), random_anomalies(&mut rng, 1_000)),
            |(e, ma)| {
                let nu = solver.true_anomaly(black_box(&ma), black_box(e)).unwrap();
                black_box(nu);
            },
            BatchSize::LargeInput,
        )
    });
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.9]
fn bench_high_e(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);
    let solver = KeplerSolver::default();

    c.bench_function("true_anomaly/high_e_0.7..0.9", |b| {
        b.iter_batched(
            || (rng.random_range(0.7..0.9), random_anomalies(&mut rng, 1_000)),
            |(e, ma)| {
                let _ = solver.true_anomaly(black_box(&ma), black_box(e));
            },
            BatchSize::LargeInput,
        )
    });
}

/// Scalar path, one solve per call
fn bench_scalar(c: &mut Criterion) {
    let solver = KeplerSolver::default();

    c.bench_function("true_anomaly/scalar_e=0.75", |b| {
        b.iter(|| {
            let nu = solver.true_anomaly_scalar(black_box(5.930_860_541_086_263), black_box(0.75));
            black_box(nu.ok());
        })
    });
}

/// Full phase curve as plotted by the `rv` binary
fn bench_full_phase(c: &mut Criterion) {
    let model = RvModel::new(OrbitalElements::new(0.7554, 12115.7, 0.7334, 2450403.1, 0.0, 264.5));

    c.bench_function("rv_full_phase/100_points", |b| {
        b.iter(|| {
            let rv = model.rv_full_phase(black_box(0.0), black_box(100)).unwrap();
            black_box(rv);
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_scalar, bench_full_phase
);
criterion_main!(benches);
