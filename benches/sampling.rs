//! Benchmarks for sampling operations
//!
//! Run with: cargo bench --bench sampling
//!
//! Covers bounded integers (with a range chosen to force Lemire rejections),
//! floating-point draws, the continuous distributions on `Generator`, and the
//! sequence operations.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fortress_random::engines::RomuTrio;
use fortress_random::{Engine, Generator, Rng};
use std::hint::black_box;

const DRAWS: u64 = 1024;

fn bench_bounded(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bounded integers");
    group.throughput(Throughput::Elements(DRAWS));

    // 2^32 / 3 + 1 rejects almost a third of draws
    for (label, max) in [("small", 6u32), ("power of two", 1 << 20), ("worst case", (u32::MAX / 3) + 1)] {
        let mut rng = RomuTrio::seed_from_u64(11);
        group.bench_with_input(BenchmarkId::new("next_uint", label), &max, |b, &max| {
            b.iter(|| {
                for _ in 0..DRAWS {
                    black_box(rng.next_uint(0, max).ok());
                }
            });
        });
    }

    let mut rng = RomuTrio::seed_from_u64(11);
    group.bench_function("next_ulong wide", |b| {
        b.iter(|| {
            for _ in 0..DRAWS {
                black_box(rng.next_ulong(0, u64::MAX - 1).ok());
            }
        });
    });

    group.finish();
}

fn bench_floats(c: &mut Criterion) {
    let mut group = c.benchmark_group("Floating point");
    group.throughput(Throughput::Elements(DRAWS));
    let mut rng = Generator::<RomuTrio>::seed_from_u64(5);

    group.bench_function("next_double", |b| {
        b.iter(|| {
            for _ in 0..DRAWS {
                black_box(rng.next_double());
            }
        });
    });
    group.bench_function("next_double_in", |b| {
        b.iter(|| {
            for _ in 0..DRAWS {
                black_box(rng.next_double_in(-3.0, 7.5).ok());
            }
        });
    });
    group.bench_function("next_gaussian", |b| {
        b.iter(|| {
            for _ in 0..DRAWS {
                black_box(rng.next_gaussian());
            }
        });
    });

    group.finish();
}

fn bench_distributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Distributions");
    group.throughput(Throughput::Elements(DRAWS));
    let mut rng = Generator::<RomuTrio>::seed_from_u64(9);

    for shape in [0.5, 2.0, 30.0] {
        group.bench_with_input(BenchmarkId::new("gamma", shape), &shape, |b, &shape| {
            b.iter(|| {
                for _ in 0..DRAWS {
                    black_box(rng.next_gamma(shape, 1.0).ok());
                }
            });
        });
    }

    group.bench_function("beta(2, 5)", |b| {
        b.iter(|| {
            for _ in 0..DRAWS {
                black_box(rng.next_beta(2.0, 5.0).ok());
            }
        });
    });
    for k in [4.0, 40.0] {
        group.bench_with_input(BenchmarkId::new("chi_square", k), &k, |b, &k| {
            b.iter(|| {
                for _ in 0..DRAWS {
                    black_box(rng.next_chi_square(k).ok());
                }
            });
        });
    }
    group.bench_function("laplace", |b| {
        b.iter(|| {
            for _ in 0..DRAWS {
                black_box(rng.next_laplace(0.0, 1.0).ok());
            }
        });
    });
    group.bench_function("triangular", |b| {
        b.iter(|| {
            for _ in 0..DRAWS {
                black_box(rng.next_triangular(0.0, 10.0, 3.0).ok());
            }
        });
    });

    group.finish();
}

fn bench_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sequences");

    for len in [16usize, 1024, 65536] {
        let items: Vec<u32> = (0..len as u32).collect();
        group.throughput(Throughput::Elements(len as u64));
        let mut rng = RomuTrio::seed_from_u64(21);

        group.bench_with_input(BenchmarkId::new("shuffle", len), &items, |b, items| {
            b.iter(|| rng.shuffle(black_box(items)));
        });
        group.bench_with_input(BenchmarkId::new("sample 10", len), &items, |b, items| {
            b.iter(|| rng.sample(black_box(items), 10).ok());
        });
        group.bench_with_input(BenchmarkId::new("choice_multiple 10", len), &items, |b, items| {
            b.iter(|| rng.choice_multiple(black_box(items), 10.min(items.len())).ok());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_bounded,
    bench_floats,
    bench_distributions,
    bench_sequences
);
criterion_main!(benches);
