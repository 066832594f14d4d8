//! Benchmarks for raw generator throughput
//!
//! Run with: cargo bench --bench generators
//!
//! Measures the native word rate of each family, the cost of the run-time
//! dispatch through `AnyEngine`, byte filling, and the jump-ahead functions.

use criterion::measurement::WallTime;
use criterion::{
    criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use fortress_random::engines::{
    Jsf64, L64X128Mix, Pcg32XshRr, Pcg64XshRr, RomuTrio, Seiran, Sfc64, SplitMix64,
    Xoroshiro1024StarStar,
};
use fortress_random::{Algorithm, AnyEngine, Engine, Rng};
use std::hint::black_box;

const WORDS: u64 = 1024;

/// Draw `WORDS` native words through the typed engine
fn bench_typed<E: Engine>(group: &mut BenchmarkGroup<'_, WallTime>, name: &str) {
    let mut rng = E::seed_from_u64(1);
    group.bench_function(name, |b| {
        b.iter(|| {
            for _ in 0..WORDS {
                black_box(rng.advance());
            }
        });
    });
}

fn bench_typed_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("Typed engines");
    group.throughput(Throughput::Elements(WORDS));

    bench_typed::<SplitMix64>(&mut group, "SplitMix64");
    bench_typed::<Xoroshiro1024StarStar>(&mut group, "Xoroshiro1024StarStar");
    bench_typed::<Pcg32XshRr>(&mut group, "Pcg32XshRr");
    bench_typed::<Pcg64XshRr>(&mut group, "Pcg64XshRr");
    bench_typed::<RomuTrio>(&mut group, "RomuTrio");
    bench_typed::<Sfc64>(&mut group, "Sfc64");
    bench_typed::<Jsf64>(&mut group, "Jsf64");
    bench_typed::<L64X128Mix>(&mut group, "L64X128Mix");

    group.finish();
}

fn bench_any_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("AnyEngine next_u64");
    group.throughput(Throughput::Elements(WORDS));

    for &algorithm in Algorithm::ALL {
        let mut rng = AnyEngine::seed_from_u64(algorithm, 1);
        group.bench_function(BenchmarkId::from_parameter(algorithm), |b| {
            b.iter(|| {
                for _ in 0..WORDS {
                    black_box(rng.next_u64());
                }
            });
        });
    }

    group.finish();
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fill bytes");

    for size in [16, 256, 4096, 65536] {
        let mut buffer = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        let mut narrow = Pcg32XshRr::seed_from_u64(7);
        group.bench_with_input(BenchmarkId::new("32-bit words", size), &size, |b, _| {
            b.iter(|| narrow.fill_bytes(black_box(&mut buffer)));
        });

        let mut wide = Sfc64::seed_from_u64(7);
        group.bench_with_input(BenchmarkId::new("64-bit words", size), &size, |b, _| {
            b.iter(|| wide.fill_bytes(black_box(&mut buffer)));
        });
    }

    group.finish();
}

fn bench_jumps(c: &mut Criterion) {
    let mut group = c.benchmark_group("Jump ahead");

    for delta in [1u64 << 10, 1 << 32, u64::MAX] {
        let mut rng = Pcg32XshRr::seed_from_u64(3);
        group.bench_with_input(BenchmarkId::new("pcg32", delta), &delta, |b, &delta| {
            b.iter(|| rng.jump(black_box(delta)));
        });
    }

    let mut lxm = L64X128Mix::seed_from_u64(3);
    group.bench_function("L64X128Mix long_jump", |b| b.iter(|| lxm.long_jump()));

    let mut seiran = Seiran::seed_from_u64(3);
    group.bench_function("Seiran jump64", |b| b.iter(|| seiran.jump64()));

    group.finish();
}

criterion_group!(
    benches,
    bench_typed_engines,
    bench_any_engine,
    bench_fill,
    bench_jumps
);
criterion_main!(benches);
