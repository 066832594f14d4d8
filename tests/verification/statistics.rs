//! Coarse statistical smoke tests.
//!
//! These are not a substitute for TestU01 or PractRand. They catch wiring
//! mistakes (a dropped word, a stuck bit, the wrong half of a product) that
//! golden vectors for a single seed can miss. Every bound is several standard
//! deviations wide and every seed is fixed, so the tests are deterministic.

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use fortress_random::bits::pop_count;
use fortress_random::{Algorithm, AnyEngine, Generator, GeneratorBuilder, Rng};

use crate::common::{chi_square_uniform, init_tracing};

const SEED: u64 = 2024;
const DRAWS: usize = 10_000;

fn seeded(algorithm: Algorithm) -> AnyEngine {
    AnyEngine::seed_from_u64(algorithm, SEED)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

#[test]
fn test_bounded_ints_are_uniform() {
    init_tracing();
    for &algorithm in Algorithm::ALL {
        let mut rng = seeded(algorithm);
        let mut counts = [0u64; 10];
        for _ in 0..DRAWS {
            counts[rng.next_uint(0, 10).unwrap() as usize] += 1;
        }
        // 9 degrees of freedom; 50 is far in the tail
        let statistic = chi_square_uniform(&counts);
        assert!(statistic < 50.0, "{}: chi-square {}", algorithm, statistic);
    }
}

#[test]
fn test_every_bit_is_balanced() {
    for &algorithm in Algorithm::ALL {
        let mut rng = seeded(algorithm);
        let mut ones = [0u32; 64];
        let mut total = 0u32;
        for _ in 0..4096 {
            let word = rng.next_u64();
            total += pop_count(word);
            for (bit, count) in ones.iter_mut().enumerate() {
                *count += ((word >> bit) & 1) as u32;
            }
        }
        for (bit, &count) in ones.iter().enumerate() {
            assert!(
                (1798..=2298).contains(&count),
                "{}: bit {} set {} times in 4096 draws",
                algorithm,
                bit,
                count
            );
        }
        // 4096 * 64 / 2 set bits expected, standard deviation 256
        assert!((129_572..=132_572).contains(&total), "{}: {} set bits", algorithm, total);
    }
}

#[test]
fn test_unit_doubles_have_uniform_moments() {
    for &algorithm in Algorithm::ALL {
        let mut rng = seeded(algorithm);
        let values: Vec<f64> = (0..DRAWS).map(|_| rng.next_double()).collect();
        let m = mean(&values);
        let v = variance(&values);
        assert!((m - 0.5).abs() < 0.02, "{}: mean {}", algorithm, m);
        assert!((v - 1.0 / 12.0).abs() < 0.01, "{}: variance {}", algorithm, v);
    }
}

#[test]
fn test_successive_doubles_are_uncorrelated() {
    for &algorithm in Algorithm::ALL {
        let mut rng = seeded(algorithm);
        let values: Vec<f64> = (0..DRAWS).map(|_| rng.next_double()).collect();
        let m = mean(&values);
        let v = variance(&values);
        let lagged = values
            .windows(2)
            .map(|pair| (pair[0] - m) * (pair[1] - m))
            .sum::<f64>()
            / (values.len() - 1) as f64;
        let correlation = lagged / v;
        assert!(correlation.abs() < 0.05, "{}: lag-1 correlation {}", algorithm, correlation);
    }
}

#[test]
fn test_gaussians_are_standard_normal() {
    for &algorithm in Algorithm::ALL {
        let mut rng = GeneratorBuilder::new(algorithm).with_seed(SEED).build().unwrap();
        let values: Vec<f64> = (0..DRAWS).map(|_| rng.next_gaussian()).collect();
        let m = mean(&values);
        let v = variance(&values);
        assert!(m.abs() < 0.06, "{}: gaussian mean {}", algorithm, m);
        assert!((v - 1.0).abs() < 0.1, "{}: gaussian variance {}", algorithm, v);

        let within_one = values.iter().filter(|z| z.abs() < 1.0).count() as f64 / DRAWS as f64;
        assert!((within_one - 0.6827).abs() < 0.03, "{}: {} within 1 sigma", algorithm, within_one);
    }
}

#[test]
fn test_shuffle_positions_are_uniform() {
    let mut rng = Generator::new(seeded(Algorithm::Pcg64XslRrRr));
    let items: Vec<usize> = (0..8).collect();
    let mut first = [0u64; 8];
    for _ in 0..8000 {
        first[rng.shuffle(&items)[0]] += 1;
    }
    // 7 degrees of freedom
    let statistic = chi_square_uniform(&first);
    assert!(statistic < 40.0, "chi-square {}", statistic);
}

#[test]
fn test_bool_and_byte_are_balanced() {
    for &algorithm in Algorithm::ALL {
        let mut rng = seeded(algorithm);
        let trues = (0..DRAWS).filter(|_| rng.next_bool()).count();
        assert!((4700..=5300).contains(&trues), "{}: {} trues", algorithm, trues);

        let mut buckets = [0u64; 16];
        for _ in 0..DRAWS {
            buckets[usize::from(rng.next_byte() >> 4)] += 1;
        }
        let statistic = chi_square_uniform(&buckets);
        assert!(statistic < 60.0, "{}: byte chi-square {}", algorithm, statistic);
    }
}
