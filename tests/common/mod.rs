//! Common test infrastructure shared across integration tests.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{init_tracing, take_u64};
//! ```

#![allow(dead_code)]

use std::sync::Once;

use fortress_random::Rng;

static TRACING: Once = Once::new();

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        // another test binary in the same process may already own the global default
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Draws `count` 64-bit values.
pub fn take_u64<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.next_u64()).collect()
}

/// Pearson's chi-square statistic of `counts` against a uniform expectation.
pub fn chi_square_uniform(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}
