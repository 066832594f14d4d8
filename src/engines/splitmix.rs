//! SplitMix64, Steele, Lea and Flood's 64-bit mixer over a Weyl sequence.
//!
//! Besides being a generator in its own right, SplitMix64 expands single
//! `u64` seeds into full state vectors for the other families (see
//! [`Engine::seed_from_u64`]).

use crate::engine::Engine;

/// Golden-ratio increment of the Weyl sequence.
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64: one 64-bit word of state, full period 2^64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a generator starting at `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advances the Weyl sequence and mixes the result.
    #[inline]
    pub fn next_word(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl Engine for SplitMix64 {
    type Word = u64;
    const SEED_WORDS: usize = 1;
    const NAME: &'static str = "SplitMix64";

    #[inline]
    fn advance(&mut self) -> u64 {
        self.next_word()
    }

    fn load_seed(&mut self, seed: &[u64]) {
        self.state = seed.first().copied().unwrap_or_default();
    }

    // the seed is already one word; expanding it would only shift the stream
    fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed)
    }
}

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    #[test]
    fn test_splitmix_golden() {
        let mut rng = SplitMix64::new(0);
        let expected = [
            0xe220a8397b1dcdaf_u64,
            0x6e789e6aa1b965f4,
            0x06c45d188009454f,
            0xf88bb8a8724c81ec,
            0x1b39896a51a8749b,
        ];
        for &exp in &expected {
            assert_eq!(rng.advance(), exp, "Golden test failed");
        }
    }

    #[test]
    fn test_set_seed_truncates() {
        let mut rng = SplitMix64::default();
        rng.set_seed(&[42, 7, 7]).unwrap();
        assert_eq!(rng.advance(), 0xbdd732262feb6e95);
        assert_eq!(rng.algorithm_name(), "SplitMix64");
    }
}
