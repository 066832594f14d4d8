//! Middle-square Weyl sequence generator (Widynski), doubled.
//!
//! Two independent middle-square generators, each perturbed by its own Weyl
//! sequence, run side by side and their outputs are xor-combined.

use crate::engine::Engine;

const WEYL_1: u64 = 0xb5ad_4ece_da1c_e2a9;
const WEYL_2: u64 = 0x278c_5a4d_8419_fe6b;

/// MiddleSquareWeyl64: two squared words and two Weyl counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MiddleSquareWeyl64 {
    x1: u64,
    w1: u64,
    x2: u64,
    w2: u64,
}

impl MiddleSquareWeyl64 {
    /// Creates a generator; each half starts its square and its Weyl counter at its seed.
    #[must_use]
    pub const fn new(seed1: u64, seed2: u64) -> Self {
        Self {
            x1: seed1,
            w1: seed1,
            x2: seed2,
            w2: seed2,
        }
    }
}

impl Default for MiddleSquareWeyl64 {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl Engine for MiddleSquareWeyl64 {
    type Word = u64;
    const SEED_WORDS: usize = 2;
    const NAME: &'static str = "Middle Square Weyl Sequence 64-bit";

    #[inline]
    fn advance(&mut self) -> u64 {
        self.w1 = self.w1.wrapping_add(WEYL_1);
        let first = self.x1.wrapping_mul(self.x1).wrapping_add(self.w1);
        self.x1 = first.rotate_left(32);

        self.w2 = self.w2.wrapping_add(WEYL_2);
        self.x2 = self
            .x2
            .wrapping_mul(self.x2)
            .wrapping_add(self.w2)
            .rotate_left(32);

        first ^ self.x2
    }

    fn load_seed(&mut self, seed: &[u64]) {
        if let [seed1, seed2, ..] = *seed {
            *self = Self::new(seed1, seed2);
        }
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
    fn test_default_golden() {
        let mut rng = MiddleSquareWeyl64::default();
        let expected = [
            0x31b4b0a3fd90b8e4_u64,
            0xbd08d05c0a1385b5,
            0x5289b2542889c4d9,
            0x5343453e7fa0f07a,
            0x8f73541c8ba9c37e,
        ];
        for &exp in &expected {
            assert_eq!(rng.advance(), exp);
        }
    }

    #[test]
    fn test_set_seed() {
        let mut rng = MiddleSquareWeyl64::new(9, 9);
        rng.set_seed(&[0, 1]).unwrap();
        assert_eq!(rng, MiddleSquareWeyl64::default());
    }
}
