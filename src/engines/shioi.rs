//! Shioi128: a 128-bit linear generator over GF(2) with a multiply-rotate output.
//!
//! Like [`Seiran`](super::Seiran), jumps apply a characteristic polynomial.
//! The 2^64 jump polynomial is `x + 1`, which reduces to a single closed-form
//! step.

use crate::engine::{expand_seed, repair_zero_state, Engine};

const JUMP_32: [u64; 2] = [0x8003_A4B9_44F0_09D0, 0x7FFE_925E_EBD5_615B];
const JUMP_96: [u64; 2] = [0x8003_A4B9_44F0_09D1, 0x7FFE_925E_EBD5_615B];

/// Shioi128: two 64-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shioi {
    s0: u64,
    s1: u64,
}

impl Shioi {
    /// Creates a generator from two state words.
    ///
    /// An all-zero state is replaced by the SplitMix64(0) expansion.
    #[must_use]
    pub fn new(s0: u64, s1: u64) -> Self {
        let mut words = [s0, s1];
        repair_zero_state(Self::NAME, &mut words);
        let [s0, s1] = words;
        Self { s0, s1 }
    }

    #[inline]
    fn step(&mut self) {
        let (s0, s1) = (self.s0, self.s1);
        self.s0 = s1;
        self.s1 = (s0 << 2) ^ ((s0 as i64 >> 19) as u64) ^ s1;
    }

    fn jump_with(&mut self, polynomial: &[u64; 2]) {
        let (mut t0, mut t1) = (0, 0);
        for &word in polynomial {
            for bit in 0..64 {
                if (word >> bit) & 1 == 1 {
                    t0 ^= self.s0;
                    t1 ^= self.s1;
                }
                self.step();
            }
        }
        self.s0 = t0;
        self.s1 = t1;
    }

    /// Advances the state by 2^32 steps.
    pub fn jump32(&mut self) {
        self.jump_with(&JUMP_32);
    }

    /// Advances the state by 2^64 steps.
    pub fn jump64(&mut self) {
        let (s0, s1) = (self.s0, self.s1);
        self.s0 = s0 ^ s1;
        self.s1 = (s0 << 2) ^ ((s0 as i64 >> 19) as u64);
    }

    /// Advances the state by 2^96 steps.
    pub fn jump96(&mut self) {
        self.jump_with(&JUMP_96);
    }
}

/// Seeded with the SplitMix64(0) expansion.
impl Default for Shioi {
    fn default() -> Self {
        match expand_seed::<u64>(0, 2)[..] {
            [s0, s1] => Self { s0, s1 },
            _ => Self { s0: 1, s1: 0 },
        }
    }
}

impl Engine for Shioi {
    type Word = u64;
    const SEED_WORDS: usize = 2;
    const NAME: &'static str = "Shioi";

    #[inline]
    fn advance(&mut self) -> u64 {
        let result = self
            .s0
            .wrapping_mul(0xD2B7_4407_B1CE_6E93)
            .rotate_left(29)
            .wrapping_add(self.s1);
        self.step();
        result
    }

    fn load_seed(&mut self, seed: &[u64]) {
        if let [s0, s1, ..] = *seed {
            *self = Self::new(s0, s1);
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
    fn test_golden() {
        let mut rng = Shioi::new(1, 2);
        let expected = [
            0xf639cdd27a56e882_u64,
            0xec739ba4d4add107,
            0xc55ad2ee5e097313,
            0x7729418150c0b723,
            0x28f7b0144377fb43,
        ];
        for &exp in &expected {
            assert_eq!(rng.advance(), exp);
        }
    }

    #[test]
    fn test_jump_golden_states() {
        let mut rng = Shioi::new(1, 2);
        rng.jump32();
        assert_eq!((rng.s0, rng.s1), (0x9152e8129e39460e, 0xe2591bff032265ff));

        let mut rng = Shioi::new(1, 2);
        rng.jump64();
        assert_eq!((rng.s0, rng.s1), (0x3, 0x4));
    }

    #[test]
    fn test_jump64_closed_form_matches_polynomial() {
        let mut closed = Shioi::new(0x0123456789abcdef, 0xfedcba9876543210);
        let mut generic = closed;
        closed.jump64();
        generic.jump_with(&[0x3, 0]);
        assert_eq!(closed, generic);
    }

    #[test]
    fn test_arithmetic_shift_in_update() {
        let mut rng = Shioi::new(1 << 63, 0);
        rng.step();
        assert_eq!(rng.s0, 0);
        // sign bit smeared across the top 20 bits
        assert_eq!(rng.s1, 0xFFFF_F000_0000_0000);
    }
}
