//! Seiran128: a 128-bit linear generator over GF(2) with a nonlinear output.
//!
//! The state update is linear, so jumping ahead by `2^k` steps is a product
//! with a fixed characteristic polynomial: for every set bit of the
//! polynomial, xor the current state into an accumulator, then step. The
//! update is also invertible, which gives [`Seiran::previous`].

use crate::engine::{expand_seed, repair_zero_state, Engine};

const JUMP_32: [u64; 2] = [0x4016_5CBA_E9CA_6DEB, 0x688E_6BFC_1948_5AB1];
const JUMP_64: [u64; 2] = [0xF4DF_34E4_24CA_5C56, 0x2FE2_DE5C_2E12_F601];
const JUMP_96: [u64; 2] = [0x185F_4DF8_B763_4607, 0x95A9_8C70_25F9_08B2];

/// Seiran128: two 64-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seiran {
    s0: u64,
    s1: u64,
}

impl Seiran {
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
        self.s0 = s0 ^ s1.rotate_left(29);
        self.s1 = s0 ^ (s1 << 9);
    }

    /// Rewinds the state by one step, undoing the last `advance`.
    pub fn previous(&mut self) {
        let mut t1 = (self.s0 ^ self.s1).rotate_left(35);
        t1 ^= (t1 << 44) ^ ((t1 & !0xFFFFF) << 24);
        t1 ^= (t1 & (0x7FFF << 40)) << 4;
        t1 ^= (t1 & (0x7FF << 40)) << 8;
        t1 ^= (t1 & (0x7 << 40)) << 16;
        t1 ^= (t1 & (0xFFFFF << 35)) >> 20;
        t1 ^= (t1 & (0x7FFF << 20)) >> 20;
        self.s0 ^= t1.rotate_left(29);
        self.s1 = t1;
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
        self.jump_with(&JUMP_64);
    }

    /// Advances the state by 2^96 steps.
    pub fn jump96(&mut self) {
        self.jump_with(&JUMP_96);
    }
}

/// Seeded with the SplitMix64(0) expansion.
impl Default for Seiran {
    fn default() -> Self {
        match expand_seed::<u64>(0, 2)[..] {
            [s0, s1] => Self { s0, s1 },
            _ => Self { s0: 1, s1: 0 },
        }
    }
}

impl Engine for Seiran {
    type Word = u64;
    const SEED_WORDS: usize = 2;
    const NAME: &'static str = "Seiran";

    #[inline]
    fn advance(&mut self) -> u64 {
        let result = self
            .s0
            .wrapping_add(self.s1)
            .wrapping_mul(9)
            .rotate_left(29)
            .wrapping_add(self.s0);
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
        let mut rng = Seiran::new(1, 2);
        let expected = [
            0x0000000360000001_u64,
            0x4800048280000001,
            0xb40902c2a0000091,
            0xce058302890120d9,
            0xc30602c2afc2d0b5,
        ];
        for &exp in &expected {
            assert_eq!(rng.advance(), exp);
        }
    }

    #[test]
    fn test_default_golden() {
        let mut rng = Seiran::default();
        assert_eq!(rng.advance(), 0x8292c250f5ca3d27);
        assert_eq!(rng.advance(), 0xf6d5a91b192d60a4);
    }

    #[test]
    fn test_previous_inverts_advance() {
        let mut rng = Seiran::new(0x0123456789abcdef, 0xfedcba9876543210);
        let start = rng;
        rng.advance();
        rng.previous();
        assert_eq!(rng, start);

        let first = rng.advance();
        rng.advance();
        rng.previous();
        rng.previous();
        assert_eq!(rng.advance(), first);
    }

    #[test]
    fn test_jump32_golden_state() {
        let mut rng = Seiran::new(1, 2);
        rng.jump32();
        assert_eq!((rng.s0, rng.s1), (0xb3a0f6c68fee1b11, 0x917c50a0643d3870));
    }

    #[test]
    fn test_jumps_are_distinct() {
        let mut a = Seiran::new(1, 2);
        let mut b = a;
        let mut c = a;
        a.jump32();
        b.jump64();
        c.jump96();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }
}
