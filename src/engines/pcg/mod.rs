//! Permuted congruential generators.
//!
//! A PCG is a linear (or multiplicative) congruential state update followed by
//! an output permutation that returns fewer bits than the state holds. The
//! permutation is computed from the state *before* the update, so the LCG step
//! and the permutation can run in parallel.
//!
//! # Families
//!
//! | Type | State | Output | Permutation |
//! |---|---|---|---|
//! | [`Pcg32XshRr`] | 64-bit LCG | 32 | xorshift high, random rotate |
//! | [`Pcg32XshRs`] | 64-bit LCG | 32 | xorshift high, random shift |
//! | [`Pcg32XslRr`] | 64-bit LCG | 32 | xorshift low, random rotate |
//! | [`Pcg32RxsMXs`] | 32-bit LCG | 32 | random xorshift, multiply, xorshift |
//! | [`Pcg64RxsMXs`] | 64-bit LCG | 64 | random xorshift, multiply, xorshift |
//! | [`Pcg64XslRrRr`] | 64-bit LCG | 64 | xorshift low, double random rotate |
//! | [`Pcg64XshRr`] | 128-bit LCG | 64 | xorshift high, random rotate |
//! | [`PcgMcgXshRr32`] | 64-bit MCG | 32 | xorshift high, random rotate |
//! | [`PcgMcgXslRr32`] | 64-bit MCG | 32 | xorshift low, random rotate |
//! | [`PcgMcgXslRs32`] | 64-bit MCG | 32 | xorshift low, random shift |
//!
//! Set-sequence variants take a stream selector alongside the seed:
//! `increment = (stream << 1) | 1; state = 0; step; state += seed; step`.
//! Generators with different streams never share a sequence.
//!
//! # Jumping
//!
//! Every variant provides `jump(delta)`, equal to `delta` calls of `advance`,
//! computed in `O(log delta)` with Brown's arbitrary-stride algorithm.
//!
//! Reference: <https://www.pcg-random.org/>

mod mcg;
mod setseq;
mod wide;

pub use mcg::{PcgMcgXshRr32, PcgMcgXslRr32, PcgMcgXslRs32};
pub use setseq::{Pcg32RxsMXs, Pcg32XshRr, Pcg32XshRs, Pcg32XslRr, Pcg64RxsMXs, Pcg64XslRrRr};
pub use wide::Pcg64XshRr;

/// Multiplier for 64-bit state.
pub const PCG_MULTIPLIER_64: u64 = 6364136223846793005;

/// Default increment (and default stream) for 64-bit state.
pub const PCG_DEFAULT_INCREMENT_64: u64 = 1442695040888963407;

/// Multiplier for 32-bit state.
pub const PCG_MULTIPLIER_32: u32 = 747796405;

/// Default stream for 32-bit state.
pub const PCG_DEFAULT_STREAM_32: u32 = 2891336453;

/// Multiplier for 128-bit state.
pub const PCG_MULTIPLIER_128: u128 = (2549297995355413924 << 64) | 4865540595714422341;

/// Default stream for 128-bit state.
pub const PCG_DEFAULT_STREAM_128: u128 = (6364136223846793005 << 64) | 1442695040888963407;

macro_rules! brown_advance {
    ($name:ident, $ty:ty, $delta:ty) => {
        /// Brown's arbitrary-stride jump: the state after `delta` steps of
        /// `state * mult + plus`, in `O(log delta)`.
        #[must_use]
        pub const fn $name(state: $ty, mut delta: $delta, mult: $ty, plus: $ty) -> $ty {
            let mut acc_mult: $ty = 1;
            let mut acc_plus: $ty = 0;
            let mut cur_mult = mult;
            let mut cur_plus = plus;
            while delta > 0 {
                if delta & 1 == 1 {
                    acc_mult = acc_mult.wrapping_mul(cur_mult);
                    acc_plus = acc_plus.wrapping_mul(cur_mult).wrapping_add(cur_plus);
                }
                cur_plus = cur_mult.wrapping_add(1).wrapping_mul(cur_plus);
                cur_mult = cur_mult.wrapping_mul(cur_mult);
                delta >>= 1;
            }
            acc_mult.wrapping_mul(state).wrapping_add(acc_plus)
        }
    };
}

brown_advance!(advance_lcg32, u32, u64);
brown_advance!(advance_lcg64, u64, u64);
brown_advance!(advance_lcg128, u128, u128);

/// Output permutations. Each takes the pre-update state.
#[doc(hidden)]
pub mod output {
    use crate::bits::join_u32;

    /// Xorshift high, random rotate: 64 to 32 bits.
    #[inline]
    pub const fn xsh_rr(old: u64) -> u32 {
        ((((old >> 18) ^ old) >> 27) as u32).rotate_right((old >> 59) as u32)
    }

    /// Xorshift high, random shift: 64 to 32 bits.
    #[inline]
    pub const fn xsh_rs(old: u64) -> u32 {
        (((old >> 22) ^ old) >> (22 + (old >> 61))) as u32
    }

    /// Xorshift low, random rotate: 64 to 32 bits.
    #[inline]
    pub const fn xsl_rr(old: u64) -> u32 {
        (((old >> 32) ^ old) as u32).rotate_right((old >> 59) as u32)
    }

    /// Xorshift low, random shift: 64 to 32 bits.
    #[inline]
    pub const fn xsl_rs(old: u64) -> u32 {
        ((old ^ (old >> 32)) >> (old >> 61)) as u32
    }

    /// Random xorshift, multiply, xorshift: 32 to 32 bits.
    #[inline]
    pub const fn rxs_m_xs_32(state: u32) -> u32 {
        let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277803737);
        (word >> 22) ^ word
    }

    /// Random xorshift, multiply, xorshift: 64 to 64 bits.
    #[inline]
    pub const fn rxs_m_xs_64(state: u64) -> u64 {
        let word = ((state >> ((state >> 59) + 5)) ^ state).wrapping_mul(12605985483714917081);
        (word >> 43) ^ word
    }

    /// Xorshift low, then rotate both halves: 64 to 64 bits.
    #[inline]
    pub const fn xsl_rr_rr(state: u64) -> u64 {
        let rot1 = (state >> 59) as u32;
        let high = (state >> 32) as u32;
        let low = state as u32;
        let new_low = (high ^ low).rotate_right(rot1);
        let new_high = high.rotate_right(new_low & 31);
        join_u32(new_high, new_low)
    }

    /// Xorshift high, random rotate: 128 to 64 bits.
    #[inline]
    pub const fn xsh_rr_128(old: u128) -> u64 {
        ((((old >> 35) ^ old) >> 58) as u64).rotate_right((old >> 122) as u32)
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
    fn test_advance_zero_is_identity() {
        assert_eq!(
            advance_lcg64(12345, 0, PCG_MULTIPLIER_64, PCG_DEFAULT_INCREMENT_64),
            12345
        );
    }

    #[test]
    fn test_advance_matches_stepping() {
        let mut state = 0xdead_beef_u64;
        for _ in 0..1000 {
            state = state
                .wrapping_mul(PCG_MULTIPLIER_64)
                .wrapping_add(PCG_DEFAULT_INCREMENT_64);
        }
        assert_eq!(
            advance_lcg64(0xdead_beef, 1000, PCG_MULTIPLIER_64, PCG_DEFAULT_INCREMENT_64),
            state
        );

        let mut small = 7u32;
        for _ in 0..777 {
            small = small.wrapping_mul(PCG_MULTIPLIER_32).wrapping_add(11);
        }
        assert_eq!(advance_lcg32(7, 777, PCG_MULTIPLIER_32, 11), small);
    }

    #[test]
    fn test_full_period_wraps_to_start() {
        // a full-period 32-bit LCG returns to its start after 2^32 steps
        assert_eq!(advance_lcg32(99, 1 << 32, PCG_MULTIPLIER_32, 1), 99);
    }
}
