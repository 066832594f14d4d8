//! Xoroshiro1024 family: a 16-word xor/rotate ring with three output finishers.
//!
//! All three variants share the state update and differ only in how the two
//! ring slots read on each step are turned into output:
//!
//! | Type | Output |
//! |---|---|
//! | [`Xoroshiro1024Star`] | `s0 * 0x9E3779B97F4A7C13` |
//! | [`Xoroshiro1024StarStar`] | `rotl(s0 * 5, 7) * 9` |
//! | [`Xoroshiro1024PlusPlus`] | `rotl(s0 + s15, 23) + s15` |
//!
//! The all-zero state is a fixed point; seeding with it substitutes the
//! SplitMix64(0) expansion and reports a [`ViolationKind::DegenerateSeed`].
//!
//! [`ViolationKind::DegenerateSeed`]: crate::telemetry::ViolationKind::DegenerateSeed

use crate::engine::{expand_seed, repair_zero_state, Engine};

const RING: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Ring {
    state: [u64; RING],
    index: usize,
}

impl Ring {
    fn splitmix_default() -> Self {
        let mut state = [0u64; RING];
        for (slot, word) in state.iter_mut().zip(expand_seed::<u64>(0, RING)) {
            *slot = word;
        }
        Self { state, index: 0 }
    }

    fn load(&mut self, algorithm: &'static str, seed: &[u64]) {
        for (slot, &word) in self.state.iter_mut().zip(seed) {
            *slot = word;
        }
        self.index = 0;
        repair_zero_state(algorithm, &mut self.state);
    }

    /// Rotates the ring by one slot, returns `finish(s0, s15)` over the pre-update words.
    #[inline]
    fn step(&mut self, finish: impl FnOnce(u64, u64) -> u64) -> u64 {
        let q = self.index;
        self.index = (self.index + 1) & (RING - 1);
        let s0 = self.state[self.index];
        let mut s15 = self.state[q];
        let result = finish(s0, s15);

        s15 ^= s0;
        self.state[q] = s0.rotate_left(25) ^ s15 ^ (s15 << 27);
        self.state[self.index] = s15.rotate_left(36);
        result
    }
}

macro_rules! xoroshiro_variant {
    ($(#[$meta:meta])* $name:ident, $label:literal, |$s0:ident, $s15:ident| $finish:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            ring: Ring,
        }

        impl $name {
            /// Creates a generator from the 16 ring words.
            ///
            /// An all-zero ring is replaced by the SplitMix64(0) expansion.
            #[must_use]
            pub fn new(state: [u64; RING]) -> Self {
                let mut rng = Self::default();
                rng.load_seed(&state);
                rng
            }
        }

        /// Seeded with the SplitMix64(0) expansion.
        impl Default for $name {
            fn default() -> Self {
                Self {
                    ring: Ring::splitmix_default(),
                }
            }
        }

        impl Engine for $name {
            type Word = u64;
            const SEED_WORDS: usize = RING;
            const NAME: &'static str = $label;

            #[inline]
            #[allow(unused_variables)]
            fn advance(&mut self) -> u64 {
                self.ring.step(|$s0, $s15| $finish)
            }

            fn load_seed(&mut self, seed: &[u64]) {
                self.ring.load(Self::NAME, seed);
            }
        }
    };
}

xoroshiro_variant!(
    /// Xoroshiro1024\*: multiplicative finisher. The lowest bits are weak;
    /// prefer the top bits (as `next_double` and `next_u32` do).
    Xoroshiro1024Star,
    "Xoroshiro 1024*",
    |s0, s15| s0.wrapping_mul(0x9E37_79B9_7F4A_7C13)
);

xoroshiro_variant!(
    /// Xoroshiro1024\*\*: rotate-multiply finisher, all bits pass BigCrush.
    Xoroshiro1024StarStar,
    "Xoroshiro 1024**",
    |s0, s15| s0.wrapping_mul(5).rotate_left(7).wrapping_mul(9)
);

xoroshiro_variant!(
    /// Xoroshiro1024++: rotate-add finisher over both slots.
    Xoroshiro1024PlusPlus,
    "Xoroshiro 1024++",
    |s0, s15| s0.wrapping_add(s15).rotate_left(23).wrapping_add(s15)
);

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::telemetry::{with_observer, CollectingObserver, ViolationKind};
    use std::sync::Arc;

    fn counting_state() -> [u64; 16] {
        let mut state = [0u64; 16];
        for (i, slot) in state.iter_mut().enumerate() {
            *slot = i as u64 + 1;
        }
        state
    }

    fn first_five<E: Engine<Word = u64>>(mut rng: E) -> [u64; 5] {
        [
            rng.advance(),
            rng.advance(),
            rng.advance(),
            rng.advance(),
            rng.advance(),
        ]
    }

    #[test]
    fn test_star_golden() {
        assert_eq!(
            first_five(Xoroshiro1024Star::new(counting_state())),
            [
                0x3c6ef372fe94f826,
                0xdaa66d2c7ddf7439,
                0x78dde6e5fd29f04c,
                0x1715609f7c746c5f,
                0xb54cda58fbbee872
            ]
        );
    }

    #[test]
    fn test_star_star_golden() {
        assert_eq!(
            first_five(Xoroshiro1024StarStar::new(counting_state())),
            [0x2d00, 0x4380, 0x5a00, 0x7080, 0x8700]
        );
    }

    #[test]
    fn test_plus_plus_golden() {
        assert_eq!(
            first_five(Xoroshiro1024PlusPlus::new(counting_state())),
            [
                0x0000000001800001,
                0x1800003001800000,
                0x1800003182000300,
                0x2000304182800318,
                0x280031d203030418
            ]
        );
    }

    #[test]
    fn test_defaults_use_splitmix_expansion() {
        assert_eq!(
            first_five(Xoroshiro1024Star::default()),
            [
                0x505422bf52acc11c,
                0x3cb2cffd381868dd,
                0x659bb9fb2cd3f484,
                0xb43965ff41c9bb81,
                0x7755aae129f36f5e
            ]
        );
        assert_eq!(
            first_five(Xoroshiro1024StarStar::default())[0],
            0x99ec5f36cb75f2b4
        );
        assert_eq!(
            first_five(Xoroshiro1024PlusPlus::default())[0],
            0x342f13d34cc61a52
        );
    }

    #[test]
    fn test_zero_state_is_repaired_and_reported() {
        let observer = Arc::new(CollectingObserver::new());
        let rng = with_observer(observer.clone(), || Xoroshiro1024PlusPlus::new([0; 16]));
        assert_eq!(rng, Xoroshiro1024PlusPlus::default());
        assert!(observer.has_violation(ViolationKind::DegenerateSeed));
    }

    #[test]
    fn test_seed_length_checked() {
        let mut rng = Xoroshiro1024Star::default();
        assert!(rng.set_seed(&[1, 2, 3]).is_err());
        assert!(rng.set_seed(&counting_state()).is_ok());
        assert_eq!(rng.advance(), 0x3c6ef372fe94f826);
    }
}
