//! Tyche and Tyche-i: generators built on one ChaCha quarter-round.
//!
//! Tyche applies the forward quarter-round (rotations 16/12/8/7) and returns
//! `b`. Tyche-i applies the algebraic inverse (rotations 25/24/20/16 with
//! subtraction), which has more instruction-level parallelism, and returns
//! `a`. Both start from the same seed layout and discard 20 rounds.

use crate::engine::Engine;

const WARM_UP_ROUNDS: usize = 20;
const TYCHE_C: u32 = 2654435769;
const TYCHE_D: u32 = 1367130551;

macro_rules! tyche_variant {
    ($(#[$meta:meta])* $name:ident, default_seed = $default:expr) => {
        $(#[$meta])*
        ///
        /// Seeded from a 64-bit seed and a 32-bit stream index; as a word slice,
        /// `[seed_hi, seed_lo, idx]`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            a: u32,
            b: u32,
            c: u32,
            d: u32,
        }

        impl $name {
            /// Creates a generator from a seed and a stream index.
            #[must_use]
            pub fn new(seed: u64, idx: u32) -> Self {
                let mut rng = Self {
                    a: (seed >> 32) as u32,
                    b: seed as u32,
                    c: TYCHE_C,
                    d: idx ^ TYCHE_D,
                };
                for _ in 0..WARM_UP_ROUNDS {
                    rng.mix();
                }
                rng
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new($default, 0)
            }
        }
    };
}

tyche_variant!(
    /// Tyche: forward ChaCha quarter-round.
    Tyche,
    default_seed = 0
);

tyche_variant!(
    /// Tyche-i: inverted ChaCha quarter-round.
    TycheI,
    default_seed = 0xFEED_FACE_CAFE_F00D
);

impl Tyche {
    #[inline]
    fn mix(&mut self) {
        self.a = self.a.wrapping_add(self.b);
        self.d = (self.d ^ self.a).rotate_left(16);
        self.c = self.c.wrapping_add(self.d);
        self.b = (self.b ^ self.c).rotate_left(12);
        self.a = self.a.wrapping_add(self.b);
        self.d = (self.d ^ self.a).rotate_left(8);
        self.c = self.c.wrapping_add(self.d);
        self.b = (self.b ^ self.c).rotate_left(7);
    }
}

impl TycheI {
    #[inline]
    fn mix(&mut self) {
        self.b = self.b.rotate_left(25) ^ self.c;
        self.c = self.c.wrapping_sub(self.d);
        self.d = self.d.rotate_left(24) ^ self.a;
        self.a = self.a.wrapping_sub(self.b);
        self.b = self.b.rotate_left(20) ^ self.c;
        self.c = self.c.wrapping_sub(self.d);
        self.d = self.d.rotate_left(16) ^ self.a;
        self.a = self.a.wrapping_sub(self.b);
    }
}

impl Engine for Tyche {
    type Word = u32;
    const SEED_WORDS: usize = 3;
    const NAME: &'static str = "Tyche";

    #[inline]
    fn advance(&mut self) -> u32 {
        self.mix();
        self.b
    }

    fn load_seed(&mut self, seed: &[u32]) {
        if let [high, low, idx, ..] = *seed {
            *self = Self::new(crate::bits::join_u32(high, low), idx);
        }
    }
}

impl Engine for TycheI {
    type Word = u32;
    const SEED_WORDS: usize = 3;
    const NAME: &'static str = "Tyche-i";

    #[inline]
    fn advance(&mut self) -> u32 {
        self.mix();
        self.a
    }

    fn load_seed(&mut self, seed: &[u32]) {
        if let [high, low, idx, ..] = *seed {
            *self = Self::new(crate::bits::join_u32(high, low), idx);
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

    fn take<E: Engine<Word = u32>>(mut rng: E) -> Vec<u32> {
        (0..5).map(|_| rng.advance()).collect()
    }

    #[test]
    fn test_tyche_golden() {
        assert_eq!(
            take(Tyche::new(42, 0)),
            vec![0x6af2893c, 0xa4066867, 0xeaf7f217, 0xe3d80dfa, 0x157af99f]
        );
        assert_eq!(
            take(Tyche::default()),
            vec![0x02e5d39d, 0x41484fe0, 0x89fe8430, 0xe7aa9e3a, 0xe7567bae]
        );
    }

    #[test]
    fn test_tyche_i_golden() {
        assert_eq!(
            take(TycheI::new(42, 0)),
            vec![0xee88ac30, 0x0808d5e6, 0xc9e74a8f, 0x765d30d1, 0x1d1bc935]
        );
        assert_eq!(
            take(TycheI::default()),
            vec![0x3e8849ab, 0x81622255, 0x22296525, 0xf4124847, 0xf2e3c94d]
        );
    }

    #[test]
    fn test_inverse_round_undoes_forward_round() {
        let mut forward = Tyche::new(7, 3);
        let before = (forward.a, forward.b, forward.c, forward.d);
        forward.mix();
        let mut inverse = TycheI {
            a: forward.a,
            b: forward.b,
            c: forward.c,
            d: forward.d,
        };
        inverse.mix();
        assert_eq!((inverse.a, inverse.b, inverse.c, inverse.d), before);
    }

    #[test]
    fn test_seed_splits_into_high_and_low_words() {
        let mut expected = Tyche {
            a: 0xffff_ffff,
            b: 0xffff_fffe,
            c: TYCHE_C,
            d: 5 ^ TYCHE_D,
        };
        for _ in 0..WARM_UP_ROUNDS {
            expected.mix();
        }
        assert_eq!(Tyche::new(u64::MAX - 1, 5), expected);

        let mut expected = TycheI {
            a: 1,
            b: 0,
            c: TYCHE_C,
            d: TYCHE_D,
        };
        for _ in 0..WARM_UP_ROUNDS {
            expected.mix();
        }
        assert_eq!(TycheI::new(1 << 32, 0), expected);
    }

    #[test]
    fn test_set_seed_layout() {
        let mut rng = Tyche::default();
        rng.set_seed(&[0, 42, 0]).unwrap();
        assert_eq!(rng, Tyche::new(42, 0));
    }
}
