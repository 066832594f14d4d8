//! Set-sequence PCGs over 32- and 64-bit LCG state.

use super::{
    advance_lcg32, advance_lcg64, output, PCG_DEFAULT_INCREMENT_64, PCG_DEFAULT_STREAM_32,
    PCG_MULTIPLIER_32, PCG_MULTIPLIER_64,
};
use crate::bits::join_u32;
use crate::engine::{Engine, NativeWord};

/// How a seed slice of native words spells `(seed, stream)` for a 64-bit LCG.
trait StreamSeed: NativeWord {
    const WORDS: usize;
    fn seed_and_stream(seed: &[Self]) -> (u64, u64);
}

impl StreamSeed for u32 {
    const WORDS: usize = 4;

    fn seed_and_stream(seed: &[Self]) -> (u64, u64) {
        match *seed {
            [seed_hi, seed_lo, stream_hi, stream_lo, ..] => {
                (join_u32(seed_hi, seed_lo), join_u32(stream_hi, stream_lo))
            },
            _ => (0, PCG_DEFAULT_INCREMENT_64),
        }
    }
}

impl StreamSeed for u64 {
    const WORDS: usize = 2;

    fn seed_and_stream(seed: &[Self]) -> (u64, u64) {
        match *seed {
            [seed, stream, ..] => (seed, stream),
            _ => (0, PCG_DEFAULT_INCREMENT_64),
        }
    }
}

macro_rules! pcg_setseq_64 {
    ($(#[$meta:meta])* $name:ident, $label:literal, $word:ty, $output:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            state: u64,
            increment: u64,
        }

        impl $name {
            /// Creates a generator on stream `stream` starting from `seed`.
            #[must_use]
            pub const fn new(seed: u64, stream: u64) -> Self {
                let mut rng = Self {
                    state: 0,
                    increment: (stream << 1) | 1,
                };
                rng.step();
                rng.state = rng.state.wrapping_add(seed);
                rng.step();
                rng
            }

            #[inline]
            const fn step(&mut self) {
                self.state = self
                    .state
                    .wrapping_mul(PCG_MULTIPLIER_64)
                    .wrapping_add(self.increment);
            }

            /// Advances the state by `delta` steps in `O(log delta)`.
            pub fn jump(&mut self, delta: u64) {
                self.state = advance_lcg64(self.state, delta, PCG_MULTIPLIER_64, self.increment);
            }
        }

        /// Seed 0 on the default stream.
        impl Default for $name {
            fn default() -> Self {
                Self::new(0, PCG_DEFAULT_INCREMENT_64)
            }
        }

        impl Engine for $name {
            type Word = $word;
            const SEED_WORDS: usize = <$word as StreamSeed>::WORDS;
            const NAME: &'static str = $label;

            #[inline]
            fn advance(&mut self) -> $word {
                let old = self.state;
                self.step();
                $output(old)
            }

            fn load_seed(&mut self, seed: &[$word]) {
                let (seed, stream) = <$word as StreamSeed>::seed_and_stream(seed);
                *self = Self::new(seed, stream);
            }

            /// Uses `seed` directly on the default stream.
            fn seed_from_u64(seed: u64) -> Self {
                Self::new(seed, PCG_DEFAULT_INCREMENT_64)
            }
        }
    };
}

pcg_setseq_64!(
    /// PCG-XSH-RR with 64-bit state and 32-bit output, the classic `pcg32`.
    ///
    /// Seeded from four `u32` words `[seed_hi, seed_lo, stream_hi, stream_lo]`.
    Pcg32XshRr,
    "PCG XSH-RR 32-bit",
    u32,
    output::xsh_rr
);

pcg_setseq_64!(
    /// PCG-XSH-RS with 64-bit state and 32-bit output.
    ///
    /// Seeded from four `u32` words `[seed_hi, seed_lo, stream_hi, stream_lo]`.
    Pcg32XshRs,
    "PCG XSH-RS 32-bit",
    u32,
    output::xsh_rs
);

pcg_setseq_64!(
    /// PCG-XSL-RR with 64-bit state and 32-bit output.
    ///
    /// Seeded from four `u32` words `[seed_hi, seed_lo, stream_hi, stream_lo]`.
    Pcg32XslRr,
    "PCG XSL RR 32-bit",
    u32,
    output::xsl_rr
);

pcg_setseq_64!(
    /// PCG-RXS-M-XS with 64-bit state and 64-bit output. Every state appears
    /// exactly once per period, so outputs never repeat within it.
    ///
    /// Seeded from two `u64` words `[seed, stream]`.
    Pcg64RxsMXs,
    "PCG RXS-M-XS 64-bit",
    u64,
    output::rxs_m_xs_64
);

pcg_setseq_64!(
    /// PCG-XSL-RR-RR with 64-bit state and 64-bit output.
    ///
    /// Seeded from two `u64` words `[seed, stream]`.
    Pcg64XslRrRr,
    "PCG XSL-RR-RR 64-bit",
    u64,
    output::xsl_rr_rr
);

/// PCG-RXS-M-XS with 32-bit state and 32-bit output.
///
/// Seeded from two `u32` words `[seed, stream]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pcg32RxsMXs {
    state: u32,
    increment: u32,
}

impl Pcg32RxsMXs {
    /// Creates a generator on stream `stream` starting from `seed`.
    #[must_use]
    pub const fn new(seed: u32, stream: u32) -> Self {
        let mut rng = Self {
            state: 0,
            increment: (stream << 1) | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    const fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(PCG_MULTIPLIER_32)
            .wrapping_add(self.increment);
    }

    /// Advances the state by `delta` steps in `O(log delta)`.
    pub fn jump(&mut self, delta: u64) {
        self.state = advance_lcg32(self.state, delta, PCG_MULTIPLIER_32, self.increment);
    }
}

/// Seed 0 on the default 32-bit stream.
impl Default for Pcg32RxsMXs {
    fn default() -> Self {
        Self::new(0, PCG_DEFAULT_STREAM_32)
    }
}

impl Engine for Pcg32RxsMXs {
    type Word = u32;
    const SEED_WORDS: usize = 2;
    const NAME: &'static str = "PCG RXS-M-XS 32-bit";

    #[inline]
    fn advance(&mut self) -> u32 {
        let old = self.state;
        self.step();
        output::rxs_m_xs_32(old)
    }

    fn load_seed(&mut self, seed: &[u32]) {
        if let [seed, stream, ..] = *seed {
            *self = Self::new(seed, stream);
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

    fn take<E: Engine>(rng: &mut E, n: usize) -> Vec<E::Word> {
        (0..n).map(|_| rng.advance()).collect()
    }

    #[test]
    fn test_xsh_rr_golden() {
        let mut rng = Pcg32XshRr::new(42, 54);
        assert_eq!(
            take(&mut rng, 6),
            vec![0xa15c02b7, 0x7b47f409, 0xba1d3330, 0x83d2f293, 0xbfa4784b, 0xcbed606e]
        );
    }

    // Golden test: seed 0 on the default stream
    #[test]
    fn test_xsh_rr_default_golden() {
        let mut rng = Pcg32XshRr::seed_from_u64(0);
        let expected = [
            0x348a463f_u32,
            0x4f205a1b_u32,
            0x2946c488_u32,
            0x805e36de_u32,
            0x79f994a9_u32,
        ];
        for &exp in &expected {
            assert_eq!(rng.advance(), exp, "Golden test failed");
        }
        assert_eq!(Pcg32XshRr::default(), Pcg32XshRr::seed_from_u64(0));
    }

    #[test]
    fn test_xsh_rs_and_xsl_rr_golden() {
        assert_eq!(
            take(&mut Pcg32XshRs::new(42, 54), 5),
            vec![0x5c1b65c0, 0x8ffceb31, 0xcccad075, 0xb83cdfc6, 0x5dfce9ca]
        );
        assert_eq!(
            take(&mut Pcg32XslRr::new(42, 54), 5),
            vec![0x068f20a8, 0xed610a2e, 0x3911c946, 0xd94c9c1c, 0x0d4b401a]
        );
    }

    #[test]
    fn test_64_bit_output_golden() {
        assert_eq!(
            take(&mut Pcg64RxsMXs::new(42, 54), 5),
            vec![
                0xe1cbc180b69606bb,
                0x6573bce7abaee684,
                0xc744f07442006076,
                0x9e9f98ccbd60b8fc,
                0xde693821ee9629ae
            ]
        );
        assert_eq!(
            take(&mut Pcg64XslRrRr::new(42, 54), 5),
            vec![
                0xb8185706068f20a8,
                0xfb60ad1fed610a2e,
                0xb62ccca53911c946,
                0x7079824fd94c9c1c,
                0xefe7a5fa0d4b401a
            ]
        );
    }

    #[test]
    fn test_rxs_m_xs_32_golden() {
        assert_eq!(
            take(&mut Pcg32RxsMXs::new(42, 54), 5),
            vec![0xf84b622d, 0xdc1e5bb4, 0x74fb8ac1, 0xb3bbf8de, 0x9cf62074]
        );
        assert_eq!(
            take(&mut Pcg32RxsMXs::default(), 5),
            vec![0x13197f79, 0x871e2ffd, 0x6c35b7c7, 0xcd32ccdf, 0x9ad2cbfc]
        );
    }

    #[test]
    fn test_set_seed_word_layout() {
        let mut rng = Pcg32XshRr::default();
        rng.set_seed(&[0, 42, 0, 54]).unwrap();
        assert_eq!(rng, Pcg32XshRr::new(42, 54));

        let mut wide = Pcg64XslRrRr::default();
        wide.set_seed(&[42, 54]).unwrap();
        assert_eq!(wide, Pcg64XslRrRr::new(42, 54));

        let mut small = Pcg32RxsMXs::default();
        small.set_seed(&[42, 54, 99]).unwrap();
        assert_eq!(small, Pcg32RxsMXs::new(42, 54));
        assert!(small.set_seed(&[42]).is_err());
    }

    #[test]
    fn test_streams_differ() {
        let a = take(&mut Pcg32XshRr::new(7, 1), 8);
        let b = take(&mut Pcg32XshRr::new(7, 2), 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_jump_matches_stepping() {
        let mut jumped = Pcg32XshRs::new(3, 4);
        let mut stepped = jumped;
        jumped.jump(1000);
        for _ in 0..1000 {
            stepped.advance();
        }
        assert_eq!(jumped, stepped);

        let mut jumped = Pcg32RxsMXs::new(3, 4);
        let mut stepped = jumped;
        jumped.jump(1000);
        for _ in 0..1000 {
            stepped.advance();
        }
        assert_eq!(jumped, stepped);
    }
}
