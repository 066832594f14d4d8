//! Multiplicative PCGs: no increment, state forced odd, period 2^62.

use super::{advance_lcg64, output, PCG_MULTIPLIER_64};
use crate::bits::join_u32;
use crate::engine::Engine;

/// Default seed shared by the multiplicative variants.
const MCG_DEFAULT_SEED: u64 = 0xcafe_f00d_d15e_a5e5;

macro_rules! pcg_mcg_32 {
    ($(#[$meta:meta])* $name:ident, $label:literal, $output:path) => {
        $(#[$meta])*
        ///
        /// Seeded from two `u32` words `[seed_hi, seed_lo]`; the low bit is forced on.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            state: u64,
        }

        impl $name {
            /// Creates a generator from `seed | 1`.
            #[must_use]
            pub const fn new(seed: u64) -> Self {
                Self { state: seed | 1 }
            }

            /// Advances the state by `delta` steps in `O(log delta)`.
            pub fn jump(&mut self, delta: u64) {
                self.state = advance_lcg64(self.state, delta, PCG_MULTIPLIER_64, 0);
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(MCG_DEFAULT_SEED)
            }
        }

        impl Engine for $name {
            type Word = u32;
            const SEED_WORDS: usize = 2;
            const NAME: &'static str = $label;

            #[inline]
            fn advance(&mut self) -> u32 {
                let old = self.state;
                self.state = self.state.wrapping_mul(PCG_MULTIPLIER_64);
                $output(old)
            }

            fn load_seed(&mut self, seed: &[u32]) {
                if let [high, low, ..] = *seed {
                    *self = Self::new(join_u32(high, low));
                }
            }

            fn seed_from_u64(seed: u64) -> Self {
                Self::new(seed)
            }
        }
    };
}

pcg_mcg_32!(
    /// Multiplicative PCG with XSH-RR output.
    PcgMcgXshRr32,
    "PCG MCG-XSH-RR 32-bit",
    output::xsh_rr
);

pcg_mcg_32!(
    /// Multiplicative PCG with XSL-RR output.
    PcgMcgXslRr32,
    "PCG MCG-XSL-RR 32-bit",
    output::xsl_rr
);

pcg_mcg_32!(
    /// Multiplicative PCG with XSL-RS output.
    PcgMcgXslRs32,
    "PCG MCG-XSL-RS 32-bit",
    output::xsl_rs
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

    fn take<E: Engine<Word = u32>>(mut rng: E) -> Vec<u32> {
        (0..5).map(|_| rng.advance()).collect()
    }

    #[test]
    fn test_mcg_golden() {
        assert_eq!(
            take(PcgMcgXshRr32::new(42)),
            vec![0x00000000, 0x21b756ee, 0x135e80e8, 0xf6025706, 0xd2fc74a3]
        );
        assert_eq!(
            take(PcgMcgXslRr32::new(42)),
            vec![0x0000002b, 0x3617c502, 0x4a8ae596, 0xb00afbae, 0x8ab2f423]
        );
        assert_eq!(
            take(PcgMcgXslRs32::new(42)),
            vec![0x0000002b, 0x6c23617c, 0x6cb2c951, 0xe9d6015f, 0xd65e8471]
        );
    }

    #[test]
    fn test_xsl_rs_shifts_where_xsl_rr_rotates() {
        // top three bits select a shift of 7; bits 59..64 select a rotation of 28
        let state = 0xe000_0000_e000_00ff;
        assert_eq!(PcgMcgXslRs32::new(state).advance(), 0x0000_0001);
        assert_eq!(PcgMcgXslRr32::new(state).advance(), 0x0000_0ff0);
    }

    #[test]
    fn test_state_forced_odd() {
        assert_eq!(PcgMcgXslRr32::new(42), PcgMcgXslRr32::new(43));
        let mut rng = PcgMcgXslRr32::default();
        rng.set_seed(&[0, 42]).unwrap();
        assert_eq!(rng, PcgMcgXslRr32::new(43));
    }

    #[test]
    fn test_jump_matches_stepping() {
        let mut jumped = PcgMcgXshRr32::new(99);
        let mut stepped = jumped;
        jumped.jump(1000);
        for _ in 0..1000 {
            stepped.advance();
        }
        assert_eq!(jumped, stepped);
    }
}
