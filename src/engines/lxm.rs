//! LXM generators: an LCG and an xorshift generator combined by a Lea mix.
//!
//! The two sub-generators update independently. Output is
//! `lea(ls + x0)` over the pre-update states, so the LCG supplies period and
//! the xorshift part supplies equidistribution. Jumps advance only the LCG,
//! which keeps the jumped stream disjoint from the original.
//!
//! The additive constant `la` is forced odd without a report, like a PCG
//! increment. An all-zero xorshift state is derived from `ls` with the Lea mix
//! and reported as an adjusted seed.

use crate::bits::{lea32, lea64};
use crate::engine::Engine;
use crate::entropy::EntropySource;
use crate::error::RandomError;
use crate::{
    report_violation,
    telemetry::{ViolationKind, ViolationSeverity},
};

macro_rules! lxm_variant {
    (
        $(#[$meta:meta])*
        $name:ident, $word:ty,
        mix = $mix:path,
        multiplier = $m:literal,
        long_jump = ($mp:literal, $cp:literal),
        golden_gamma = $gamma:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            la: $word,
            ls: $word,
            x0: $word,
            x1: $word,
        }

        impl $name {
            const M: $word = $m;
            const LONG_JUMP_MULTIPLIER: $word = $mp;
            const LONG_JUMP_ADDEND: $word = $cp;

            /// Creates a generator from the LCG addend `la`, the LCG state `ls`
            /// and the two xorshift words.
            #[must_use]
            pub fn new(la: $word, ls: $word, x0: $word, x1: $word) -> Self {
                let mut rng = Self {
                    la: la | 1,
                    ls,
                    x0,
                    x1,
                };
                if x0 == 0 && x1 == 0 {
                    rng.x0 = $mix(ls);
                    rng.x1 = $mix(ls.wrapping_add($gamma));
                    report_violation!(
                        ViolationSeverity::Warning,
                        ViolationKind::SeedAdjusted,
                        Self::NAME,
                        "xorshift state was all zero; derived it from the LCG state"
                    );
                }
                rng
            }

            /// Advances the LCG by one cycle; the xorshift state is unchanged.
            pub fn jump(&mut self) {
                self.ls = Self::M.wrapping_mul(self.ls).wrapping_add(self.la);
            }

            /// Advances the LCG by one long stride; the xorshift state is unchanged.
            pub fn long_jump(&mut self) {
                self.ls = Self::LONG_JUMP_MULTIPLIER
                    .wrapping_mul(self.ls)
                    .wrapping_add(Self::LONG_JUMP_ADDEND.wrapping_mul(self.la));
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(0, 0, 1, 1)
            }
        }
    };
}

lxm_variant!(
    /// L32X64Mix: 32-bit LCG with a 64-bit xoroshiro, 32-bit output.
    ///
    /// `long_jump` advances the LCG by 2^16 cycles.
    L32X64Mix,
    u32,
    mix = lea32,
    multiplier = 0xadb4a92d,
    long_jump = (0x65640001, 0x046b0000),
    golden_gamma = 0x9e3779b9
);

lxm_variant!(
    /// L64X128Mix: 64-bit LCG with a 128-bit xoroshiro, 64-bit output.
    ///
    /// `long_jump` advances the LCG by 2^32 cycles. Reseeding from an entropy
    /// source is not provided.
    L64X128Mix,
    u64,
    mix = lea64,
    multiplier = 0xd1342543de82ef95,
    long_jump = (0x8d23804c00000001, 0x16691c9700000000),
    golden_gamma = 0x9e3779b97f4a7c15
);

impl Engine for L32X64Mix {
    type Word = u32;
    const SEED_WORDS: usize = 4;
    const NAME: &'static str = "L32X64Mix";

    #[inline]
    fn advance(&mut self) -> u32 {
        let result = lea32(self.ls.wrapping_add(self.x0));
        self.ls = Self::M.wrapping_mul(self.ls).wrapping_add(self.la);

        let q0 = self.x0;
        let q1 = self.x1 ^ q0;
        self.x0 = q0.rotate_left(26) ^ q1 ^ (q1 << 9);
        self.x1 = q1.rotate_left(13);
        result
    }

    fn load_seed(&mut self, seed: &[u32]) {
        if let [la, ls, x0, x1, ..] = *seed {
            *self = Self::new(la, ls, x0, x1);
        }
    }
}

impl Engine for L64X128Mix {
    type Word = u64;
    const SEED_WORDS: usize = 4;
    const NAME: &'static str = "L64X128Mix";

    #[inline]
    fn advance(&mut self) -> u64 {
        let result = lea64(self.ls.wrapping_add(self.x0));
        self.ls = Self::M.wrapping_mul(self.ls).wrapping_add(self.la);

        let q0 = self.x0;
        let q1 = self.x1 ^ q0;
        self.x0 = q0.rotate_left(24) ^ q1 ^ (q1 << 16);
        self.x1 = q1.rotate_left(37);
        result
    }

    fn load_seed(&mut self, seed: &[u64]) {
        if let [la, ls, x0, x1, ..] = *seed {
            *self = Self::new(la, ls, x0, x1);
        }
    }

    fn reseed<S: EntropySource + ?Sized>(&mut self, _source: &mut S) -> Result<(), RandomError> {
        Err(RandomError::NotImplemented {
            operation: "L64X128Mix::reseed",
        })
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
    use crate::entropy::ReplayEntropy;
    use crate::telemetry::{with_observer, CollectingObserver};
    use std::sync::Arc;

    fn take<E: Engine>(mut rng: E) -> Vec<E::Word> {
        (0..5).map(|_| rng.advance()).collect()
    }

    #[test]
    fn test_l32_golden() {
        assert_eq!(
            take(L32X64Mix::new(1, 2, 3, 4)),
            vec![0xdd994d05, 0x8fff0da7, 0x227e2fa8, 0xba165ef0, 0x691c1508]
        );
        assert_eq!(
            take(L32X64Mix::default()),
            vec![0x2aa3ce81, 0xc16ceddb, 0xc4e8e2bd, 0x8bbf4d8f, 0x6479b771]
        );
    }

    #[test]
    fn test_l64_golden() {
        assert_eq!(
            take(L64X128Mix::new(1, 2, 3, 4)),
            vec![
                0x3594601cea320f0e,
                0x004b667fda285b58,
                0x3095a4541b860473,
                0x14d3e4a5d865349e,
                0xc2c9a43e50dbad37
            ]
        );
        assert_eq!(
            take(L64X128Mix::default()),
            vec![
                0xc6caf8cba3316acc,
                0x6822485b83cd754d,
                0x1ee9b7cb95d776e7,
                0xb8415db2c200ec64,
                0x4d5e3e760b3809c2
            ]
        );
    }

    #[test]
    fn test_zero_xorshift_state_is_derived() {
        let observer = Arc::new(CollectingObserver::new());
        let rng = with_observer(observer.clone(), || L32X64Mix::new(1, 2, 0, 0));
        assert_eq!(
            take(rng),
            vec![0x16331ded, 0xf36e1df8, 0xd449fb91, 0x17fe8901, 0xfff34d31]
        );
        assert!(observer.has_violation(ViolationKind::SeedAdjusted));
    }

    #[test]
    fn test_addend_forced_odd() {
        let observer = Arc::new(CollectingObserver::new());
        let (even, odd) = with_observer(observer.clone(), || {
            (L64X128Mix::new(2, 5, 1, 1), L64X128Mix::new(3, 5, 1, 1))
        });
        assert_eq!(even, odd);
        assert_eq!(L32X64Mix::new(0, 5, 1, 1), L32X64Mix::new(1, 5, 1, 1));
        // normalising the addend is not a seed repair
        assert!(observer.is_empty());
    }

    #[test]
    fn test_jump_advances_only_lcg() {
        let mut rng = L32X64Mix::new(1, 2, 3, 4);
        rng.jump();
        assert_eq!(rng.ls, L32X64Mix::M.wrapping_mul(2).wrapping_add(1));
        assert_eq!((rng.x0, rng.x1), (3, 4));
    }

    #[test]
    fn test_long_jump_equals_lcg_steps() {
        let mut jumped = L32X64Mix::new(7, 11, 1, 1);
        let mut stepped = jumped;
        jumped.long_jump();
        for _ in 0..(1 << 16) {
            stepped.jump();
        }
        assert_eq!(jumped, stepped);

        let mut jumped = L64X128Mix::new(7, 11, 1, 1);
        let start = jumped.ls;
        jumped.long_jump();
        let (mut mult, mut add) = (L64X128Mix::M, jumped.la);
        // square-and-multiply 2^32 single steps
        for _ in 0..32 {
            add = mult.wrapping_add(1).wrapping_mul(add);
            mult = mult.wrapping_mul(mult);
        }
        let ls = mult.wrapping_mul(start).wrapping_add(add);
        assert_eq!(jumped.ls, ls);
    }

    #[test]
    fn test_l64_reseed_not_implemented() {
        let mut rng = L64X128Mix::default();
        let mut source = ReplayEntropy::counting();
        assert_eq!(
            rng.reseed(&mut source),
            Err(RandomError::NotImplemented {
                operation: "L64X128Mix::reseed"
            })
        );

        let mut small = L32X64Mix::default();
        small.reseed(&mut source).unwrap();
        assert_ne!(small, L32X64Mix::default());
    }
}
