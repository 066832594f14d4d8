//! Romu: nonlinear multiply-rotate generators by Mark Overton.
//!
//! Each step updates every word from the *previous* words only, so the
//! multiply and the rotates issue in parallel. The returned word is one of
//! the pre-update values. Romu's period depends on the seed; there are no
//! jump functions.
//!
//! An all-zero state never leaves zero; seeding with it substitutes the
//! SplitMix64(0) expansion and reports a degenerate seed.

use crate::engine::{expand_seed, repair_zero_state, Engine};

const ROMU_MULTIPLIER_64: u64 = 15241094284759029579;
const ROMU_MULTIPLIER_32: u32 = 3323815723;

macro_rules! romu_variant {
    (@count) => { 0 };
    (@count $head:ident $($tail:ident)*) => { 1 + romu_variant!(@count $($tail)*) };
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal, $word:ty, [$($field:ident),+], |$this:ident| $step:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            $($field: $word,)+
        }

        impl $name {
            /// Creates a generator from its state words.
            ///
            /// An all-zero state is replaced by the SplitMix64(0) expansion.
            #[must_use]
            pub fn new($($field: $word),+) -> Self {
                let mut words = [$($field),+];
                repair_zero_state(Self::NAME, &mut words);
                Self::from_words(words)
            }

            fn from_words(words: [$word; romu_variant!(@count $($field)+)]) -> Self {
                let [$($field),+] = words;
                Self { $($field),+ }
            }
        }

        /// Seeded with the SplitMix64(0) expansion.
        impl Default for $name {
            fn default() -> Self {
                let mut words = [0; romu_variant!(@count $($field)+)];
                for (slot, word) in words
                    .iter_mut()
                    .zip(expand_seed::<$word>(0, romu_variant!(@count $($field)+)))
                {
                    *slot = word;
                }
                Self::from_words(words)
            }
        }

        impl Engine for $name {
            type Word = $word;
            const SEED_WORDS: usize = romu_variant!(@count $($field)+);
            const NAME: &'static str = $label;

            #[inline]
            fn advance(&mut self) -> $word {
                let $this = self;
                $step
            }

            fn load_seed(&mut self, seed: &[$word]) {
                let mut words = [0; romu_variant!(@count $($field)+)];
                for (slot, &word) in words.iter_mut().zip(seed) {
                    *slot = word;
                }
                repair_zero_state(Self::NAME, &mut words);
                *self = Self::from_words(words);
            }
        }
    };
}

romu_variant!(
    /// RomuDuo: two 64-bit words, excellent quality for its size.
    RomuDuo,
    "Romu Duo 64-bit",
    u64,
    [x, y],
    |rng| {
        let xp = rng.x;
        rng.x = ROMU_MULTIPLIER_64.wrapping_mul(rng.y);
        rng.y = rng.y
            .rotate_left(36)
            .wrapping_add(rng.y.rotate_left(15))
            .wrapping_sub(xp);
        xp
    }
);

romu_variant!(
    /// RomuDuoJr: the fastest Romu, two 64-bit words with a single rotate.
    RomuDuoJr,
    "Romu Duo Jr 64-bit",
    u64,
    [x, y],
    |rng| {
        let xp = rng.x;
        rng.x = ROMU_MULTIPLIER_64.wrapping_mul(rng.y);
        rng.y = rng.y.wrapping_sub(xp).rotate_left(27);
        xp
    }
);

romu_variant!(
    /// RomuTrio: three 64-bit words, the recommended general-purpose Romu.
    RomuTrio,
    "Romu Trio 64-bit",
    u64,
    [x, y, z],
    |rng| {
        let (xp, yp, zp) = (rng.x, rng.y, rng.z);
        rng.x = ROMU_MULTIPLIER_64.wrapping_mul(zp);
        rng.y = yp.wrapping_sub(xp).rotate_left(12);
        rng.z = zp.wrapping_sub(yp).rotate_left(44);
        xp
    }
);

romu_variant!(
    /// RomuQuad: four 64-bit words, the largest capacity of the family.
    RomuQuad,
    "Romu Quad 64-bit",
    u64,
    [w, x, y, z],
    |rng| {
        let (wp, xp, yp, zp) = (rng.w, rng.x, rng.y, rng.z);
        rng.w = ROMU_MULTIPLIER_64.wrapping_mul(zp);
        rng.x = zp.wrapping_add(wp.rotate_left(52));
        rng.y = yp.wrapping_sub(xp);
        rng.z = yp.wrapping_add(wp).rotate_left(19);
        xp
    }
);

romu_variant!(
    /// RomuTrio32: three 32-bit words for 32-bit arithmetic.
    RomuTrio32,
    "Romu Trio 32-bit",
    u32,
    [x, y, z],
    |rng| {
        let (xp, yp, zp) = (rng.x, rng.y, rng.z);
        rng.x = ROMU_MULTIPLIER_32.wrapping_mul(zp);
        rng.y = yp.wrapping_sub(xp).rotate_left(6);
        rng.z = zp.wrapping_sub(yp).rotate_left(22);
        xp
    }
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

    fn take<E: Engine>(mut rng: E) -> Vec<E::Word> {
        (0..5).map(|_| rng.advance()).collect()
    }

    #[test]
    fn test_duo_golden() {
        assert_eq!(
            take(RomuDuo::new(1, 2)),
            vec![
                0x1,
                0xa7067d009e98ae96,
                0x5487fa2c07fea8b5,
                0xd399e8a57470f60e,
                0x37bc07e7d910c767
            ]
        );
    }

    #[test]
    fn test_duo_jr_golden() {
        assert_eq!(
            take(RomuDuoJr::new(1, 2)),
            vec![
                0x1,
                0xa7067d009e98ae96,
                0x027a62ba58000000,
                0xbbf058bed6b89bbd,
                0x7ffdbd09495c0baa
            ]
        );
        assert_eq!(
            take(RomuDuoJr::default()),
            vec![
                0xe220a8397b1dcdaf,
                0x55fcf1b3f366ca7c,
                0xb53a06f1179f4fdb,
                0x7f84f708e631f6c8,
                0xd11049a7010d66b7
            ]
        );
    }

    #[test]
    fn test_trio_golden() {
        assert_eq!(
            take(RomuTrio::new(1, 2, 3)),
            vec![
                0x1,
                0x7a89bb80ede505e1,
                0xc574b00000000000,
                0x61cc0dd6fbb3a8b5,
                0x995c06dc2702cb77
            ]
        );
    }

    #[test]
    fn test_quad_golden() {
        assert_eq!(
            take(RomuQuad::new(1, 2, 3, 4)),
            vec![
                0x2,
                0x0010000000000004,
                0xd2c4e0cfa033d315,
                0xd016ea2982190667,
                0x3f2df60eacd9df2d
            ]
        );
    }

    #[test]
    fn test_trio32_golden() {
        assert_eq!(
            take(RomuTrio32::new(1, 2, 3)),
            vec![0x00000001, 0x52583581, 0xcac00000, 0x605548d5, 0x497177c8]
        );
        assert_eq!(
            take(RomuTrio32::default()),
            vec![0xe220a839, 0x40284b08, 0xa5965725, 0x00b91a8b, 0x97cf0e6c]
        );
    }

    #[test]
    fn test_zero_seed_reports_degenerate_state() {
        let observer = Arc::new(CollectingObserver::new());
        let rng = with_observer(observer.clone(), || RomuTrio::new(0, 0, 0));
        assert_eq!(rng, RomuTrio::default());
        assert_eq!(observer.violations_of_kind(ViolationKind::DegenerateSeed).len(), 1);

        let mut quad = RomuQuad::default();
        with_observer(observer.clone(), || quad.set_seed(&[0, 0, 0, 0]).unwrap());
        assert_eq!(quad, RomuQuad::default());
        assert_eq!(observer.len(), 2);
    }

    #[test]
    fn test_partial_zero_state_is_kept() {
        let observer = Arc::new(CollectingObserver::new());
        let rng = with_observer(observer.clone(), || RomuDuo::new(0, 5));
        assert_eq!(rng.x, 0);
        assert!(observer.is_empty());
    }
}
