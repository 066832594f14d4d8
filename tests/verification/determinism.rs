//! Determinism tests for every generator family.
//!
//! Each family gets the same battery, generated with `pastey`:
//! 1. **Seed reproducibility**: the same `u64` seed yields the same stream
//! 2. **Reseeding**: `set_seed` with the same words restarts the stream
//! 3. **Seed sensitivity**: neighbouring seeds yield different streams
//! 4. **Run-time selection**: `GeneratorBuilder` matches the typed engine
//!
//! Golden vectors through the public `Rng` surface follow.

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use fortress_random::__internal::expand_seed;
use fortress_random::engines::*;
use fortress_random::{Algorithm, Engine, Generator, GeneratorBuilder, Rng};

use crate::common::{init_tracing, take_u64};

macro_rules! determinism_suite {
    ($($engine:ident),+ $(,)?) => {
        pastey::paste! {
            $(
                #[test]
                fn [<test_ $engine:snake _seed_from_u64_reproducible>]() {
                    init_tracing();
                    let mut a = $engine::seed_from_u64(0x5EED);
                    let mut b = $engine::seed_from_u64(0x5EED);
                    assert_eq!(take_u64(&mut a, 256), take_u64(&mut b, 256));
                    assert_eq!(a, b);
                }

                #[test]
                fn [<test_ $engine:snake _set_seed_restarts_stream>]() {
                    let seed = expand_seed::<<$engine as Engine>::Word>(
                        99,
                        <$engine as Engine>::SEED_WORDS,
                    );
                    let mut rng = $engine::default();
                    rng.set_seed(&seed).unwrap();
                    let first = take_u64(&mut rng, 64);
                    rng.set_seed(&seed).unwrap();
                    assert_eq!(take_u64(&mut rng, 64), first);

                    let mut fresh = $engine::from_seed_words(&seed).unwrap();
                    assert_eq!(take_u64(&mut fresh, 64), first);
                }

                #[test]
                fn [<test_ $engine:snake _distinct_seeds_diverge>]() {
                    let a = take_u64(&mut $engine::seed_from_u64(1), 8);
                    let b = take_u64(&mut $engine::seed_from_u64(2), 8);
                    assert_ne!(a, b);
                }

                #[test]
                fn [<test_ $engine:snake _matches_runtime_selection>]() {
                    let algorithm: Algorithm = stringify!($engine).parse().unwrap();
                    let mut built = GeneratorBuilder::new(algorithm).with_seed(77).build().unwrap();
                    let mut typed = $engine::seed_from_u64(77);
                    assert_eq!(take_u64(&mut built, 32), take_u64(&mut typed, 32));
                    assert_eq!(built.algorithm_name(), typed.algorithm_name());
                }
            )+
        }
    };
}

determinism_suite!(
    SplitMix64,
    Xoroshiro1024Star,
    Xoroshiro1024StarStar,
    Xoroshiro1024PlusPlus,
    Pcg32XshRr,
    Pcg32XshRs,
    Pcg32XslRr,
    Pcg32RxsMXs,
    Pcg64RxsMXs,
    Pcg64XslRrRr,
    Pcg64XshRr,
    PcgMcgXshRr32,
    PcgMcgXslRr32,
    PcgMcgXslRs32,
    RomuDuo,
    RomuDuoJr,
    RomuTrio,
    RomuQuad,
    RomuTrio32,
    Sfc32,
    Sfc64,
    Jsf32,
    Jsf64,
    L32X64Mix,
    L64X128Mix,
    MiddleSquareWeyl64,
    Seiran,
    Shioi,
    Tyche,
    TycheI,
    Gjrand64,
);

#[test]
fn test_every_algorithm_is_covered() {
    assert_eq!(Algorithm::ALL.len(), 31);
}

// Golden test: SplitMix64 seed 0
#[test]
fn test_splitmix64_seed_zero_golden() {
    let mut rng = SplitMix64::new(0);
    assert_eq!(
        take_u64(&mut rng, 5),
        vec![
            0xe220a8397b1dcdaf,
            0x6e789e6aa1b965f4,
            0x06c45d188009454f,
            0xf88bb8a8724c81ec,
            0x1b39896a51a8749b
        ]
    );
}

// Golden test: two 32-bit words join high-first
#[test]
fn test_32_bit_engine_next_u64_golden() {
    let mut rng = Pcg32XshRr::new(42, 54);
    assert_eq!(rng.next_u64(), 0xa15c02b77b47f409);
    assert_eq!(rng.next_u64(), 0xba1d333083d2f293);
}

#[test]
fn test_fill_golden_both_widths() {
    let mut narrow = Pcg32XshRr::new(42, 54);
    let mut buf = [0u8; 13];
    narrow.fill(&mut buf).unwrap();
    assert_eq!(
        buf,
        [0xb7, 0x02, 0x5c, 0xa1, 0x09, 0xf4, 0x47, 0x7b, 0x30, 0x33, 0x1d, 0xba, 0x93]
    );

    let mut wide = SplitMix64::new(0);
    let mut buf = [0u8; 10];
    wide.fill(&mut buf).unwrap();
    assert_eq!(buf, [0xaf, 0xcd, 0x1d, 0x7b, 0x39, 0xa8, 0x20, 0xe2, 0xf4, 0x65]);
}

#[test]
fn test_family_goldens_through_rng() {
    assert_eq!(Tyche::new(42, 0).next_u32(), 0x6af2893c);
    assert_eq!(TycheI::new(42, 0).next_u32(), 0xee88ac30);
    assert_eq!(Gjrand64::default().next_u64(), 0xc065975e01c9350c);
    assert_eq!(Jsf64::new(42).next_u64(), 0xa5719fd503fff432);
    assert_eq!(MiddleSquareWeyl64::new(0, 1).next_u64(), 0x31b4b0a3fd90b8e4);
    assert_eq!(Shioi::new(1, 2).next_u64(), 0xf639cdd27a56e882);

    let mut quad = RomuQuad::new(1, 2, 3, 4);
    assert_eq!(take_u64(&mut quad, 2), vec![0x0000000000000002, 0x0010000000000004]);

    // 64-bit engines serve next_u32 from the high half
    assert_eq!(Sfc64::new(1, 2, 3, 1).next_u32(), 0x8db86d5a);
}

#[test]
fn test_generator_wrapping_preserves_stream() {
    let mut plain = L64X128Mix::new(1, 2, 3, 4);
    let mut wrapped = Generator::new(L64X128Mix::new(1, 2, 3, 4));
    assert_eq!(wrapped.next_u64(), 0x3594601cea320f0e);
    assert_eq!(plain.next_u64(), 0x3594601cea320f0e);
    assert_eq!(take_u64(&mut wrapped, 16), take_u64(&mut plain, 16));
}

#[test]
fn test_sequence_operations_reproducible() {
    let items: Vec<u32> = (0..200).collect();
    let run = || {
        let mut rng = Generator::<RomuTrio>::seed_from_u64(2024);
        let shuffled = rng.shuffle(&items);
        let sampled = rng.sample(&items, 10).unwrap();
        let chosen = rng.choice_multiple(&items, 10).unwrap();
        let gaussian = rng.next_gaussian().to_bits();
        (shuffled, sampled, chosen, gaussian)
    };
    assert_eq!(run(), run());
}
