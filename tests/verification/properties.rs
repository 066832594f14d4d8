//! Property-based checks across every algorithm.
//!
//! Each property draws the algorithm itself from [`Algorithm::ALL`], so one
//! proptest run covers all families through [`AnyEngine`].

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use fortress_random::engines::{Pcg32XslRr, Pcg64XshRr, PcgMcgXslRs32};
use fortress_random::{Algorithm, AnyEngine, Engine, GeneratorBuilder, RandomError, Rng};
use proptest::prelude::*;

fn any_algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: bounded integers stay inside `[min, max)`.
    #[test]
    fn prop_next_uint_in_bounds(
        algorithm in any_algorithm(),
        seed in any::<u64>(),
        min in any::<u32>(),
        width in 1u32..=u32::MAX,
    ) {
        let max = min.saturating_add(width);
        prop_assume!(min < max);
        let mut rng = AnyEngine::seed_from_u64(algorithm, seed);
        for _ in 0..32 {
            let value = rng.next_uint(min, max).unwrap();
            prop_assert!(value >= min && value < max);
        }
    }

    /// Property: 64-bit bounded draws stay inside `[min, max)`.
    #[test]
    fn prop_next_ulong_in_bounds(
        algorithm in any_algorithm(),
        seed in any::<u64>(),
        a in any::<u64>(),
        b in any::<u64>(),
    ) {
        prop_assume!(a != b);
        let (min, max) = if a < b { (a, b) } else { (b, a) };
        let mut rng = AnyEngine::seed_from_u64(algorithm, seed);
        let value = rng.next_ulong(min, max).unwrap();
        prop_assert!(value >= min && value < max);
        let swapped = matches!(
            rng.next_ulong(max, min),
            Err(RandomError::BoundsSwapped { .. })
        );
        prop_assert!(swapped);
    }

    /// Property: floating-point draws stay inside `[min, max)`.
    #[test]
    fn prop_next_double_in_bounds(
        algorithm in any_algorithm(),
        seed in any::<u64>(),
        min in -1.0e6f64..1.0e6,
        width in 1.0e-3f64..1.0e6,
    ) {
        let max = min + width;
        let mut rng = AnyEngine::seed_from_u64(algorithm, seed);
        for _ in 0..16 {
            let unit = rng.next_double();
            prop_assert!((0.0..1.0).contains(&unit));
            let value = rng.next_double_in(min, max).unwrap();
            prop_assert!(value >= min && value < max);
        }
    }

    /// Property: the same seed fills the same bytes, and a shorter fill is a
    /// prefix of a longer one.
    #[test]
    fn prop_fill_deterministic_and_prefix_stable(
        algorithm in any_algorithm(),
        seed in any::<u64>(),
        len in 1usize..64,
    ) {
        let mut short = vec![0u8; len];
        let mut long = vec![0u8; 64];
        AnyEngine::seed_from_u64(algorithm, seed).fill(&mut short).unwrap();
        AnyEngine::seed_from_u64(algorithm, seed).fill(&mut long).unwrap();
        prop_assert_eq!(&short[..], &long[..len]);
    }

    /// Property: shuffling returns a permutation of its input.
    #[test]
    fn prop_shuffle_is_permutation(
        algorithm in any_algorithm(),
        seed in any::<u64>(),
        items in prop::collection::vec(any::<u16>(), 0..200),
    ) {
        let mut rng = GeneratorBuilder::new(algorithm).with_seed(seed).build().unwrap();
        let mut shuffled = rng.shuffle(&items);
        let mut sorted = items.clone();
        shuffled.sort_unstable();
        sorted.sort_unstable();
        prop_assert_eq!(shuffled, sorted);
    }

    /// Property: a sample is a sub-multiset of the input, and asking for at
    /// least everything returns the input unchanged.
    #[test]
    fn prop_sample_draws_from_items(
        algorithm in any_algorithm(),
        seed in any::<u64>(),
        items in prop::collection::vec(0u32..1000, 1..100),
        select in 1usize..150,
    ) {
        let mut rng = AnyEngine::seed_from_u64(algorithm, seed);
        let picked = rng.sample(&items, select).unwrap();
        if select >= items.len() {
            prop_assert_eq!(&picked, &items);
        } else {
            prop_assert_eq!(picked.len(), select);
            let mut pool = items.clone();
            for value in &picked {
                let position = pool.iter().position(|item| item == value);
                prop_assert!(position.is_some());
                pool.swap_remove(position.unwrap());
            }
        }
    }

    /// Property: every choice comes from the input.
    #[test]
    fn prop_choice_multiple_draws_from_items(
        algorithm in any_algorithm(),
        seed in any::<u64>(),
        items in prop::collection::vec(any::<i8>(), 1..50),
        fraction in 0.0f64..=1.0,
    ) {
        let select = (items.len() as f64 * fraction) as usize;
        let mut rng = AnyEngine::seed_from_u64(algorithm, seed);
        let chosen = rng.choice_multiple(&items, select).unwrap();
        prop_assert_eq!(chosen.len(), select);
        prop_assert!(chosen.iter().all(|c| items.contains(c)));
    }

    /// Property: the builder and the enum constructor agree for fixed seeds.
    #[test]
    fn prop_builder_matches_any_engine(algorithm in any_algorithm(), seed in any::<u64>()) {
        let mut built = GeneratorBuilder::new(algorithm).with_seed(seed).build().unwrap();
        let mut direct = AnyEngine::seed_from_u64(algorithm, seed);
        prop_assert_eq!(built.rng().algorithm(), algorithm);
        for _ in 0..8 {
            prop_assert_eq!(built.next_u64(), direct.next_u64());
        }
    }

    /// Property: PCG jumps by any small delta equal that many single steps.
    #[test]
    fn prop_pcg_jump_matches_stepping(seed in any::<u64>(), delta in 0u64..512) {
        let mut jumped = Pcg32XslRr::seed_from_u64(seed);
        let mut stepped = jumped;
        jumped.jump(delta);
        for _ in 0..delta {
            stepped.advance();
        }
        prop_assert_eq!(jumped, stepped);

        let mut jumped = PcgMcgXslRs32::seed_from_u64(seed);
        let mut stepped = jumped;
        jumped.jump(delta);
        for _ in 0..delta {
            stepped.advance();
        }
        prop_assert_eq!(jumped, stepped);

        let mut jumped = Pcg64XshRr::seed_from_u64(seed);
        let mut stepped = jumped;
        jumped.jump(u128::from(delta));
        for _ in 0..delta {
            stepped.advance();
        }
        prop_assert_eq!(jumped, stepped);
    }

    /// Property: names parse back to the same algorithm.
    #[test]
    fn prop_algorithm_names_parse(algorithm in any_algorithm()) {
        prop_assert_eq!(algorithm.ident().parse::<Algorithm>().unwrap(), algorithm);
        prop_assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        prop_assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
    }
}
