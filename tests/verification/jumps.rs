//! Jump-ahead verification.
//!
//! Every jump is checked against the slow path it replaces: PCG jumps against
//! single steps, LXM jumps against the LCG recurrence, and the GF(2)
//! polynomial jumps against known post-jump states.

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use fortress_random::engines::*;
use fortress_random::Engine;

use crate::common::take_u64;

macro_rules! pcg_jump_suite {
    ($($engine:ident),+ $(,)?) => {
        pastey::paste! {
            $(
                #[test]
                fn [<test_ $engine:snake _jump_matches_stepping>]() {
                    let mut jumped = $engine::seed_from_u64(0xC0FFEE);
                    let mut stepped = jumped;
                    jumped.jump(1000);
                    for _ in 0..1000 {
                        stepped.advance();
                    }
                    assert_eq!(jumped, stepped);
                    assert_eq!(take_u64(&mut jumped, 8), take_u64(&mut stepped, 8));
                }

                #[test]
                fn [<test_ $engine:snake _jump_zero_is_identity>]() {
                    let original = $engine::seed_from_u64(5);
                    let mut jumped = original;
                    jumped.jump(0);
                    assert_eq!(jumped, original);
                }
            )+
        }
    };
}

pcg_jump_suite!(
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
);

#[test]
fn test_pcg_jumps_compose() {
    let mut once = Pcg64XslRrRr::new(42, 54);
    let mut twice = once;
    once.jump(300);
    twice.jump(100);
    twice.jump(200);
    assert_eq!(once, twice);
}

#[test]
fn test_l32_jump_is_one_lcg_cycle() {
    let mut rng = L32X64Mix::new(1, 2, 3, 4);
    rng.jump();
    let ls = 0xadb4_a92d_u32.wrapping_mul(2).wrapping_add(1);
    assert_eq!(rng, L32X64Mix::new(1, ls, 3, 4));
}

#[test]
fn test_l64_jump_is_one_lcg_cycle() {
    let mut rng = L64X128Mix::new(1, 2, 3, 4);
    rng.jump();
    let ls = 0xd134_2543_de82_ef95_u64.wrapping_mul(2).wrapping_add(1);
    assert_eq!(rng, L64X128Mix::new(1, ls, 3, 4));
}

#[test]
fn test_l32_long_jump_is_2_pow_16_jumps() {
    let mut jumped = L32X64Mix::new(9, 1234, 5, 6);
    let mut stepped = jumped;
    jumped.long_jump();
    for _ in 0..(1 << 16) {
        stepped.jump();
    }
    assert_eq!(jumped, stepped);
}

#[test]
fn test_lxm_jump_commutes_with_advance() {
    let mut a = L64X128Mix::new(11, 22, 33, 44);
    let mut b = a;
    a.jump();
    a.advance();
    b.advance();
    b.jump();
    assert_eq!(a, b);

    let mut a = L32X64Mix::new(11, 22, 33, 44);
    let mut b = a;
    a.long_jump();
    a.advance();
    b.advance();
    b.long_jump();
    assert_eq!(a, b);
}

#[test]
fn test_lxm_jumped_stream_differs() {
    let mut base = L64X128Mix::new(1, 2, 3, 4);
    let mut jumped = base;
    jumped.long_jump();
    assert_ne!(take_u64(&mut base, 8), take_u64(&mut jumped, 8));
}

// Golden test: Seiran(1, 2) after 2^32 steps
#[test]
fn test_seiran_jump32_golden() {
    let mut rng = Seiran::new(1, 2);
    rng.jump32();
    assert_eq!(rng, Seiran::new(0xb3a0f6c68fee1b11, 0x917c50a0643d3870));
}

// Golden test: Shioi(1, 2) after 2^32 and 2^64 steps
#[test]
fn test_shioi_jump_golden() {
    let mut rng = Shioi::new(1, 2);
    rng.jump32();
    assert_eq!(rng, Shioi::new(0x9152e8129e39460e, 0xe2591bff032265ff));

    let mut rng = Shioi::new(1, 2);
    rng.jump64();
    assert_eq!(rng, Shioi::new(3, 4));
}

#[test]
fn test_gf2_jumps_commute_with_advance() {
    let mut a = Seiran::new(0xDEAD, 0xBEEF);
    let mut b = a;
    a.jump64();
    a.advance();
    b.advance();
    b.jump64();
    assert_eq!(a, b);

    let mut a = Shioi::new(0xDEAD, 0xBEEF);
    let mut b = a;
    a.jump96();
    a.advance();
    b.advance();
    b.jump96();
    assert_eq!(a, b);
}

#[test]
fn test_seiran_previous_rewinds() {
    let start = Seiran::seed_from_u64(77);
    let mut rng = start;
    for _ in 0..1000 {
        rng.advance();
    }
    for _ in 0..1000 {
        rng.previous();
    }
    assert_eq!(rng, start);
    let mut fresh = start;
    assert_eq!(take_u64(&mut rng, 4), take_u64(&mut fresh, 4));
}
