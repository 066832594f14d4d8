//! Bit-mixing primitives shared by the generator families.
//!
//! Every function here is a pure, total `const fn` built on wrapping
//! arithmetic, so results are identical on every platform.

/// Multiplies two 64-bit words into a 128-bit product, returned as `(high, low)`.
#[inline]
#[must_use]
pub const fn mul_128(a: u64, b: u64) -> (u64, u64) {
    let product = (a as u128) * (b as u128);
    ((product >> 64) as u64, product as u64)
}

/// Returns the high 64 bits of the 128-bit product of `a` and `b`.
#[inline]
#[must_use]
pub const fn mul_hi64(a: u64, b: u64) -> u64 {
    mul_128(a, b).0
}

/// Number of set bits.
#[inline]
#[must_use]
pub const fn pop_count(x: u64) -> u32 {
    x.count_ones()
}

/// Smallest `k` such that `2^k >= x`. Both 0 and 1 map to 0.
#[inline]
#[must_use]
pub const fn log2_ceil(x: u64) -> u32 {
    if x <= 1 {
        0
    } else {
        64 - (x - 1).leading_zeros()
    }
}

/// Doug Lea's 32-bit avalanche mix.
#[inline]
#[must_use]
pub const fn lea32(mut x: u32) -> u32 {
    x = (x ^ (x >> 16)).wrapping_mul(0xd36d_884b);
    x = (x ^ (x >> 16)).wrapping_mul(0xd36d_884b);
    x ^ (x >> 16)
}

/// Doug Lea's 64-bit avalanche mix.
#[inline]
#[must_use]
pub const fn lea64(mut x: u64) -> u64 {
    x = (x ^ (x >> 32)).wrapping_mul(0xdaba_0b6e_b093_22e3);
    x = (x ^ (x >> 32)).wrapping_mul(0xdaba_0b6e_b093_22e3);
    x ^ (x >> 32)
}

/// Joins two 32-bit halves into one 64-bit word, `high` first.
#[inline]
#[must_use]
pub const fn join_u32(high: u32, low: u32) -> u64 {
    ((high as u64) << 32) | low as u64
}

/// Splits a 64-bit word into `(high, low)` halves.
#[inline]
#[must_use]
pub const fn split_u64(x: u64) -> (u32, u32) {
    ((x >> 32) as u32, x as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_128_matches_u128() {
        let (hi, lo) = mul_128(u64::MAX, u64::MAX);
        assert_eq!(hi, u64::MAX - 1);
        assert_eq!(lo, 1);
        assert_eq!(mul_hi64(1 << 63, 4), 2);
        assert_eq!(mul_128(3, 5), (0, 15));
    }

    #[test]
    fn test_log2_ceil() {
        assert_eq!(log2_ceil(0), 0);
        assert_eq!(log2_ceil(1), 0);
        assert_eq!(log2_ceil(2), 1);
        assert_eq!(log2_ceil(3), 2);
        assert_eq!(log2_ceil(4), 2);
        assert_eq!(log2_ceil(5), 3);
        assert_eq!(log2_ceil(1 << 40), 40);
        assert_eq!(log2_ceil((1 << 40) + 1), 41);
        assert_eq!(log2_ceil(u64::MAX), 64);
    }

    #[test]
    fn test_pop_count() {
        assert_eq!(pop_count(0), 0);
        assert_eq!(pop_count(0b1011), 3);
        assert_eq!(pop_count(u64::MAX), 64);
    }

    #[test]
    fn test_lea_mixers_fix_zero_and_scatter_one() {
        assert_eq!(lea32(0), 0);
        assert_eq!(lea64(0), 0);
        assert_ne!(lea32(1), 1);
        assert_ne!(lea64(1), 1);
        // adjacent inputs should differ in many bits
        assert!((lea64(1) ^ lea64(2)).count_ones() > 16);
    }

    #[test]
    fn test_join_and_split() {
        assert_eq!(join_u32(0xdead_beef, 0x0123_4567), 0xdead_beef_0123_4567);
        assert_eq!(split_u64(0xdead_beef_0123_4567), (0xdead_beef, 0x0123_4567));
    }
}
