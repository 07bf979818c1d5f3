use super::RngCore;

// Conversions of uniform 64-bit words into uniform f64 in [0, 1) or [0, 1].
//
// A uniform real in [0, 1) is a binary fraction 0.b1 b2 b3 ... of random bits.
// The number of leading zeros z fixes the binade [2**-(z+1), 2**-z),
// and the 52 bits after the leading one are the significand. So except for the
// 53-bit variant, the IEEE-754 bit pattern is composed directly with integer
// operations: biased exponent 1022 - z and the significand bits, with no rounding.
// Truncating gives every float in range with probability equal to its measure;
// the rounded variants read one more bit and round half up, which lands on [0, 1].
//
// Each variant agrees bit for bit with `float64_bisect` on its dense range.

const EXPONENT_BIAS: u64 = 1023;

/// Leading zero bits past which the truncated full precision result is 0.
pub const SUBNORMAL_FLOOR: u64 = 1074;

/// Largest number of leading zero words a full precision conversion reads.
pub const MAX_ZERO_WORDS: u64 = (SUBNORMAL_FLOOR + 1 + 63) / 64;

const TWO_POW_MINUS_53: f64 = 1.0 / 9007199254740992.0;

/// Returns 2**-n for n in 0 ..= 1022.
#[inline]
fn pow2_minus(n: u64) -> f64 {
    f64::from_bits((EXPONENT_BIAS - n) << 52)
}

/// Shifts `hi` left by `z` bits, filling from the top of `lo`. `z` is in 0 ..= 64.
#[inline]
fn normalize(hi: u64, lo: u64, z: u32) -> u64 {
    match z {
        0 => hi,
        64 => lo,
        _ => (hi << z) | (lo >> (64 - z)),
    }
}

/// Returns a float in [0, 1) from the top 53 bits of `u`.
/// The distribution is 2**53 evenly spaced floats with spacing 2**-53.
#[inline]
pub fn float64_53(u: u64) -> f64 {
    (u >> 11) as f64 * TWO_POW_MINUS_53
}

/// Returns a float in [0, 1) from all 64 bits of `u`.
/// The distribution includes all floats in [2**-12, 1) and 2**52 evenly spaced
/// floats in [0, 2**-12) with spacing 2**-64.
#[inline]
pub fn float64_64(u: u64) -> f64 {
    if u == 0 {
        return 0.0;
    }
    // Count the leading one along with the zeros; it is implicit in the format.
    let z = u.leading_zeros() + 1;
    let significand = ((u << (z - 1)) << 1) >> 12;
    f64::from_bits((EXPONENT_BIAS - z as u64) << 52 | significand)
}

/// Returns a float in [0, 1] from all 64 bits of `u`, rounding half up.
/// The distribution matches `float64_64` rounded, which is exact in [2**-11, 1].
#[inline]
pub fn float64_64_rounded(u: u64) -> f64 {
    if u == 0 {
        return 0.0;
    }
    let z = u.leading_zeros() + 1;
    // 53 bits: the significand and the rounding bit. A carry propagates into the exponent.
    let bits = (EXPONENT_BIAS - z as u64) << 53 | ((u << (z - 1)) << 1) >> 11;
    f64::from_bits((bits + 1) >> 1)
}

/// Returns a float in [0, 1) from one or two words.
/// The distribution includes all floats in [2**-65, 1) and 2**52 evenly spaced
/// floats in [0, 2**-65) with spacing 2**-117.
pub fn float64_117<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let u = rng.next_u64();
    let z = u.leading_zeros();
    if z < 12 {
        return float64_64(u);
    }
    let u = normalize(u, rng.next_u64(), z);
    (u >> 11) as f64 * pow2_minus(53 + z as u64)
}

/// Returns a float in [0, 1] from one or two words, rounding half up.
/// Exact in [2**-64, 1].
pub fn float64_117_rounded<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let u = rng.next_u64();
    let z = u.leading_zeros();
    if z < 11 {
        return float64_64_rounded(u);
    }
    let u = normalize(u, rng.next_u64(), z);
    (((u >> 10) + 1) >> 1) as f64 * pow2_minus(53 + z as u64)
}

/// Skips the leading zero words of a draw, then returns the significand word
/// normalized to a leading one, together with the count of zeros before that one.
/// Returns `None` once `floor` leading zeros are reached.
/// Reads at most `MAX_ZERO_WORDS + 1` words after `u`.
fn leading_zeros_tail<R: RngCore + ?Sized>(rng: &mut R, u: u64, floor: u64) -> Option<(u64, u64)> {
    let mut u = u;
    let mut zeros = 0;
    while u == 0 {
        zeros += 64;
        u = rng.next_u64();
        if zeros + u.leading_zeros() as u64 >= floor {
            return None;
        }
    }
    let z = u.leading_zeros();
    Some((normalize(u, rng.next_u64(), z), zeros + z as u64))
}

/// Returns a float in [0, 1) with every representable value, subnormals included.
/// Equivalent to `float64_bisect(rng, false)`. Reads 2 words in 99.98% of cases
/// and returns exactly 0 after 1074 leading zero bits.
pub fn float64_full<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let u = rng.next_u64();
    if u.leading_zeros() < 12 {
        return float64_64(u);
    }
    match leading_zeros_tail(rng, u, SUBNORMAL_FLOOR) {
        Some((u, zeros)) if zeros < 1022 => f64::from_bits((1022 - zeros) << 52 | (u << 1) >> 12),
        // The exponent field bottoms out: shift the significand into the subnormal range.
        Some((u, zeros)) => f64::from_bits((u >> (zeros - 1022)) >> 12),
        None => 0.0,
    }
}

/// Returns a float in [0, 1] with every representable value, subnormals included,
/// rounding half up. Equivalent to `float64_bisect(rng, true)`.
pub fn float64_full_rounded<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let u = rng.next_u64();
    if u.leading_zeros() < 11 {
        return float64_64_rounded(u);
    }
    // The rounding bit can lift a value just under 2**-1074 to 2**-1074.
    let bits = match leading_zeros_tail(rng, u, SUBNORMAL_FLOOR + 1) {
        Some((u, zeros)) if zeros < 1022 => (1022 - zeros) << 53 | (u << 1) >> 11,
        Some((u, zeros)) => (u >> (zeros - 1022)) >> 11,
        None => return 0.0,
    };
    f64::from_bits((bits + 1) >> 1)
}

/// Returns a float in [0, 1] after Vigna's random_real (http://prng.di.unimi.it/random_real.c).
/// The low bit of the 64-bit significand is forced to 1 so the conversion to f64
/// never sees a tie. Identical to `float64_full_rounded` for normal results;
/// subnormal results are rounded a second time by the final scaling.
pub fn random_real<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let mut u = rng.next_u64();
    let mut zero_words = 0;
    while u == 0 {
        zero_words += 1;
        if zero_words == MAX_ZERO_WORDS {
            return 0.0;
        }
        u = rng.next_u64();
    }
    let z = u.leading_zeros();
    let u = normalize(u, rng.next_u64(), z);
    let mut x = (u | 1) as f64 * pow2_minus(64) * pow2_minus(z as u64);
    for _ in 0 .. zero_words {
        x *= pow2_minus(64);
    }
    x
}
