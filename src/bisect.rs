use super::RngCore;

// Reference conversion of a bit stream into a float by interval bisection.
// Each bit halves [left, right] until no float lies strictly between the bounds.
// Every float in [0, 1) is then reached with probability equal to the width
// of the interval it stands for, subnormals included. It consumes up to 1075 bits
// one at a time and is only meant for validating the converters in `float`.

const TOP: u64 = 1 << 63;

/// Returns a float in [0, 1) by bisection, reading bits most significant first.
/// A 1 bit takes the upper half and a 0 bit the lower half.
/// If `round` is true, one more bit picks the lower or upper bound and the range is [0, 1].
pub fn float64_bisect<R: RngCore + ?Sized>(rng: &mut R, round: bool) -> f64 {
    let mut left = 0.0f64;
    let mut right = 1.0f64;
    let mut mean = 0.5f64;
    loop {
        let mut u = rng.next_u64();
        for b in 0 .. 64 {
            if u & TOP != 0 {
                left = mean;
            } else {
                right = mean;
            }
            u <<= 1;
            mean = (left + right) / 2.0;
            // The bounds are adjacent floats.
            if mean == left || mean == right {
                if !round {
                    return left;
                }
                if b == 63 {
                    u = rng.next_u64();
                }
                return if u & TOP != 0 { right } else { left };
            }
        }
    }
}

/// Returns the distance between x and y in units in the last place,
/// i.e. the difference of their ordinals in the sorted sequence of all floats.
/// Infinities and NaNs are at distance `u64::MAX` from everything.
pub fn ulps_between(x: f64, y: f64) -> u64 {
    const SIGN: u64 = 1 << 63;
    const INFINITY: u64 = 0x7ff0000000000000;
    let (k, n) = (x.to_bits(), y.to_bits());
    let opposite = (k ^ n) & SIGN != 0;
    let (k, n) = (k & !SIGN, n & !SIGN);
    if k >= INFINITY || n >= INFINITY {
        u64::MAX
    } else if opposite {
        n + k
    } else {
        n.max(k) - n.min(k)
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    #[test] pub fn known_keys() {
        assert_eq!(0.5, float64_bisect(&mut Replay::new(&[1 << 63]), false));
        assert_eq!(1.0 - 2.0f64.powi(-53), float64_bisect(&mut Replay::new(&[u64::MAX]), false));
        assert_eq!(1.0, float64_bisect(&mut Replay::new(&[u64::MAX]), true));
        assert_eq!(0.75, float64_bisect(&mut Replay::new(&[3 << 62]), true));
        assert_eq!(0.0, float64_bisect(&mut Replay::new(&[]), false));
        assert_eq!(0.0, float64_bisect(&mut Replay::new(&[]), true));
    }

    #[test] pub fn round_reads_one_more_bit() {
        // 0.5 takes 53 bits, so the rounding bit is bit 54 of the first word.
        let mut replay = Replay::new(&[(1 << 63) | (1 << 10), 0]);
        assert_eq!(0.5 + 2.0f64.powi(-53), float64_bisect(&mut replay, true));
        assert_eq!(1, replay.position());
        // The smallest subnormal needs bit 1074, in the 17th word; the rounding bit follows it.
        let mut key = [0u64; 17];
        key[16] = 1 << 13;
        let mut replay = Replay::new(&key);
        assert_eq!(f64::from_bits(1), float64_bisect(&mut replay, true));
        assert_eq!(17, replay.position());
    }

    #[test] pub fn output_is_sorted_by_key() {
        // Bisection is monotone in the bit string.
        let mut s: u64 = 7;
        let mut rnd = || splitmix(&mut s);
        for _ in 0 .. 1 << 12 {
            let a = rnd() >> (rnd() % 64);
            let b = a.saturating_add(rnd() >> (rnd() % 64));
            let key_a = [a, rnd()];
            let key_b = [b, key_a[1]];
            assert!(float64_bisect(&mut Replay::new(&key_a), false) <= float64_bisect(&mut Replay::new(&key_b), false));
        }
    }

    #[test] pub fn ulp_distance() {
        assert_eq!(0, ulps_between(0.0, -0.0));
        assert_eq!(1, ulps_between(0.0, f64::from_bits(1)));
        assert_eq!(2, ulps_between(-f64::from_bits(1), f64::from_bits(1)));
        assert_eq!(1, ulps_between(1.0, 1.0 - 2.0f64.powi(-53)));
        assert_eq!(1 << 52, ulps_between(1.0, 2.0));
        assert_eq!(u64::MAX, ulps_between(f64::INFINITY, 1.0));
        assert_eq!(u64::MAX, ulps_between(0.0, f64::NAN));
    }
}
