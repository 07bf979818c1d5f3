// This module contains jump-ahead utilities for linear engines,
// i.e. generators whose state update is a linear map over GF(2).

/// A generator state whose update is linear over GF(2).
pub trait LinearEngine: Copy + Eq {
    /// The all-zero state. It is the fixed point of the update.
    const ZERO: Self;

    /// Returns the state after one application of the update.
    fn next_state(self) -> Self;

    /// Word-wise XOR of two states.
    fn xor(self, other: Self) -> Self;
}

/// The polynomial x**(2**exponent) reduced modulo the characteristic polynomial
/// of an engine with `N` state words. Bit `i` of word `j` is the coefficient of x**(64j + i).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct JumpPolynomial<const N: usize> {
    /// Jump distance is 2**exponent steps.
    pub exponent: u32,
    /// Coefficients, least significant first.
    pub words: [u64; N],
}

// Jump polynomials from Blackman, D. and Vigna, S.,
// Scrambled Linear Pseudorandom Number Generators (2018).

/// 2**32 steps of xoroshiro128.
pub const XORO_JUMP_32: JumpPolynomial<2> = JumpPolynomial {
    exponent: 32,
    words: [0xfad843622b252c78, 0xd4e95eef9edbdbc6],
};

/// 2**64 steps of xoroshiro128.
pub const XORO_JUMP_64: JumpPolynomial<2> = JumpPolynomial {
    exponent: 64,
    words: [0xdf900294d8f554a5, 0x170865df4b3201fc],
};

/// 2**96 steps of xoroshiro128.
pub const XORO_JUMP_96: JumpPolynomial<2> = JumpPolynomial {
    exponent: 96,
    words: [0xd2a98b26625eee7b, 0xdddf9b1090aa7ac1],
};

/// 2**128 steps of xoshiro256.
pub const XOSH_JUMP_128: JumpPolynomial<4> = JumpPolynomial {
    exponent: 128,
    words: [0x180ec6d33cfd0aba, 0xd5a61266f0c9392c, 0xa9582618e03fc9aa, 0x39abdc4529b1661c],
};

/// 2**192 steps of xoshiro256.
pub const XOSH_JUMP_192: JumpPolynomial<4> = JumpPolynomial {
    exponent: 192,
    words: [0x76e15d3efefdcbbf, 0xc5004e441c522fb3, 0x77710069854ee241, 0x39109bb02acbe635],
};

/// Named jump distances of `Xoro`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum XoroJump {
    /// 2**32 steps.
    Short,
    /// 2**64 steps.
    Standard,
    /// 2**96 steps.
    Long,
}

impl XoroJump {
    pub fn polynomial(self) -> &'static JumpPolynomial<2> {
        match self {
            XoroJump::Short => &XORO_JUMP_32,
            XoroJump::Standard => &XORO_JUMP_64,
            XoroJump::Long => &XORO_JUMP_96,
        }
    }

    /// Jump distance is 2**exponent steps.
    pub fn exponent(self) -> u32 {
        self.polynomial().exponent
    }
}

/// Named jump distances of `Xosh`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum XoshJump {
    /// 2**128 steps.
    Standard,
    /// 2**192 steps.
    Long,
}

impl XoshJump {
    pub fn polynomial(self) -> &'static JumpPolynomial<4> {
        match self {
            XoshJump::Standard => &XOSH_JUMP_128,
            XoshJump::Long => &XOSH_JUMP_192,
        }
    }

    /// Jump distance is 2**exponent steps.
    pub fn exponent(self) -> u32 {
        self.polynomial().exponent
    }
}

/// Returns the state `2**polynomial.exponent` steps ahead of `state`.
///
/// Evaluates the jump polynomial at the update operator:
/// each set coefficient of x**i adds (XORs) the state i steps ahead.
/// Costs 64 * N updates regardless of the distance.
pub fn jump<E: LinearEngine, const N: usize>(state: E, polynomial: &JumpPolynomial<N>) -> E {
    jump_words(state, &polynomial.words)
}

/// Evaluates an arbitrary coefficient list, least significant first, at the update operator.
/// The result equals the sum of the states i steps ahead for each set coefficient i.
pub fn jump_words<E: LinearEngine>(state: E, words: &[u64]) -> E {
    let mut sum = E::ZERO;
    let mut shadow = state;
    for &word in words {
        let mut bits = word;
        for _ in 0 .. 64 {
            if bits & 1 != 0 {
                sum = sum.xor(shadow);
            }
            bits >>= 1;
            shadow = shadow.next_state();
        }
    }
    sum
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    // Dense GF(2) polynomials, bit i of the vector is the coefficient of x**i.

    fn degree(p: &[u64]) -> Option<usize> {
        (0 .. p.len()).rev().find(|&i| p[i] != 0).map(|i| i * 64 + 63 - p[i].leading_zeros() as usize)
    }

    fn bit(p: &[u64], i: usize) -> bool {
        p[i / 64] >> (i % 64) & 1 != 0
    }

    fn flip(p: &mut [u64], i: usize) {
        p[i / 64] ^= 1 << (i % 64);
    }

    /// Berlekamp-Massey over GF(2). Returns the characteristic polynomial
    /// of the shortest linear recurrence generating `s`.
    fn characteristic(s: &[bool]) -> Vec<u64> {
        let words = s.len() / 64 + 2;
        let mut c = vec![0u64; words];
        let mut b = vec![0u64; words];
        c[0] = 1;
        b[0] = 1;
        let mut l = 0;
        let mut m = 1;
        for n in 0 .. s.len() {
            let mut d = s[n];
            for i in 1 ..= l {
                d ^= bit(&c, i) & s[n - i];
            }
            if !d {
                m += 1;
                continue;
            }
            let t = c.clone();
            for i in 0 .. words * 64 - m {
                if bit(&b, i) { flip(&mut c, i + m); }
            }
            if 2 * l <= n {
                l = n + 1 - l;
                b = t;
                m = 1;
            } else {
                m += 1;
            }
        }
        // The connection polynomial is the reciprocal of the characteristic polynomial.
        let mut p = vec![0u64; words];
        for i in 0 ..= l {
            if bit(&c, i) { flip(&mut p, l - i); }
        }
        p
    }

    /// Returns x**(2**k) mod p.
    fn x_pow_pow2(k: u32, p: &[u64]) -> Vec<u64> {
        let deg = degree(p).unwrap();
        let reduce = |mut a: Vec<u64>| {
            while let Some(d) = degree(&a) {
                if d < deg { break; }
                for i in 0 ..= deg {
                    if bit(p, i) { flip(&mut a, d - deg + i); }
                }
            }
            a
        };
        let mut r = vec![0u64; p.len()];
        flip(&mut r, 1);
        for _ in 0 .. k {
            // Squaring over GF(2) moves the coefficient of x**i to x**(2i).
            let mut sq = vec![0u64; 2 * p.len()];
            for i in 0 .. p.len() * 64 {
                if bit(&r, i) { flip(&mut sq, 2 * i); }
            }
            r = reduce(sq);
            r.truncate(p.len());
        }
        r
    }

    fn check_polynomials<E: LinearEngine, const N: usize>(
        start: E, low_bit: impl Fn(&E) -> bool, polynomials: &[JumpPolynomial<N>]) {
        let mut s = Vec::new();
        let mut x = start;
        for _ in 0 .. 128 * N + 64 {
            s.push(low_bit(&x));
            x = x.next_state();
        }
        let p = characteristic(&s);
        assert_eq!(Some(64 * N), degree(&p));
        for polynomial in polynomials {
            let r = x_pow_pow2(polynomial.exponent, &p);
            assert_eq!(&polynomial.words[..], &r[.. N], "jump 2**{}", polynomial.exponent);
        }
    }

    #[test] pub fn polynomials_are_powers_of_x() {
        check_polynomials(Xoro::new(1), |x| x.words()[0] & 1 != 0,
            &[XORO_JUMP_32, XORO_JUMP_64, XORO_JUMP_96]);
        check_polynomials(Xosh::new(1), |x| x.words()[0] & 1 != 0,
            &[XOSH_JUMP_128, XOSH_JUMP_192]);
    }

    #[test] pub fn single_coefficient_steps() {
        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(LCG_M64).wrapping_add(0xffff); r };

        for _ in 0 .. 1 << 6 {
            let i = (rnd() >> 58) as usize + 64 * (rnd() >> 63) as usize;
            let mut words = [0u64; 2];
            words[i / 64] = 1 << (i % 64);

            let x = Xoro::new(rnd());
            let mut y = x;
            for _ in 0 .. i { y = y.next_state(); }
            assert_eq!(y, jump_words(x, &words));

            let x = Xosh::new(rnd());
            let mut y = x;
            for _ in 0 .. i { y = y.next_state(); }
            assert_eq!(y, jump_words(x, &words));
        }
    }

    #[test] pub fn jumps_are_linear_and_commute() {
        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(LCG_M64).wrapping_add(0xffff); r };

        for _ in 0 .. 1 << 8 {
            let a = Xoro::new(rnd());
            let b = Xoro::new(rnd());
            for distance in [XoroJump::Short, XoroJump::Standard, XoroJump::Long] {
                let p = distance.polynomial();
                assert_eq!(jump(a.xor(b), p), jump(a, p).xor(jump(b, p)));
            }
            assert_eq!(jump(jump(a, &XORO_JUMP_32), &XORO_JUMP_96), jump(jump(a, &XORO_JUMP_96), &XORO_JUMP_32));

            let a = Xosh::new(rnd());
            let b = Xosh::new(rnd());
            for distance in [XoshJump::Standard, XoshJump::Long] {
                let p = distance.polynomial();
                assert_eq!(jump(a.xor(b), p), jump(a, p).xor(jump(b, p)));
            }
            assert_eq!(jump(jump(a, &XOSH_JUMP_128), &XOSH_JUMP_192), jump(jump(a, &XOSH_JUMP_192), &XOSH_JUMP_128));
        }
    }

    #[test] pub fn zero_is_fixed() {
        assert_eq!(Xoro::ZERO, jump(Xoro::ZERO, &XORO_JUMP_64));
        assert_eq!(Xosh::ZERO, jump(Xosh::ZERO, &XOSH_JUMP_128));
        assert_eq!(Xoro::ZERO, jump_words(Xoro::new(3), &[0, 0]));
    }

    // The remaining tests iterate 2**32 times. The jumped ones take minutes in release mode.

    fn repeat<E: LinearEngine>(x: E, times: u64, f: impl Fn(E) -> E) -> E {
        let mut y = x;
        for _ in 0 .. times { y = f(y); }
        y
    }

    #[test] pub fn short_jump_is_2_pow_32_steps() {
        let x = Xoro::new(1);
        assert_eq!(jump(x, &XORO_JUMP_32), repeat(x, 1 << 32, |y| y.next_state()));
    }

    #[test] #[ignore] pub fn standard_jump_is_2_pow_32_short_jumps() {
        let x = Xoro::new(1);
        assert_eq!(jump(x, &XORO_JUMP_64), repeat(x, 1 << 32, |y| jump(y, &XORO_JUMP_32)));
    }

    #[test] #[ignore] pub fn long_jump_is_2_pow_32_standard_jumps() {
        let x = Xoro::new(1);
        assert_eq!(jump(x, &XORO_JUMP_96), repeat(x, 1 << 32, |y| jump(y, &XORO_JUMP_64)));
    }
}
