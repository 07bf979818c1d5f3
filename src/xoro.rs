use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use super::{STARSTAR_M1, STARSTAR_M2, STARSTAR_ROTATE};
use crate::jump::{LinearEngine, XoroJump};
use crate::state::{StateError, XORO_STATE_SIZE};

// Xoroshiro128 features
// -linear engine by David Blackman and Sebastiano Vigna (2018)
// -64-bit output, 128-bit state, period 2**128 - 1
// -the ** scrambler gives the 64-bit output, the + scrambler the 53-bit floats;
//  scramblers do not feed back, so both read the same state trajectory
// -jumps of 2**32, 2**64 and 2**96 steps split the period into non-overlapping streams
// -generation takes about 1 ns

/// Xoroshiro128 non-cryptographic RNG. 64-bit output, 128-bit state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Xoro {
    s0: u64,
    s1: u64,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for Xoro {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Xoro {{}}")
    }
}

impl Xoro {

    /// Creates a new Xoroshiro128 RNG by expanding the seed with SplitMix64.
    /// All seeds work equally well.
    pub fn new(seed: u64) -> Self {
        // SplitMix64 outputs could both be zero only with probability 2**-128;
        // the all-zero state is left unguarded.
        let mut s = seed;
        let s0 = crate::splitmix::splitmix(&mut s);
        let s1 = crate::splitmix::splitmix(&mut s);
        Xoro { s0, s1 }
    }

    /// Reseeds in place. Equivalent to `*self = Xoro::new(seed)`.
    pub fn seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Creates an RNG from raw state words. The all-zero state never leaves zero.
    pub fn from_words(words: [u64; 2]) -> Self {
        Xoro { s0: words[0], s1: words[1] }
    }

    /// Returns the raw state words.
    #[inline]
    pub fn words(&self) -> [u64; 2] {
        [self.s0, self.s1]
    }

    /// Returns the next state of the linear engine.
    #[inline]
    pub fn next_state(self) -> Self {
        let t = self.s0 ^ self.s1;
        Xoro {
            s0: self.s0.rotate_left(24) ^ t ^ (t << 16),
            s1: t.rotate_left(37),
        }
    }

    /// Advances to the next state.
    #[inline]
    pub fn step(&mut self) {
        *self = self.next_state();
    }

    /// Returns the xoroshiro128** output of the current state.
    #[wrappit] #[inline]
    pub fn starstar(&self) -> u64 {
        (self.s0 * STARSTAR_M1).rotate_left(STARSTAR_ROTATE) * STARSTAR_M2
    }

    /// Returns the xoroshiro128+ output of the current state.
    /// Its lowest bits are weak; use it for the high bits only.
    #[wrappit] #[inline]
    pub fn plus(&self) -> u64 {
        self.s0 + self.s1
    }

    /// Generates the next 64-bit random number (xoroshiro128**).
    #[inline]
    pub fn next(&mut self) -> u64 {
        let x = self.starstar();
        self.step();
        x
    }

    /// Generates the next xoroshiro128+ number.
    #[inline]
    pub fn next_plus(&mut self) -> u64 {
        let x = self.plus();
        self.step();
        x
    }

    /// Jumps forward by the given distance.
    pub fn jump_by(&mut self, distance: XoroJump) {
        *self = crate::jump::jump(*self, distance.polynomial());
    }

    /// Jumps forward by 2**32 steps.
    pub fn jump_short(&mut self) {
        self.jump_by(XoroJump::Short);
    }

    /// Jumps forward by 2**64 steps, or 2**32 short jumps.
    pub fn jump(&mut self) {
        self.jump_by(XoroJump::Standard);
    }

    /// Jumps forward by 2**96 steps, or 2**32 standard jumps.
    pub fn jump_long(&mut self) {
        self.jump_by(XoroJump::Long);
    }

    /// Returns a float in [0, 1) with 2**53 evenly spaced values, from the + scrambler.
    #[inline]
    pub fn float64(&mut self) -> f64 {
        crate::float::float64_53(self.next_plus())
    }

    /// Returns a float in [0, 1) including all floats in [2**-12, 1).
    #[inline]
    pub fn float64_64(&mut self) -> f64 {
        crate::float::float64_64(self.next())
    }

    /// Returns a float in [0, 1] including all floats in [2**-11, 1], rounded.
    #[inline]
    pub fn float64_64_rounded(&mut self) -> f64 {
        crate::float::float64_64_rounded(self.next())
    }

    /// Returns a float in [0, 1) including all floats in [2**-65, 1).
    pub fn float64_117(&mut self) -> f64 {
        crate::float::float64_117(self)
    }

    /// Returns a float in [0, 1] including all floats in [2**-64, 1], rounded.
    pub fn float64_117_rounded(&mut self) -> f64 {
        crate::float::float64_117_rounded(self)
    }

    /// Returns a float in [0, 1) including all floats in [0, 1).
    pub fn float64_full(&mut self) -> f64 {
        crate::float::float64_full(self)
    }

    /// Returns a float in [0, 1] including all floats in [0, 1], rounded.
    pub fn float64_full_rounded(&mut self) -> f64 {
        crate::float::float64_full_rounded(self)
    }

    /// Returns a float in [0, 1] by Vigna's random_real.
    pub fn random_real(&mut self) -> f64 {
        crate::float::random_real(self)
    }

    /// Returns a float by bisection. Slow; for validation only.
    pub fn float64_bisect(&mut self, round: bool) -> f64 {
        crate::bisect::float64_bisect(self, round)
    }

    /// Returns the serialized state: the words in order, each big-endian.
    pub fn state_bytes(&self) -> [u8; XORO_STATE_SIZE] {
        let mut b = [0u8; XORO_STATE_SIZE];
        crate::state::put_words(&self.words(), &mut b);
        b
    }

    /// Creates an RNG from a serialized state.
    pub fn from_state_bytes(b: [u8; XORO_STATE_SIZE]) -> Self {
        Self::from_words(crate::state::get_words(&b))
    }

    /// Writes the serialized state to the front of `dest`.
    pub fn write_state(&self, dest: &mut [u8]) -> Result<(), StateError> {
        crate::state::write_words(&self.words(), dest)
    }

    /// Reads the state from the front of `src`. `self` is unchanged on error.
    pub fn read_state(&mut self, src: &[u8]) -> Result<(), StateError> {
        *self = Self::from_words(crate::state::read_words(src)?);
        Ok(())
    }

    /// Returns `n` RNGs with non-overlapping streams of length 2**64.
    /// The first is seeded by `seed` and each next one is a jump ahead of the previous.
    #[cfg(feature = "std")]
    pub fn slice(n: usize, seed: u64) -> Vec<Xoro> {
        let mut x = Self::new(seed);
        (0 .. n).map(|_| {
            let y = x;
            x.jump();
            y
        }).collect()
    }
}

impl LinearEngine for Xoro {
    const ZERO: Self = Xoro { s0: 0, s1: 0 };

    #[inline]
    fn next_state(self) -> Self {
        Xoro::next_state(self)
    }

    #[inline]
    fn xor(self, other: Self) -> Self {
        Xoro { s0: self.s0 ^ other.s0, s1: self.s1 ^ other.s1 }
    }
}

use super::{RngCore, Error, SeedableRng};

impl RngCore for Xoro {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        crate::state::fill_bytes_le(dest, || self.next());
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoro {
    type Seed = [u8; XORO_STATE_SIZE];

    /// Creates a new Xoroshiro128 RNG from a serialized state.
    /// The all-zero seed, which would never leave zero, is replaced by `Xoro::new(0)`.
    fn from_seed(seed: Self::Seed) -> Self {
        if seed == [0; XORO_STATE_SIZE] {
            return Xoro::new(0);
        }
        Xoro::from_state_bytes(seed)
    }

    fn seed_from_u64(state: u64) -> Self {
        Xoro::new(state)
    }
}
