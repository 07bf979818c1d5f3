use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use super::{STARSTAR_M1, STARSTAR_M2, STARSTAR_ROTATE};
use crate::jump::{LinearEngine, XoshJump};
use crate::state::{StateError, XOSH_STATE_SIZE};

// Xoshiro256 features
// -linear engine by David Blackman and Sebastiano Vigna (2018)
// -64-bit output, 256-bit state, period 2**256 - 1
// -three scramblers: ** and ++ for all-purpose output, + for floats
// -jumps of 2**128 and 2**192 steps split the period into non-overlapping streams
// -generation takes about 1.2 ns

/// Xoshiro256 non-cryptographic RNG. 64-bit output, 256-bit state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Xosh {
    s0: u64,
    s1: u64,
    s2: u64,
    s3: u64,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for Xosh {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Xosh {{}}")
    }
}

impl Xosh {

    /// Creates a new Xoshiro256 RNG by expanding the seed with SplitMix64.
    /// All seeds work equally well.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let s0 = crate::splitmix::splitmix(&mut s);
        let s1 = crate::splitmix::splitmix(&mut s);
        let s2 = crate::splitmix::splitmix(&mut s);
        let s3 = crate::splitmix::splitmix(&mut s);
        Xosh { s0, s1, s2, s3 }
    }

    /// Reseeds in place. Equivalent to `*self = Xosh::new(seed)`.
    pub fn seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Creates an RNG from raw state words. The all-zero state never leaves zero.
    pub fn from_words(words: [u64; 4]) -> Self {
        Xosh { s0: words[0], s1: words[1], s2: words[2], s3: words[3] }
    }

    #[inline]
    pub fn words(&self) -> [u64; 4] {
        [self.s0, self.s1, self.s2, self.s3]
    }

    /// Returns the next state of the linear engine.
    #[inline]
    pub fn next_state(self) -> Self {
        let t = self.s1 << 17;
        let s2 = self.s2 ^ self.s0;
        let s3 = self.s3 ^ self.s1;
        let s1 = self.s1 ^ s2;
        let s0 = self.s0 ^ s3;
        Xosh { s0, s1, s2: s2 ^ t, s3: s3.rotate_left(45) }
    }

    #[inline]
    pub fn step(&mut self) {
        *self = self.next_state();
    }

    /// Returns the xoshiro256** output of the current state.
    #[wrappit] #[inline]
    pub fn starstar(&self) -> u64 {
        (self.s1 * STARSTAR_M1).rotate_left(STARSTAR_ROTATE) * STARSTAR_M2
    }

    /// Returns the xoshiro256+ output of the current state.
    /// Its lowest bits are weak; use it for the high bits only.
    #[wrappit] #[inline]
    pub fn plus(&self) -> u64 {
        self.s0 + self.s3
    }

    /// Returns the xoshiro256++ output of the current state.
    #[wrappit] #[inline]
    pub fn plusplus(&self) -> u64 {
        (self.s0 + self.s3).rotate_left(23) + self.s0
    }

    /// Generates the next 64-bit random number (xoshiro256**).
    #[inline]
    pub fn next(&mut self) -> u64 {
        let x = self.starstar();
        self.step();
        x
    }

    #[inline]
    pub fn next_plus(&mut self) -> u64 {
        let x = self.plus();
        self.step();
        x
    }

    #[inline]
    pub fn next_plusplus(&mut self) -> u64 {
        let x = self.plusplus();
        self.step();
        x
    }

    pub fn jump_by(&mut self, distance: XoshJump) {
        *self = crate::jump::jump(*self, distance.polynomial());
    }

    /// Jumps forward by 2**128 steps.
    pub fn jump(&mut self) {
        self.jump_by(XoshJump::Standard);
    }

    /// Jumps forward by 2**192 steps.
    pub fn jump_long(&mut self) {
        self.jump_by(XoshJump::Long);
    }

    /// Returns a float in [0, 1) with 2**53 evenly spaced values, from the + scrambler.
    #[inline]
    pub fn float64(&mut self) -> f64 {
        crate::float::float64_53(self.next_plus())
    }

    #[inline]
    pub fn float64_64(&mut self) -> f64 {
        crate::float::float64_64(self.next())
    }

    #[inline]
    pub fn float64_64_rounded(&mut self) -> f64 {
        crate::float::float64_64_rounded(self.next())
    }

    pub fn float64_117(&mut self) -> f64 {
        crate::float::float64_117(self)
    }

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

    pub fn random_real(&mut self) -> f64 {
        crate::float::random_real(self)
    }

    /// Returns a float by bisection. Slow; for validation only.
    pub fn float64_bisect(&mut self, round: bool) -> f64 {
        crate::bisect::float64_bisect(self, round)
    }

    /// Returns the serialized state: the words in order, each big-endian.
    pub fn state_bytes(&self) -> [u8; XOSH_STATE_SIZE] {
        let mut b = [0u8; XOSH_STATE_SIZE];
        crate::state::put_words(&self.words(), &mut b);
        b
    }

    pub fn from_state_bytes(b: [u8; XOSH_STATE_SIZE]) -> Self {
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

    /// Returns `n` RNGs with non-overlapping streams of length 2**128.
    /// The first is seeded by `seed` and each next one is a jump ahead of the previous.
    #[cfg(feature = "std")]
    pub fn slice(n: usize, seed: u64) -> Vec<Xosh> {
        let mut x = Self::new(seed);
        (0 .. n).map(|_| {
            let y = x;
            x.jump();
            y
        }).collect()
    }
}

impl LinearEngine for Xosh {
    const ZERO: Self = Xosh { s0: 0, s1: 0, s2: 0, s3: 0 };

    #[inline]
    fn next_state(self) -> Self {
        Xosh::next_state(self)
    }

    #[inline]
    fn xor(self, other: Self) -> Self {
        Xosh {
            s0: self.s0 ^ other.s0,
            s1: self.s1 ^ other.s1,
            s2: self.s2 ^ other.s2,
            s3: self.s3 ^ other.s3,
        }
    }
}

use super::{RngCore, Error, SeedableRng};

impl RngCore for Xosh {
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

impl SeedableRng for Xosh {
    type Seed = [u8; XOSH_STATE_SIZE];

    /// Creates a new Xoshiro256 RNG from a serialized state.
    /// The all-zero seed is replaced by `Xosh::new(0)`.
    fn from_seed(seed: Self::Seed) -> Self {
        if seed == [0; XOSH_STATE_SIZE] {
            return Xosh::new(0);
        }
        Xosh::from_state_bytes(seed)
    }

    fn seed_from_u64(state: u64) -> Self {
        Xosh::new(state)
    }
}
