use wrapping_arithmetic::wrappit;
use super::{SPLITMIX_GAMMA, SPLITMIX_M1, SPLITMIX_M2};

// SplitMix64 is a Weyl sequence passed through a bijective 64-bit hash.
// Here it expands 64-bit seeds into the larger linear engine states:
// consecutive outputs are decorrelated even for consecutive seeds.

/// Advances the SplitMix64 counter in `state` and returns the next output.
/// Any state is valid.
#[wrappit] #[inline]
pub fn splitmix(state: &mut u64) -> u64 {
    let z = *state;
    let z = z + SPLITMIX_GAMMA;
    *state = z;
    let z = (z ^ (z >> 30)) * SPLITMIX_M1;
    let z = (z ^ (z >> 27)) * SPLITMIX_M2;
    z ^ (z >> 31)
}

/// Sets `state` to where `steps` calls of `splitmix` would leave it.
/// Negative steps move backward.
#[wrappit]
pub fn splitmix_jump(state: &mut u64, steps: i64) {
    // The counter is additive, so any jump is a single multiply-add mod 2**64.
    let s = *state;
    *state = s + (steps as u64) * SPLITMIX_GAMMA;
}

/// SplitMix64 generator. 64-bit output, 64-bit state, period 2**64.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct SplitMix64 {
    state: u64,
}

impl core::fmt::Debug for SplitMix64 {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "SplitMix64 {{}}")
    }
}

impl SplitMix64 {

    /// Creates a new SplitMix64 RNG. All seeds work equally well.
    pub fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    /// Generates the next 64-bit random number.
    #[inline]
    pub fn next(&mut self) -> u64 {
        splitmix(&mut self.state)
    }

    /// Jumps forward (if steps > 0) or backward (if steps < 0) or does nothing (if steps = 0).
    pub fn jump(&mut self, steps: i64) {
        splitmix_jump(&mut self.state, steps);
    }
}

use super::{RngCore, Error, SeedableRng};

impl RngCore for SplitMix64 {
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

impl SeedableRng for SplitMix64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        SplitMix64::new(u64::from_be_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        SplitMix64::new(state)
    }
}
