#![cfg_attr(not(feature = "std"), no_std)]

pub mod bisect;
pub mod float;
pub mod jump;
pub mod replay;
pub mod splitmix;
pub mod state;
pub mod xoro;
pub mod xosh;

#[cfg(feature = "std")]
pub mod outlet;

pub use bisect::*;
pub use float::*;
pub use jump::*;
pub use replay::*;
pub use splitmix::*;
pub use state::*;
pub use xoro::*;
pub use xosh::*;

#[cfg(feature = "std")]
pub use outlet::{overlap_probability, Outlet};

pub use rand_core::*;

// SplitMix64 constants from Steele, G., Lea, D. and Flood, C. H.,
// Fast Splittable Pseudorandom Number Generators (2014),
// as published by Vigna at http://prng.di.unimi.it/splitmix64.c.

// Weyl sequence increment (golden ratio).
pub const SPLITMIX_GAMMA: u64 = 0x9e3779b97f4a7c15;

// Finalizer multipliers.
pub const SPLITMIX_M1: u64 = 0xbf58476d1ce4e5b9;
pub const SPLITMIX_M2: u64 = 0x94d049bb133111eb;

// Scrambler constants from Blackman, D. and Vigna, S.,
// Scrambled Linear Pseudorandom Number Generators (2018).
pub const STARSTAR_M1: u64 = 5;
pub const STARSTAR_M2: u64 = 9;
pub const STARSTAR_ROTATE: u32 = 7;

// 64-bit LCG multiplier from Steele, G. and Vigna, S.,
// Computationally Easy, Spectrally Good Multipliers for
// Congruential Pseudorandom Number Generators (2020).
// Drives test inputs.
#[cfg(test)]
pub(crate) const LCG_M64: u64 = 0xd1342543de82ef95;
