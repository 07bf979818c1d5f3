use std::sync::{Mutex, MutexGuard, Once, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, trace};

use crate::xoro::Xoro;
use crate::xosh::Xosh;

// An outlet hands out generators whose streams do not overlap.
// It holds one base state per engine; each request jumps the base state
// by the standard distance under the lock and returns a copy of it.
// Issued generators share nothing with the outlet or with each other.

struct Streams {
    xoro: Xoro,
    xosh: Xosh,
}

impl Streams {
    fn new(seed: u64) -> Self {
        Streams { xoro: Xoro::new(seed), xosh: Xosh::new(seed) }
    }
}

/// Thread-safe source of generators with non-overlapping streams.
pub struct Outlet {
    streams: Mutex<Streams>,
}

impl core::fmt::Debug for Outlet {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Outlet {{}}")
    }
}

impl Outlet {

    /// Creates an outlet seeded by `seed`. Both engines are seeded with the same value.
    pub fn new(seed: u64) -> Self {
        debug!("[outlet] seeded with {:#018x}", seed);
        Outlet { streams: Mutex::new(Streams::new(seed)) }
    }

    /// Creates an outlet seeded from the system clock in nanoseconds.
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    // The streams are plain values that are never left half written,
    // so a lock poisoned by a panicking holder is still consistent.
    fn lock(&self) -> MutexGuard<'_, Streams> {
        self.streams.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the next xoroshiro128 generator. Its stream of 2**64 outputs
    /// does not overlap with any other generator issued by this outlet.
    pub fn next_xoro(&self) -> Xoro {
        let mut streams = self.lock();
        streams.xoro.jump();
        trace!("[outlet] issued xoroshiro128 stream");
        streams.xoro
    }

    /// Returns the next xoshiro256 generator with a stream of 2**128 outputs.
    pub fn next_xosh(&self) -> Xosh {
        let mut streams = self.lock();
        streams.xosh.jump();
        trace!("[outlet] issued xoshiro256 stream");
        streams.xosh
    }

    /// Returns the next generator of the default engine, xoroshiro128.
    /// Draws from the same base state as `next_xoro`.
    pub fn next(&self) -> Xoro {
        self.next_xoro()
    }

    fn reseed(&self, seed: u64) {
        *self.lock() = Streams::new(seed);
        debug!("[outlet] reseeded with {:#018x}", seed);
    }
}

fn time_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as u64,
        Err(e) => {
            // Clock set before the epoch.
            e.duration().as_nanos() as u64
        }
    }
}

static GLOBAL: OnceLock<Outlet> = OnceLock::new();
static RESET: Once = Once::new();

/// Returns the process-wide outlet. It is created on first use, seeded from the system clock.
pub fn global() -> &'static Outlet {
    GLOBAL.get_or_init(Outlet::from_time)
}

/// Reseeds the process-wide outlet. Only the first call has an effect;
/// it returns true, and later calls return false.
pub fn reset_global(seed: u64) -> bool {
    let mut reset = false;
    RESET.call_once(|| {
        global().reseed(seed);
        reset = true;
    });
    if !reset {
        debug!("[outlet] global outlet already reset, seed {:#018x} ignored", seed);
    }
    reset
}

/// Returns the next xoroshiro128 generator from the process-wide outlet.
pub fn next_xoro() -> Xoro {
    global().next_xoro()
}

/// Returns the next xoshiro256 generator from the process-wide outlet.
pub fn next_xosh() -> Xosh {
    global().next_xosh()
}

/// Bounds on the probability that any two of `n` streams of length `l`,
/// started at random points of a cycle of length `p`, overlap.
/// Returns `(lower, upper)`. From Vigna, S.,
/// On the probability of overlap of random subsequences of pseudorandom number generators (2020).
pub fn overlap_probability(n: f64, l: f64, p: f64) -> (f64, f64) {
    let upper = n * (n - 1.0) * l / p;
    let lower = n * (n - 1.0) * (l - 1.0) / p * (1.0 - n * n * l / (2.0 * p));
    (lower, upper)
}
