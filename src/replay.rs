use super::{RngCore, Error};

/// Word source that replays a fixed key of 64-bit words and then zeros.
/// Feeds exact bit patterns to the float converters and the bisection oracle.
#[derive(Clone, Debug)]
pub struct Replay<'a> {
    key: &'a [u64],
    position: usize,
}

impl<'a> Replay<'a> {

    pub fn new(key: &'a [u64]) -> Self {
        Replay { key, position: 0 }
    }

    /// Number of words read so far, including zeros read past the end of the key.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rewinds to the start of the key.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    #[inline]
    pub fn next(&mut self) -> u64 {
        let x = self.key.get(self.position).copied().unwrap_or(0);
        self.position += 1;
        x
    }
}

impl RngCore for Replay<'_> {
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
