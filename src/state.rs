// Generator states serialize as their 64-bit words in declaration order,
// each word big-endian. The layout does not depend on the host byte order.

/// Serialized size of a `Xoro` state in bytes.
pub const XORO_STATE_SIZE: usize = 16;

/// Serialized size of a `Xosh` state in bytes.
pub const XOSH_STATE_SIZE: usize = 32;

/// Failure to read or write a serialized generator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The byte buffer is shorter than the serialized state.
    TooShort { needed: usize, got: usize },
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StateError::TooShort { needed, got } => {
                write!(f, "state buffer too short: need {} bytes, got {}", needed, got)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StateError {}

/// Writes `words` big-endian into the front of `dest`.
pub fn write_words(words: &[u64], dest: &mut [u8]) -> Result<(), StateError> {
    let needed = words.len() * 8;
    if dest.len() < needed {
        return Err(StateError::TooShort { needed, got: dest.len() });
    }
    put_words(words, dest);
    Ok(())
}

/// Reads `N` big-endian words from the front of `src`. Trailing bytes are ignored.
pub fn read_words<const N: usize>(src: &[u8]) -> Result<[u64; N], StateError> {
    let needed = N * 8;
    if src.len() < needed {
        return Err(StateError::TooShort { needed, got: src.len() });
    }
    Ok(get_words(src))
}

/// Writes as many whole `words` as fit into `dest`.
pub(crate) fn put_words(words: &[u64], dest: &mut [u8]) {
    for (chunk, word) in dest.chunks_exact_mut(8).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
}

/// Reads `N` words from `src`; words past the end of `src` are zero.
pub(crate) fn get_words<const N: usize>(src: &[u8]) -> [u64; N] {
    let mut words = [0u64; N];
    for (word, chunk) in words.iter_mut().zip(src.chunks_exact(8)) {
        let mut w = [0u8; 8];
        w.copy_from_slice(chunk);
        *word = u64::from_be_bytes(w);
    }
    words
}

/// Fills `dest` from a 64-bit word source, little-endian,
/// discarding the unused tail of the last word.
pub(crate) fn fill_bytes_le<F: FnMut() -> u64>(dest: &mut [u8], mut next: F) {
    let bytes = dest.len();
    let mut i = 0;
    while i < bytes {
        let x = next();
        let j = bytes.min(i + 8);
        // Always use Little-Endian.
        dest[i .. j].copy_from_slice(&x.to_le_bytes()[0 .. (j - i)]);
        i = j;
    }
}
