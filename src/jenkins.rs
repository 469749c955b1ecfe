//! Jenkins one-at-a-time hash, the default slot hasher of `Hashtable`.
//!
//! Deterministic for the life of the process and well distributed over
//! short ASCII keys. This is NOT a cryptographic algorithm.

use core::hash::{BuildHasher, Hasher};

/// A `BuildHasher` producing fresh `JenkinsHasher`s.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildJenkins;

impl BuildHasher for BuildJenkins {
    type Hasher = JenkinsHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        JenkinsHasher::default()
    }
}

/// One-at-a-time hasher: every byte is mixed in as it is written, the
/// final avalanche is applied in `finish`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JenkinsHasher {
    hash: u64,
}

impl Hasher for JenkinsHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let mut h = self.hash;
        for &b in bytes {
            h = h.wrapping_add(u64::from(b));
            h = h.wrapping_add(h << 10);
            h ^= h >> 6;
        }
        self.hash = h;
    }

    #[inline]
    fn finish(&self) -> u64 {
        let mut h = self.hash;
        h = h.wrapping_add(h << 3);
        h ^= h >> 11;
        h.wrapping_add(h << 15)
    }
}

/// Map `key` onto `[0, nslots)`.
///
/// Only the raw key bytes are fed to the hasher; `str`'s `Hash` impl would
/// append a terminator byte and drift from the reference values.
#[inline]
pub fn slot_of<S: BuildHasher>(hasher: &S, key: &str, nslots: usize) -> usize {
    debug_assert!(nslots > 0);
    let mut h = hasher.build_hasher();
    h.write(key.as_bytes());
    (h.finish() % nslots as u64) as usize
}
