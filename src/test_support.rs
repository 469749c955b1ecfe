#![cfg(test)]

// Helpers shared by the crate's unit and property tests.

use core::hash::{BuildHasher, Hasher};

/// Hashes every key to 0, piling all entries into slot 0.
#[derive(Clone, Copy, Default)]
pub(crate) struct ConstBuildHasher;

pub(crate) struct ConstHasher;

impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}

impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}
