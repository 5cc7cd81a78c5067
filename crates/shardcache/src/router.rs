//! Key to shard routing
//!
//! Keys are hashed with 64-bit FNV-1a and reduced modulo the shard count.
//! FNV-1a is unseeded, so a key lands on the same shard in every process
//! for a given shard count and key type.

use std::hash::{Hash, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over the bytes a key's `Hash` impl writes
#[derive(Debug, Clone, Copy)]
pub struct FnvHasher(u64);

impl Default for FnvHasher {
    fn default() -> Self {
        FnvHasher(FNV_OFFSET_BASIS)
    }
}

impl Hasher for FnvHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u64::from(byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Maps keys onto `[0, shard_count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardRouter {
    shard_count: usize,
}

impl ShardRouter {
    /// Create a router for `shard_count` shards
    ///
    /// # Panics
    /// Panics if `shard_count` is 0. [`ShardedCache`](crate::ShardedCache)
    /// validates the count before building its router.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "Shard count must be greater than 0");
        Self { shard_count }
    }

    /// Number of shards keys are spread over
    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    /// Shard index for `key`
    pub fn route<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = FnvHasher::default();
        key.hash(&mut hasher);
        (hasher.finish() % self.shard_count as u64) as usize
    }
}
