//! ShardedCache: the public cache facade
//!
//! Owns a fixed array of shards and routes each keyed operation to exactly
//! one of them. Whole-cache operations visit the shards in index order and
//! hold at most one shard lock at any moment, so there is no lock ordering
//! between shards to get wrong.

use std::hash::Hash;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::router::ShardRouter;
use crate::shard::Shard;

/// Concurrent LRU cache partitioned into independently locked shards
///
/// Eviction is local to each shard: a shard that is full evicts its own
/// least recently used entry even when other shards have room. The total
/// capacity is `shard_count * per_shard_capacity`.
///
/// Share it between threads with `Arc<ShardedCache<K, V>>`.
pub struct ShardedCache<K, V> {
    /// Shard array; never resized after construction
    shards: Box<[Shard<K, V>]>,

    /// Key to shard index mapping
    router: ShardRouter,

    /// Capacity of every shard
    per_shard_capacity: usize,
}

impl<K, V> ShardedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a cache with `shard_count` shards of `per_shard_capacity` entries each
    ///
    /// # Errors
    /// * `Error::InvalidShardCount` - `shard_count` is 0
    /// * `Error::InvalidCapacity` - `per_shard_capacity` is 0
    pub fn new(shard_count: usize, per_shard_capacity: usize) -> Result<Self> {
        Self::with_config(&CacheConfig::new(shard_count, per_shard_capacity))
    }

    /// Create a cache from a [`CacheConfig`]
    ///
    /// The config is validated before any shard is allocated.
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;

        let shards = (0..config.shard_count)
            .map(|_| Shard::new(config.per_shard_capacity))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(
            shard_count = config.shard_count,
            per_shard_capacity = config.per_shard_capacity,
            "created sharded cache"
        );

        Ok(Self {
            shards,
            router: ShardRouter::new(config.shard_count),
            per_shard_capacity: config.per_shard_capacity,
        })
    }

    /// Shard index that owns `key`
    pub fn route_key(&self, key: &K) -> usize {
        self.router.route(key)
    }

    fn shard_for(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.route_key(key)]
    }

    /// Get a value and mark it most recently used within its shard
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard_for(key).get(key)
    }

    /// Insert or update a value
    ///
    /// When the owning shard is full its least recently used entry is
    /// evicted silently.
    pub fn put(&self, key: K, value: V) {
        self.shard_for(&key).put(key, value);
    }

    /// Remove a key, returning its value
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shard_for(key).remove(key)
    }

    /// Remove a key, reporting whether it was present
    ///
    /// Deleting an absent key is a no-op that returns `false`.
    pub fn delete(&self, key: &K) -> bool {
        self.shard_for(key).delete(key)
    }

    /// Check whether a key is cached without refreshing its recency
    pub fn contains_key(&self, key: &K) -> bool {
        self.shard_for(key).contains_key(key)
    }

    /// Collect the keys of every shard
    ///
    /// Shards are visited one after another, each locked only while its own
    /// keys are copied out. The result is therefore not an atomic snapshot:
    /// writes that race with the scan may or may not be reflected, but every
    /// returned key was present in its shard when that shard was visited.
    pub fn keys(&self) -> Vec<K> {
        let mut out = Vec::new();
        for shard in self.shards.iter() {
            out.extend(shard.keys());
        }
        out
    }

    /// Total number of entries
    ///
    /// Summed shard by shard, with the same non-atomic caveat as [`keys`](Self::keys).
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.len()).sum()
    }

    /// Check if every shard is empty
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.is_empty())
    }

    /// Drop every entry, one shard at a time
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.clear();
        }
        debug!(shard_count = self.shards.len(), "cleared sharded cache");
    }

    /// Number of shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Capacity of each shard
    pub fn per_shard_capacity(&self) -> usize {
        self.per_shard_capacity
    }

    /// Sum of all shard capacities
    pub fn capacity(&self) -> usize {
        self.shards.iter().map(|s| s.capacity()).sum()
    }

    /// Number of entries in shard `index`, or `None` if out of range
    pub fn shard_len(&self, index: usize) -> Option<usize> {
        self.shards.get(index).map(|s| s.len())
    }
}
