//! Cache construction parameters

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of shards
pub const DEFAULT_SHARD_COUNT: usize = 16;

/// Default capacity of each shard
pub const DEFAULT_PER_SHARD_CAPACITY: usize = 1024;

/// Shape of a [`ShardedCache`](crate::ShardedCache)
///
/// Both values are fixed for the lifetime of the cache built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Number of independently locked shards
    pub shard_count: usize,

    /// Maximum number of entries held by each shard
    pub per_shard_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            per_shard_capacity: DEFAULT_PER_SHARD_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a config with the given shard count and per-shard capacity
    pub fn new(shard_count: usize, per_shard_capacity: usize) -> Self {
        Self {
            shard_count,
            per_shard_capacity,
        }
    }

    /// Set the shard count
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Set the per-shard capacity
    pub fn with_per_shard_capacity(mut self, per_shard_capacity: usize) -> Self {
        self.per_shard_capacity = per_shard_capacity;
        self
    }

    /// Parse a config from a JSON document
    ///
    /// Missing fields fall back to their defaults. The result is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CacheConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both dimensions are non-zero
    pub fn validate(&self) -> Result<()> {
        if self.shard_count == 0 {
            return Err(Error::InvalidShardCount(self.shard_count));
        }
        if self.per_shard_capacity == 0 {
            return Err(Error::InvalidCapacity(self.per_shard_capacity));
        }
        Ok(())
    }

    /// Upper bound on entries across all shards
    pub fn total_capacity(&self) -> usize {
        self.shard_count.saturating_mul(self.per_shard_capacity)
    }
}
