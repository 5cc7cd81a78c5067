//! # shardcache
//!
//! Concurrent, bounded LRU cache partitioned into independently locked shards.
//!
//! ## Architecture
//! - **Router**: FNV-1a hash of the key, modulo the shard count
//! - **LRU store**: AHash index + arena-backed doubly-linked recency list (O(1))
//! - **Shard**: one store behind one `parking_lot::Mutex`
//! - **ShardedCache**: fixed shard array, one shard per keyed operation
//!
//! `get` reorders the recency list, so shards use exclusive locks only.
//!
//! ```
//! use shardcache::ShardedCache;
//!
//! let cache = ShardedCache::new(8, 2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//!
//! assert_eq!(cache.get(&"a"), Some(1));
//! assert!(cache.delete(&"b"));
//! assert!(!cache.delete(&"b"));
//! assert_eq!(cache.len(), 1);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod lru;
mod router;
mod shard;

pub use cache::ShardedCache;
pub use config::{CacheConfig, DEFAULT_PER_SHARD_CAPACITY, DEFAULT_SHARD_COUNT};
pub use error::{Error, Result};
pub use lru::LruStore;
pub use router::{FnvHasher, ShardRouter};
