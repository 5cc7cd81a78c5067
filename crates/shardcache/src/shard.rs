//! One lock-guarded partition of the cache
//!
//! Every operation, `get` included, takes the shard's exclusive lock. A read
//! lock is not an option: `get` relinks the accessed node at the head of the
//! recency list, so it writes shared state.

use std::hash::Hash;
use parking_lot::Mutex;
use tracing::trace;

use crate::lru::LruStore;

/// LRU store behind a mutex
pub struct Shard<K, V> {
    store: Mutex<LruStore<K, V>>,
}

impl<K, V> Shard<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a shard holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            store: Mutex::new(LruStore::new(capacity)),
        }
    }

    /// Clone out a value and mark it most recently used
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.store.lock().get(key).cloned()
    }

    /// Insert or update, evicting this shard's LRU entry when full
    pub fn put(&self, key: K, value: V) {
        let evicted = self.store.lock().put(key, value);
        // Evicted pair is dropped here, outside the lock.
        if evicted.is_some() {
            trace!("evicted least recently used entry");
        }
    }

    /// Remove a key, returning its value
    pub fn remove(&self, key: &K) -> Option<V> {
        self.store.lock().remove(key)
    }

    /// Remove a key, reporting whether it was present
    pub fn delete(&self, key: &K) -> bool {
        self.store.lock().delete(key)
    }

    /// Membership check; does not touch recency
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.lock().contains_key(key)
    }

    /// Snapshot of this shard's keys
    pub fn keys(&self) -> Vec<K> {
        self.store.lock().keys()
    }

    /// Number of entries in this shard
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Check if this shard is empty
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Maximum number of entries in this shard
    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    /// Drop every entry in this shard
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    /// Hold the shard lock; used by tests to pin a shard while probing others
    #[cfg(test)]
    pub(crate) fn lock(&self) -> parking_lot::MutexGuard<'_, LruStore<K, V>> {
        self.store.lock()
    }

    #[cfg(test)]
    pub(crate) fn try_lock(&self) -> Option<parking_lot::MutexGuard<'_, LruStore<K, V>>> {
        self.store.try_lock()
    }
}
