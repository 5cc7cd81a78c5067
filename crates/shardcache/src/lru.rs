//! LRU (Least Recently Used) store backing a single shard
//!
//! Nodes live in an arena and link to each other by slot index, so the
//! recency list needs no owning pointers. Freed slots are recycled through
//! a free list.

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

/// Node in the recency list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Bounded LRU store
///
/// `map` and the list threaded through `nodes` always hold the same set of
/// live slots, and their size never exceeds `capacity`.
pub struct LruStore<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruStore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new store holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        }
    }

    /// Look up a value and mark it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Insert or update a key-value pair, making it most recently used
    ///
    /// Returns the entry evicted to make room, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                node.value = value;
            }
            self.move_to_front(idx);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.push_front(idx);
        self.map.insert(key, idx);

        evicted
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        self.free_node(idx).map(|node| node.value)
    }

    /// Remove a key, reporting whether it was present
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Membership check; does not touch recency
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Snapshot of the stored keys
    ///
    /// Currently most- to least-recently used, but callers should treat the
    /// order as unspecified.
    pub fn keys(&self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.map.len());
        let mut cur = self.head;
        while let Some(idx) = cur {
            match &self.nodes[idx] {
                Some(node) => {
                    out.push(node.key.clone());
                    cur = node.next;
                }
                None => break,
            }
        }
        out
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = old_head;
        }

        if let Some(head_idx) = old_head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &mut self.nodes[idx] {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    // Unlink before releasing the slot so the neighbours are patched.
    fn evict(&mut self) -> Option<(K, V)> {
        let tail_idx = self.tail?;
        self.unlink(tail_idx);
        let node = self.free_node(tail_idx)?;
        self.map.remove(&node.key);
        Some((node.key, node.value))
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) -> Option<Node<K, V>> {
        let node = self.nodes[idx].take();
        if node.is_some() {
            self.free_list.push(idx);
        }
        node
    }

    /// Walk the list both ways and compare against the index.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let forward = self.keys();
        assert_eq!(forward.len(), self.map.len(), "list and index disagree");
        assert!(self.map.len() <= self.capacity, "over capacity");
        for key in &forward {
            assert!(self.map.contains_key(key), "listed key missing from index");
        }

        let mut backward = Vec::new();
        let mut cur = self.tail;
        while let Some(idx) = cur {
            let node = self.nodes[idx].as_ref().expect("tail walk hit a free slot");
            backward.push(node.key.clone());
            cur = node.prev;
        }
        backward.reverse();
        assert!(forward == backward, "prev and next links disagree");
    }
}
