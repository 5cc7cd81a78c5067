use shardcache::ShardedCache;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn cache_is_send_and_sync() {
    assert_send_sync::<ShardedCache<String, Vec<u8>>>();
}

#[test]
fn capacity_holds_per_shard_under_contention() {
    let cache = Arc::new(ShardedCache::new(8, 4).unwrap());
    let threads = 8;
    let iters = 2_000;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let c = Arc::clone(&cache);
            let b = Arc::clone(&barrier);
            thread::spawn(move || {
                b.wait();
                for i in 0..iters {
                    let k = (i * 17 + t) % 256;
                    c.put(k, (t, i));
                    let _ = c.get(&k);
                    if i % 13 == 0 {
                        c.delete(&k);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    for shard in 0..cache.shard_count() {
        let len = cache.shard_len(shard).unwrap();
        assert!(len <= 4, "shard {} holds {} entries", shard, len);
    }
    assert!(cache.len() <= cache.capacity());
}

#[test]
fn values_read_back_match_last_write_per_thread() {
    // Each thread owns a disjoint key range, so its own reads are exact.
    let cache = Arc::new(ShardedCache::new(4, 1_024).unwrap());
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let c = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..500u64 {
                    let key = t * 1_000 + i;
                    c.put(key, key + 1);
                    c.put(key, key + 2);
                    assert_eq!(c.get(&key), Some(key + 2));
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(cache.len(), 2_000);
}

#[test]
fn keys_scan_races_with_inserts_without_corruption() {
    let cache = Arc::new(ShardedCache::new(8, 10_000).unwrap());
    for key in 0..1_000u64 {
        cache.put(key, key);
    }

    let done = Arc::new(AtomicBool::new(false));
    let writer = {
        let c = Arc::clone(&cache);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for key in 1_000..20_000u64 {
                c.put(key, key);
            }
            done.store(true, Ordering::Release);
        })
    };

    let mut scans = 0;
    while !done.load(Ordering::Acquire) || scans == 0 {
        let keys = cache.keys();
        let unique: HashSet<_> = keys.iter().copied().collect();

        // No duplicates and nothing that was never inserted
        assert_eq!(unique.len(), keys.len());
        assert!(keys.iter().all(|&k| k < 20_000));

        // Pre-populated keys are never evicted at this capacity
        for key in 0..1_000u64 {
            assert!(unique.contains(&key));
        }

        // Values for returned keys are never stale or foreign
        for &key in keys.iter().take(64) {
            if let Some(value) = cache.get(&key) {
                assert_eq!(value, key);
            }
        }
        scans += 1;
    }

    writer.join().unwrap();
    assert_eq!(cache.keys().len(), 20_000);
}

#[test]
fn concurrent_clear_leaves_cache_usable() {
    let cache = Arc::new(ShardedCache::new(4, 32).unwrap());
    let barrier = Arc::new(Barrier::new(3));

    let writers: Vec<_> = (0..2u32)
        .map(|t| {
            let c = Arc::clone(&cache);
            let b = Arc::clone(&barrier);
            thread::spawn(move || {
                b.wait();
                for i in 0..5_000u32 {
                    c.put(i % 200, t);
                }
            })
        })
        .collect();

    barrier.wait();
    for _ in 0..50 {
        cache.clear();
    }
    for w in writers {
        w.join().unwrap();
    }

    cache.clear();
    assert!(cache.is_empty());
    cache.put(1, 9);
    assert_eq!(cache.get(&1), Some(9));
}
