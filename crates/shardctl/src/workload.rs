//! Concurrent workload against a ShardedCache

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use shardcache::ShardedCache;
use tracing::debug;

/// Every Nth operation of a worker is a delete
const DELETE_EVERY: u64 = 64;

/// Shape of one run
#[derive(Debug, Clone)]
pub struct WorkloadSpec {
    pub threads: usize,
    pub ops_per_thread: u64,
    pub key_space: u64,
    pub read_ratio: f64,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.threads > 0, "threads must be greater than 0");
        ensure!(self.key_space > 0, "key space must be greater than 0");
        ensure!(
            (0.0..=1.0).contains(&self.read_ratio),
            "read ratio must be within 0.0..=1.0, got {}",
            self.read_ratio
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct WorkerTally {
    gets: u64,
    hits: u64,
    puts: u64,
    deletes: u64,
}

/// What a run observed
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReport {
    pub threads: usize,
    pub total_ops: u64,
    pub gets: u64,
    pub hits: u64,
    pub puts: u64,
    pub deletes: u64,
    pub elapsed_ms: u128,
    pub ops_per_sec: f64,
    pub final_len: usize,
    pub capacity: usize,
    pub shard_lens: Vec<usize>,
}

/// Run `spec` against `cache` and check the per-shard bound afterwards
pub fn run(cache: Arc<ShardedCache<u64, u64>>, spec: &WorkloadSpec) -> Result<WorkloadReport> {
    spec.validate()?;

    let barrier = Arc::new(Barrier::new(spec.threads));
    let handles: Vec<_> = (0..spec.threads)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            let spec = spec.clone();
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(spec.seed.wrapping_add(t as u64));
                let mut tally = WorkerTally::default();
                barrier.wait();
                let start = Instant::now();

                for i in 0..spec.ops_per_thread {
                    let key = rng.random_range(0..spec.key_space);
                    if i % DELETE_EVERY == DELETE_EVERY - 1 {
                        cache.delete(&key);
                        tally.deletes += 1;
                    } else if rng.random_bool(spec.read_ratio) {
                        tally.gets += 1;
                        if cache.get(&key).is_some() {
                            tally.hits += 1;
                        }
                    } else {
                        cache.put(key, i);
                        tally.puts += 1;
                    }
                }

                (tally, start.elapsed())
            })
        })
        .collect();

    let mut total = WorkerTally::default();
    let mut elapsed = Duration::ZERO;
    for (t, handle) in handles.into_iter().enumerate() {
        let (tally, took) = match handle.join() {
            Ok(result) => result,
            Err(_) => bail!("worker {} panicked", t),
        };
        debug!(worker = t, ?took, gets = tally.gets, puts = tally.puts, "worker finished");
        total.gets += tally.gets;
        total.hits += tally.hits;
        total.puts += tally.puts;
        total.deletes += tally.deletes;
        elapsed = elapsed.max(took);
    }

    let shard_lens: Vec<usize> = (0..cache.shard_count())
        .filter_map(|i| cache.shard_len(i))
        .collect();
    for (i, &len) in shard_lens.iter().enumerate() {
        ensure!(
            len <= cache.per_shard_capacity(),
            "shard {} holds {} entries, capacity is {}",
            i,
            len,
            cache.per_shard_capacity()
        );
    }

    let total_ops = total.gets + total.puts + total.deletes;
    let secs = elapsed.as_secs_f64();
    Ok(WorkloadReport {
        threads: spec.threads,
        total_ops,
        gets: total.gets,
        hits: total.hits,
        puts: total.puts,
        deletes: total.deletes,
        elapsed_ms: elapsed.as_millis(),
        ops_per_sec: if secs > 0.0 { total_ops as f64 / secs } else { 0.0 },
        final_len: shard_lens.iter().sum(),
        capacity: cache.capacity(),
        shard_lens,
    })
}
