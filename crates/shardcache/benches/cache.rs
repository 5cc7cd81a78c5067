use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shardcache::ShardedCache;
use std::sync::Arc;
use std::thread;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let cache = ShardedCache::new(16, 1000).unwrap();
        let data = vec![b'x'; 1024];

        for key in 0..100u64 {
            cache.put(key, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let cache = ShardedCache::new(16, 64).unwrap();
        let data = vec![b'x'; 1024];

        for key in 0..100u64 {
            cache.put(key, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter.is_multiple_of(2) {
                black_box(cache.get(&(counter % 100)));
            } else {
                cache.put(counter % 4096, data.clone());
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_always_evicts", |b| {
        let cache = ShardedCache::new(4, 8).unwrap();

        let mut counter = 0u64;
        b.iter(|| {
            cache.put(black_box(counter), counter);
            counter += 1;
        });
    });

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");
    group.sample_size(20);

    for shards in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::new("4_threads", shards), &shards, |b, &shards| {
            b.iter(|| {
                let cache = Arc::new(ShardedCache::new(shards, 4096 / shards).unwrap());
                let handles: Vec<_> = (0..4u64)
                    .map(|t| {
                        let c = Arc::clone(&cache);
                        thread::spawn(move || {
                            for i in 0..1000u64 {
                                c.put(i, t);
                                black_box(c.get(&i));
                            }
                        })
                    })
                    .collect();

                for h in handles {
                    h.join().unwrap();
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_eviction,
    bench_contention
);
criterion_main!(benches);
