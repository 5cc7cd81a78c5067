//! shardctl - drive a concurrent workload against a ShardedCache

mod workload;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use shardcache::{CacheConfig, ShardedCache};
use tracing::info;

use crate::workload::{WorkloadReport, WorkloadSpec};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON cache config (`shard_count`, `per_shard_capacity`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of shards (overrides the config file)
    #[arg(short, long)]
    shards: Option<usize>,

    /// Capacity of each shard (overrides the config file)
    #[arg(short = 'p', long)]
    capacity: Option<usize>,

    /// Worker threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Operations per worker thread
    #[arg(short, long, default_value_t = 100_000)]
    ops: u64,

    /// Keys are drawn uniformly from 0..key_space
    #[arg(short, long, default_value_t = 65_536)]
    key_space: u64,

    /// Fraction of non-delete operations that are gets
    #[arg(short, long, default_value_t = 0.9)]
    read_ratio: f64,

    /// RNG seed; worker N uses seed + N
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Config file first, then explicit flags on top
fn load_config(path: Option<&Path>, shards: Option<usize>, capacity: Option<usize>) -> Result<CacheConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            CacheConfig::from_json(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CacheConfig::default(),
    };

    if let Some(shards) = shards {
        config = config.with_shard_count(shards);
    }
    if let Some(capacity) = capacity {
        config = config.with_per_shard_capacity(capacity);
    }
    config.validate()?;
    Ok(config)
}

fn print_report(report: &WorkloadReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let hit_ratio = if report.gets == 0 {
        0.0
    } else {
        report.hits as f64 / report.gets as f64
    };
    println!("threads:     {}", report.threads);
    println!("operations:  {}", report.total_ops);
    println!("gets/hits:   {} / {} ({:.1}%)", report.gets, report.hits, hit_ratio * 100.0);
    println!("puts:        {}", report.puts);
    println!("deletes:     {}", report.deletes);
    println!("elapsed:     {} ms", report.elapsed_ms);
    println!("throughput:  {:.0} ops/sec", report.ops_per_sec);
    println!("entries:     {} / {}", report.final_len, report.capacity);
    println!("shard sizes: {:?}", report.shard_lens);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = load_config(args.config.as_deref(), args.shards, args.capacity)?;
    info!("shardctl v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Cache: {} shards x {} entries",
        config.shard_count, config.per_shard_capacity
    );

    let cache = Arc::new(ShardedCache::with_config(&config)?);
    let spec = WorkloadSpec {
        threads: args.threads,
        ops_per_thread: args.ops,
        key_space: args.key_space,
        read_ratio: args.read_ratio,
        seed: args.seed,
    };
    info!(
        "Workload: {} threads x {} ops over {} keys, read ratio {}",
        spec.threads, spec.ops_per_thread, spec.key_space, spec.read_ratio
    );

    let report = workload::run(cache, &spec)?;
    info!(
        ops = report.total_ops,
        elapsed_ms = report.elapsed_ms as u64,
        ops_per_sec = report.ops_per_sec,
        "Workload finished"
    );

    print_report(&report, args.json)
}
