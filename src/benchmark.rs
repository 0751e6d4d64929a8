//! Benchmark driver comparing the two engines on identical workloads.
//!
//! Four measurements, each building fresh engines from a [`BenchConfig`]:
//! write amplification, insert throughput, point-read I/O and range-scan I/O.
//! Results are plain data; rendering them is up to the caller.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bptree::BPlusTree;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::index::Index;
use crate::lsm::LsmTree;
use crate::workload::{self, Pair, WorkloadKind};

/// Dataset sizes used by [`run_all`] for write amplification.
pub const WRITE_AMPLIFICATION_SIZES: [usize; 5] = [1_000, 2_000, 5_000, 8_000, 10_000];
/// Range widths used by [`run_all`] for range-scan I/O.
pub const RANGE_SIZES: [usize; 5] = [10, 50, 100, 200, 500];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteAmplificationPoint {
    pub size: usize,
    pub btree: f64,
    pub lsm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputPoint {
    /// Inserts completed when the sample was taken.
    pub inserts: usize,
    pub btree_elapsed: Duration,
    pub lsm_elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadSample {
    pub key: u64,
    pub btree_reads: u64,
    pub lsm_reads: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadIoReport {
    pub samples: Vec<ReadSample>,
    pub btree_avg: f64,
    pub lsm_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeIoPoint {
    pub range_size: usize,
    pub low: u64,
    pub high: u64,
    pub btree_reads: u64,
    pub lsm_reads: u64,
    pub btree_entries: usize,
    pub lsm_entries: usize,
}

/// Everything [`run_all`] measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub config: BenchConfig,
    pub write_amplification: Vec<WriteAmplificationPoint>,
    pub throughput: Vec<ThroughputPoint>,
    pub read_io: ReadIoReport,
    pub range_io: Vec<RangeIoPoint>,
}

impl Report {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn engines(cfg: &BenchConfig) -> Result<(BPlusTree<u64, String>, LsmTree<u64, String>)> {
    Ok((
        BPlusTree::with_config(cfg.btree())?,
        LsmTree::with_config(cfg.lsm())?,
    ))
}

/// Feed every pair to `index`, then drain any buffer. Returns writes charged.
pub fn load<I: Index<u64, String> + ?Sized>(index: &mut I, pairs: &[Pair]) -> u64 {
    let mut writes = 0;
    for (key, value) in pairs {
        writes += index.insert(*key, value.clone());
    }
    writes + index.sync()
}

fn ratio(total: u64, size: usize) -> f64 {
    if size == 0 {
        return 0.0;
    }
    total as f64 / size as f64
}

/// Physical writes per logical write after loading a random workload.
///
/// The B+Tree figure sums the per-insert write counts; the LSM figure reads
/// the cumulative sequential-write counter after a final flush.
pub fn write_amplification(
    sizes: &[usize],
    cfg: &BenchConfig,
) -> Result<Vec<WriteAmplificationPoint>> {
    let mut points = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let pairs = workload::generate(WorkloadKind::Random, size, cfg.seed);
        let (mut btree, mut lsm) = engines(cfg)?;

        let btree_writes = load(&mut btree, &pairs);
        load(&mut lsm, &pairs);

        let point = WriteAmplificationPoint {
            size,
            btree: ratio(btree_writes, size),
            lsm: ratio(lsm.sequential_writes(), size),
        };
        info!(size, btree = point.btree, lsm = point.lsm, "write amplification");
        points.push(point);
    }
    Ok(points)
}

/// Wall-clock time to insert a random workload, sampled every `checkpoint`
/// inserts (starting with the first).
pub fn insert_throughput(
    size: usize,
    checkpoint: usize,
    cfg: &BenchConfig,
) -> Result<Vec<ThroughputPoint>> {
    let checkpoint = checkpoint.max(1);
    let pairs = workload::generate(WorkloadKind::Random, size, cfg.seed);
    let (mut btree, mut lsm) = engines(cfg)?;

    let btree_samples = timed_load(&mut btree, &pairs, checkpoint);
    let lsm_samples = timed_load(&mut lsm, &pairs, checkpoint);

    Ok(btree_samples
        .into_iter()
        .zip(lsm_samples)
        .map(|((inserts, btree_elapsed), (_, lsm_elapsed))| ThroughputPoint {
            inserts,
            btree_elapsed,
            lsm_elapsed,
        })
        .collect())
}

fn timed_load<I: Index<u64, String>>(
    index: &mut I,
    pairs: &[Pair],
    checkpoint: usize,
) -> Vec<(usize, Duration)> {
    let mut samples = Vec::new();
    let start = Instant::now();
    for (i, (key, value)) in pairs.iter().enumerate() {
        index.insert(*key, value.clone());
        if i % checkpoint == 0 {
            samples.push((i, start.elapsed()));
        }
    }
    samples
}

/// Read I/O of point lookups on `samples` distinct present keys, after
/// loading a random workload of `size` keys.
pub fn read_io(size: usize, samples: usize, cfg: &BenchConfig) -> Result<ReadIoReport> {
    let pairs = workload::generate(WorkloadKind::Random, size, cfg.seed);
    let (mut btree, mut lsm) = engines(cfg)?;
    load(&mut btree, &pairs);
    load(&mut lsm, &pairs);

    let mut rng = StdRng::seed_from_u64(cfg.seed.wrapping_add(1));
    let keys = rand::seq::index::sample(&mut rng, size, samples.min(size));

    let samples: Vec<ReadSample> = keys
        .into_iter()
        .map(|key| {
            let key = key as u64;
            ReadSample {
                key,
                btree_reads: btree.search(&key).reads,
                lsm_reads: lsm.search(&key).reads,
            }
        })
        .collect();

    let count = samples.len();
    let btree_total: u64 = samples.iter().map(|s| s.btree_reads).sum();
    let lsm_total: u64 = samples.iter().map(|s| s.lsm_reads).sum();
    let report = ReadIoReport {
        btree_avg: ratio(btree_total, count),
        lsm_avg: ratio(lsm_total, count),
        samples,
    };
    info!(
        btree_avg = report.btree_avg,
        lsm_avg = report.lsm_avg,
        "average reads per lookup"
    );
    Ok(report)
}

/// Read I/O of range scans of each width in `range_sizes`, after loading a
/// sequential workload of `size` keys. Each range starts at a random key.
pub fn range_io(size: usize, range_sizes: &[usize], cfg: &BenchConfig) -> Result<Vec<RangeIoPoint>> {
    let pairs = workload::generate(WorkloadKind::Sequential, size, cfg.seed);
    let (mut btree, mut lsm) = engines(cfg)?;
    load(&mut btree, &pairs);
    load(&mut lsm, &pairs);

    let mut rng = StdRng::seed_from_u64(cfg.seed.wrapping_add(2));
    let points = range_sizes
        .iter()
        .map(|&range_size| {
            let span = size.saturating_sub(range_size) as u64;
            let low = rng.gen_range(0..=span);
            let high = low + range_size as u64;
            let b = btree.range_query(&low, &high);
            let l = lsm.range_query(&low, &high);
            RangeIoPoint {
                range_size,
                low,
                high,
                btree_reads: b.reads,
                lsm_reads: l.reads,
                btree_entries: b.len(),
                lsm_entries: l.len(),
            }
        })
        .collect();
    Ok(points)
}

/// Run every measurement with the default sizes.
pub fn run_all(cfg: &BenchConfig) -> Result<Report> {
    cfg.validate()?;
    Ok(Report {
        config: cfg.clone(),
        write_amplification: write_amplification(&WRITE_AMPLIFICATION_SIZES, cfg)?,
        throughput: insert_throughput(10_000, 1_000, cfg)?,
        read_io: read_io(5_000, 100, cfg)?,
        range_io: range_io(5_000, &RANGE_SIZES, cfg)?,
    })
}
