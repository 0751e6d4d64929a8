//! Wall-clock benchmarks for both engines. The logical I/O comparison lives
//! in `index_sim::benchmark`; this measures how fast the simulation runs.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use index_sim::benchmark::load;
use index_sim::workload::{self, Pair, WorkloadKind};
use index_sim::{BPlusTree, Index, LsmTree};

const INSERT_COUNT: usize = 10_000;
const LOOKUP_SAMPLES: u64 = 1_000;
const RANGE_WIDTH: u64 = 500;
const ORDER: usize = 50;
const MEMTABLE_THRESHOLD: usize = 100;

fn fresh_btree() -> BPlusTree<u64, String> {
    BPlusTree::new(ORDER).expect("valid order")
}

fn fresh_lsm() -> LsmTree<u64, String> {
    LsmTree::new(MEMTABLE_THRESHOLD).expect("valid threshold")
}

fn bench_inserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.sample_size(20);
    group.throughput(Throughput::Elements(INSERT_COUNT as u64));

    for kind in [WorkloadKind::Sequential, WorkloadKind::Random] {
        let pairs: Vec<Pair> = workload::generate(kind, INSERT_COUNT, 0xBEEF);
        let label = format!("{kind:?}").to_lowercase();

        group.bench_function(BenchmarkId::new("b+tree", &label), |b| {
            b.iter_batched(
                fresh_btree,
                |mut tree| black_box(load(&mut tree, &pairs)),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(BenchmarkId::new("lsm-tree", &label), |b| {
            b.iter_batched(
                fresh_lsm,
                |mut lsm| black_box(load(&mut lsm, &pairs)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_lookups(c: &mut Criterion) {
    let pairs = workload::generate(WorkloadKind::Random, INSERT_COUNT, 0xF00D);
    let mut btree = fresh_btree();
    let mut lsm = fresh_lsm();
    load(&mut btree, &pairs);
    load(&mut lsm, &pairs);
    let engines: [(&str, &dyn Index<u64, String>); 2] = [("b+tree", &btree), ("lsm-tree", &lsm)];

    let mut group = c.benchmark_group("lookup");
    for (name, engine) in engines {
        group.throughput(Throughput::Elements(LOOKUP_SAMPLES));
        group.bench_function(BenchmarkId::new("point", name), |b| {
            b.iter(|| {
                let mut reads = 0;
                for key in (0..INSERT_COUNT as u64).step_by(INSERT_COUNT / LOOKUP_SAMPLES as usize) {
                    reads += engine.search(black_box(&key)).reads;
                }
                reads
            });
        });

        group.throughput(Throughput::Elements(RANGE_WIDTH));
        group.bench_function(BenchmarkId::new("range", name), |b| {
            b.iter(|| engine.range_query(black_box(&1_000), black_box(&(1_000 + RANGE_WIDTH))).reads);
        });
    }
    group.finish();
}

criterion_group!(benches, bench_inserts, bench_lookups);
criterion_main!(benches);
