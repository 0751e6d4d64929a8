//! In-memory LSM-tree with logical I/O accounting.
//!
//! ```text
//!   insert ──► memtable (unsorted, free to read)
//!                 │ reaches memtable_size_threshold
//!                 ▼ flush: sort, append as newest table
//!   sstables:  [ oldest ] [ ... ] [ newest ]
//!                 │  more than compaction_trigger tables
//!                 ▼ compact: merge the two oldest, append result as newest
//! ```
//!
//! Cost model: a flush or compaction charges one sequential write per entry
//! it emits. A lookup charges one random read per SSTable it consults; the
//! memtable is free.

use std::hash::Hash;

use tracing::debug;

use crate::compaction::{self, CompactionOutcome};
use crate::config::LsmConfig;
use crate::error::Result;
use crate::memtable::MemTable;
use crate::sstable::SSTable;
use crate::stats::{IoCost, IoStats};
use crate::types::{Lookup, RangeScan};

/// A write-optimized index: a memtable in front of a sequence of SSTables.
///
/// The newest copy of a key is authoritative by position: the memtable beats
/// every table, and a later table beats an earlier one. Note that compaction
/// appends its output as the newest table even though its contents predate
/// the tables it jumps over.
#[derive(Debug, Clone)]
pub struct LsmTree<K, V> {
    config: LsmConfig,
    memtable: MemTable<K, V>,
    /// Oldest first.
    sstables: Vec<SSTable<K, V>>,
    next_table_id: u64,
    stats: IoStats,
}

impl<K: Ord + Hash + Clone, V: Clone> LsmTree<K, V> {
    /// Create an empty tree that flushes at `memtable_size_threshold` entries.
    /// Fails if the threshold is zero.
    pub fn new(memtable_size_threshold: usize) -> Result<Self> {
        Self::with_config(LsmConfig::new(memtable_size_threshold))
    }

    pub fn with_config(config: LsmConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            memtable_size_threshold = config.memtable_size_threshold,
            compaction_trigger = config.compaction_trigger,
            "creating lsm-tree"
        );
        Ok(LsmTree {
            memtable: MemTable::new(config.memtable_size_threshold),
            config,
            sstables: Vec::new(),
            next_table_id: 1,
            stats: IoStats::default(),
        })
    }

    /// Write `key → value` into the memtable, flushing if it is now full.
    ///
    /// Returns the sequential writes this call triggered: zero unless the
    /// insert caused a flush (and possibly a compaction).
    pub fn insert(&mut self, key: K, value: V) -> u64 {
        self.memtable.put(key, value);
        self.stats.inserts += 1;
        if self.memtable.is_full() {
            return self.flush();
        }
        0
    }

    /// Drain the memtable into a new SSTable now, regardless of its size.
    ///
    /// Benchmarks call this at workload boundaries so every write is
    /// accounted for. Returns the sequential writes charged.
    pub fn force_flush(&mut self) -> u64 {
        self.flush()
    }

    /// Point lookup.
    ///
    /// Algorithm:
    ///   1. Check the memtable (no cost)
    ///   2. Walk SSTables newest → oldest, one read each
    ///   3. Binary search inside each; the first hit wins
    pub fn search(&self, key: &K) -> Lookup<V> {
        if let Some(value) = self.memtable.get(key) {
            return Lookup::found(value.clone(), 0);
        }

        let mut cost = IoCost::default();
        for table in self.sstables.iter().rev() {
            cost.read();
            if let Some(value) = table.get(key) {
                return Lookup::found(value.clone(), cost.reads);
            }
        }
        Lookup::missing(cost.reads)
    }

    /// Inclusive range scan over `[low, high]`.
    ///
    /// Collects matching entries from the memtable (free) and from every
    /// SSTable (one read each), then sorts by key. Copies of the same key from
    /// different sources are all returned; nothing is deduplicated. The sort
    /// is stable, so equal keys appear memtable first, then oldest table to
    /// newest.
    pub fn range_query(&self, low: &K, high: &K) -> RangeScan<K, V> {
        let mut cost = IoCost::default();
        let mut entries: Vec<(K, V)> = self
            .memtable
            .range(low, high)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        for table in &self.sstables {
            cost.read();
            entries.extend(table.range(low, high).iter().cloned());
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        RangeScan {
            entries,
            reads: cost.reads,
        }
    }

    /// Entries buffered in the memtable.
    pub fn memtable_len(&self) -> usize {
        self.memtable.len()
    }

    fn flush(&mut self) -> u64 {
        if self.memtable.is_empty() {
            return 0;
        }

        let mut cost = IoCost::default();
        let entries = self.memtable.drain_sorted();
        let id = self.allocate_table_id();
        cost.write_n(entries.len());
        debug!(table = id, entries = entries.len(), "flushed memtable");
        self.sstables.push(SSTable::from_sorted(id, 0, entries));
        self.stats.flushes += 1;

        if compaction::needs_compaction(self.sstables.len(), self.config.compaction_trigger) {
            if let Some(outcome) = self.compact() {
                cost.write_n(outcome.entries_written);
            }
        }

        self.stats.charge(cost);
        cost.writes
    }

    fn compact(&mut self) -> Option<CompactionOutcome> {
        let id = self.next_table_id;
        let outcome = compaction::compact_oldest(&mut self.sstables, id)?;
        self.next_table_id += 1;
        self.stats.compactions += 1;
        debug!(
            older = outcome.inputs.0,
            newer = outcome.inputs.1,
            output = outcome.output,
            entries = outcome.entries_written,
            tables = self.sstables.len(),
            "compacted two oldest sstables"
        );
        Some(outcome)
    }

    fn allocate_table_id(&mut self) -> u64 {
        let id = self.next_table_id;
        self.next_table_id += 1;
        id
    }
}

impl<K, V> LsmTree<K, V> {
    pub fn config(&self) -> &LsmConfig {
        &self.config
    }

    /// SSTables, oldest first.
    pub fn sstables(&self) -> &[SSTable<K, V>] {
        &self.sstables
    }

    pub fn sstable_count(&self) -> usize {
        self.sstables.len()
    }

    /// Total sequential writes charged since creation or the last reset.
    pub fn sequential_writes(&self) -> u64 {
        self.stats.writes
    }

    pub fn stats(&self) -> &IoStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = IoStats::default();
    }
}
