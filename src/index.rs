use std::hash::Hash;

use crate::bptree::BPlusTree;
use crate::lsm::LsmTree;
use crate::stats::IoStats;
use crate::types::{Lookup, RangeScan};

/// The contract both engines expose to a benchmark driver.
///
/// Every call reports its own cost; nothing carries over between calls except
/// the cumulative [`IoStats`].
pub trait Index<K, V> {
    /// Short engine name for reports.
    fn name(&self) -> &'static str;

    /// Insert a pair, returning the writes charged to this call.
    fn insert(&mut self, key: K, value: V) -> u64;

    fn search(&self, key: &K) -> Lookup<V>;

    fn range_query(&self, low: &K, high: &K) -> RangeScan<K, V>;

    /// Flush any buffered writes. A no-op for engines without a buffer.
    fn sync(&mut self) -> u64 {
        0
    }

    fn stats(&self) -> &IoStats;

    fn reset_stats(&mut self);
}

impl<K: Ord + Clone, V: Clone> Index<K, V> for BPlusTree<K, V> {
    fn name(&self) -> &'static str {
        "b+tree"
    }

    fn insert(&mut self, key: K, value: V) -> u64 {
        BPlusTree::insert(self, key, value)
    }

    fn search(&self, key: &K) -> Lookup<V> {
        BPlusTree::search(self, key)
    }

    fn range_query(&self, low: &K, high: &K) -> RangeScan<K, V> {
        BPlusTree::range_query(self, low, high)
    }

    fn stats(&self) -> &IoStats {
        BPlusTree::stats(self)
    }

    fn reset_stats(&mut self) {
        BPlusTree::reset_stats(self)
    }
}

impl<K: Ord + Hash + Clone, V: Clone> Index<K, V> for LsmTree<K, V> {
    fn name(&self) -> &'static str {
        "lsm-tree"
    }

    fn insert(&mut self, key: K, value: V) -> u64 {
        LsmTree::insert(self, key, value)
    }

    fn search(&self, key: &K) -> Lookup<V> {
        LsmTree::search(self, key)
    }

    fn range_query(&self, low: &K, high: &K) -> RangeScan<K, V> {
        LsmTree::range_query(self, low, high)
    }

    fn sync(&mut self) -> u64 {
        self.force_flush()
    }

    fn stats(&self) -> &IoStats {
        LsmTree::stats(self)
    }

    fn reset_stats(&mut self) {
        LsmTree::reset_stats(self)
    }
}
