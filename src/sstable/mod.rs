pub mod builder;

pub use builder::SSTableBuilder;

use serde::{Deserialize, Serialize};

/// Descriptive metadata for one SSTable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SSTableMeta<K> {
    /// Unique, monotonically assigned identifier.
    pub id: u64,
    /// 0 for a flushed memtable, one more than its deepest input for a merge.
    pub level: u32,
    /// Smallest key, `None` for an empty table.
    pub min_key: Option<K>,
    /// Largest key, `None` for an empty table.
    pub max_key: Option<K>,
    pub entry_count: u64,
}

/// An immutable sorted run of unique keys.
///
/// Produced once, by a memtable flush or by merging two older tables, and
/// never modified afterwards. Lookups use binary search over the sorted
/// entries.
#[derive(Debug, Clone)]
pub struct SSTable<K, V> {
    meta: SSTableMeta<K>,
    entries: Vec<(K, V)>,
}

impl<K: Ord + Clone, V> SSTable<K, V> {
    /// Seal an already sorted, duplicate-free run.
    pub(crate) fn from_sorted(id: u64, level: u32, entries: Vec<(K, V)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        let meta = SSTableMeta {
            id,
            level,
            min_key: entries.first().map(|(k, _)| k.clone()),
            max_key: entries.last().map(|(k, _)| k.clone()),
            entry_count: entries.len() as u64,
        };
        SSTable { meta, entries }
    }
}

impl<K: Ord, V> SSTable<K, V> {
    /// Point lookup by binary search.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// Entries with `low <= key <= high`, in key order.
    ///
    /// The start is found by binary search on `low`; the slice ends at the
    /// first key above `high`. An inverted range yields an empty slice.
    pub fn range(&self, low: &K, high: &K) -> &[(K, V)] {
        let start = self.entries.partition_point(|(k, _)| k < low);
        let end = self.entries.partition_point(|(k, _)| k <= high);
        &self.entries[start..end.max(start)]
    }

    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    pub fn meta(&self) -> &SSTableMeta<K> {
        &self.meta
    }

    pub fn id(&self) -> u64 {
        self.meta.id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
