use std::collections::HashMap;
use std::hash::Hash;

/// In-memory write buffer of the LSM-tree.
///
/// Every write lands here first. Keys are unique: a second put overwrites the
/// first. The map is unsorted; order is imposed only when the memtable is
/// drained into an SSTable.
///
/// Reads from the memtable are free in the cost model since it is resident
/// in memory by construction.
#[derive(Debug, Clone)]
pub struct MemTable<K, V> {
    data: HashMap<K, V>,
    size_limit: usize,
}

impl<K: Ord + Hash + Clone, V: Clone> MemTable<K, V> {
    /// Create an empty memtable that reports full at `size_limit` entries.
    pub fn new(size_limit: usize) -> Self {
        MemTable {
            data: HashMap::with_capacity(size_limit),
            size_limit,
        }
    }

    /// Insert or overwrite a key.
    pub fn put(&mut self, key: K, value: V) {
        self.data.insert(key, value);
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    /// Distinct keys currently buffered.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the entry count has reached the flush threshold.
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.size_limit
    }

    /// Entries with `low <= key <= high`, in no particular order.
    pub fn range<'a>(&'a self, low: &'a K, high: &'a K) -> impl Iterator<Item = (&'a K, &'a V)> {
        self.data
            .iter()
            .filter(move |(k, _)| low <= *k && *k <= high)
    }

    /// Empty the memtable, returning its contents sorted by key.
    pub fn drain_sorted(&mut self) -> Vec<(K, V)> {
        let mut entries: Vec<(K, V)> = self.data.drain().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
