use crate::error::{Error, Result};
use crate::sstable::SSTable;

/// Builds an SSTable from a sorted stream of key-value pairs.
///
/// Used during:
/// - Memtable flush (sorted memtable snapshot → SSTable)
/// - Compaction (merged runs → one new SSTable)
///
/// Keys must arrive in strictly ascending order; the first out-of-order key
/// is rejected and the builder keeps what it had.
pub struct SSTableBuilder<K, V> {
    entries: Vec<(K, V)>,
    sst_id: u64,
    level: u32,
}

impl<K: Ord + Clone, V> SSTableBuilder<K, V> {
    pub fn new(sst_id: u64, level: u32) -> Self {
        SSTableBuilder {
            entries: Vec::new(),
            sst_id,
            level,
        }
    }

    pub fn with_capacity(sst_id: u64, level: u32, capacity: usize) -> Self {
        SSTableBuilder {
            entries: Vec::with_capacity(capacity),
            sst_id,
            level,
        }
    }

    /// Add a key-value pair. MUST be called in ascending key order.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        if let Some((last, _)) = self.entries.last() {
            if *last >= key {
                return Err(Error::Invariant(format!(
                    "sstable {} keys must be strictly ascending",
                    self.sst_id
                )));
            }
        }
        self.entries.push((key, value));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seal the table and compute its metadata.
    pub fn finish(self) -> SSTable<K, V> {
        SSTable::from_sorted(self.sst_id, self.level, self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_returns_correct_meta() {
        let mut builder = SSTableBuilder::new(42, 0);
        builder.add("alpha", "first").unwrap();
        builder.add("omega", "last").unwrap();
        let table = builder.finish();

        let meta = table.meta();
        assert_eq!(meta.id, 42);
        assert_eq!(meta.level, 0);
        assert_eq!(meta.min_key, Some("alpha"));
        assert_eq!(meta.max_key, Some("omega"));
        assert_eq!(meta.entry_count, 2);
    }

    #[test]
    fn out_of_order_key_is_rejected() {
        let mut builder = SSTableBuilder::new(1, 0);
        builder.add(5, ()).unwrap();
        assert!(matches!(builder.add(3, ()), Err(Error::Invariant(_))));
        assert!(builder.add(5, ()).is_err(), "duplicates are not allowed");
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn empty_table_has_no_bounds() {
        let table = SSTableBuilder::<u32, ()>::new(7, 0).finish();
        assert!(table.is_empty());
        assert_eq!(table.meta().min_key, None);
        assert_eq!(table.meta().max_key, None);
    }
}
