//! Size-tiered compaction of the oldest SSTables.
//!
//! After each flush the engine checks the table count; once it exceeds the
//! configured trigger, the two oldest tables are merged into one. The merged
//! table is appended as the newest table, after every table that was not
//! merged. Only one merge happens per flush.

use serde::{Deserialize, Serialize};

use crate::iterator::MergeIter;
use crate::sstable::SSTable;

/// What a single compaction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionOutcome {
    /// Ids of the merged inputs, oldest first.
    pub inputs: (u64, u64),
    pub output: u64,
    /// Entries written to the output table (its sequential-write cost).
    pub entries_written: usize,
}

/// Whether a table sequence of `table_count` tables needs a merge.
pub fn needs_compaction(table_count: usize, trigger: usize) -> bool {
    table_count > trigger
}

/// Merge two tables into a new one with id `id`.
///
/// `older` must come before `newer` in the table sequence. On a key present
/// in both, `newer`'s value is kept. The output level is one more than the
/// deeper input.
pub fn merge<K: Ord + Clone, V: Clone>(
    older: &SSTable<K, V>,
    newer: &SSTable<K, V>,
    id: u64,
) -> SSTable<K, V> {
    let level = older.meta().level.max(newer.meta().level) + 1;
    let entries: Vec<(K, V)> = MergeIter::new(
        older.entries().iter().cloned(),
        newer.entries().iter().cloned(),
    )
    .collect();
    SSTable::from_sorted(id, level, entries)
}

/// Replace the two oldest tables with their merge, appended as the newest.
///
/// Returns `None` when fewer than two tables exist.
pub(crate) fn compact_oldest<K: Ord + Clone, V: Clone>(
    tables: &mut Vec<SSTable<K, V>>,
    id: u64,
) -> Option<CompactionOutcome> {
    if tables.len() < 2 {
        return None;
    }
    let merged = merge(&tables[0], &tables[1], id);
    let inputs = (tables[0].id(), tables[1].id());
    tables.drain(..2);
    let entries_written = merged.len();
    tables.push(merged);
    Some(CompactionOutcome {
        inputs,
        output: id,
        entries_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: u64, keys: &[u32], tag: &'static str) -> SSTable<u32, &'static str> {
        SSTable::from_sorted(id, 0, keys.iter().map(|&k| (k, tag)).collect())
    }

    #[test]
    fn trigger_is_strictly_greater() {
        assert!(!needs_compaction(3, 3));
        assert!(needs_compaction(4, 3));
    }

    #[test]
    fn compact_oldest_appends_merged_table_last() {
        let mut tables = vec![
            table(1, &[1, 2], "t1"),
            table(2, &[2, 3], "t2"),
            table(3, &[9], "t3"),
            table(4, &[10], "t4"),
        ];
        let outcome = compact_oldest(&mut tables, 5).unwrap();
        assert_eq!(outcome.inputs, (1, 2));
        assert_eq!(outcome.output, 5);
        assert_eq!(outcome.entries_written, 3);

        let ids: Vec<u64> = tables.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert_eq!(tables[2].get(&2), Some(&"t2"));
        assert_eq!(tables[2].meta().level, 1);
    }

    #[test]
    fn single_table_is_left_alone() {
        let mut tables = vec![table(1, &[1], "t1")];
        assert!(compact_oldest(&mut tables, 2).is_none());
        assert_eq!(tables.len(), 1);
    }
}
