use serde::{Deserialize, Serialize};

/// A stored key-value pair.
pub type Entry<K, V> = (K, V);

/// Result of a point lookup: the value (if any) plus the reads this call cost.
///
/// Absence is a normal outcome, not an error. `reads` only ever reflects the
/// call that produced it, so two identical lookups on an unmodified index
/// report the same number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup<V> {
    pub value: Option<V>,
    pub reads: u64,
}

impl<V> Lookup<V> {
    pub fn found(value: V, reads: u64) -> Self {
        Lookup {
            value: Some(value),
            reads,
        }
    }

    pub fn missing(reads: u64) -> Self {
        Lookup { value: None, reads }
    }

    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }
}

/// Result of an inclusive range scan.
///
/// Entries are in ascending key order. Whether stale duplicates can appear
/// depends on the engine: the LSM-tree returns every copy it finds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeScan<K, V> {
    pub entries: Vec<Entry<K, V>>,
    pub reads: u64,
}

impl<K, V> RangeScan<K, V> {
    pub fn empty() -> Self {
        RangeScan {
            entries: Vec::new(),
            reads: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys only, in result order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }
}
