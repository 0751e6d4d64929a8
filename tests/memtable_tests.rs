// MemTable: the LSM-tree's unsorted, overwrite-on-put write buffer.

use index_sim::memtable::MemTable;

// =============================================================================
// Test 1: Basic put and get
// =============================================================================
#[test]
fn put_then_get_returns_value() {
    let mut mt = MemTable::new(100);
    mt.put(7u64, "value".to_string());

    assert_eq!(mt.get(&7), Some(&"value".to_string()));
}

// =============================================================================
// Test 2: Get non-existent key
// =============================================================================
#[test]
fn get_nonexistent_returns_none() {
    let mt: MemTable<u64, String> = MemTable::new(100);
    assert_eq!(mt.get(&1), None);
}

// =============================================================================
// Test 3: Put overwrites
// =============================================================================
#[test]
fn put_twice_keeps_latest_value() {
    let mut mt = MemTable::new(100);
    mt.put(1u64, "first");
    mt.put(1u64, "second");

    assert_eq!(mt.get(&1), Some(&"second"));
    assert_eq!(mt.len(), 1);
}

// =============================================================================
// Test 4: is_full returns false when under limit
// =============================================================================
#[test]
fn is_full_false_when_under_limit() {
    let mut mt = MemTable::new(3);
    assert!(!mt.is_full());
    mt.put(1u64, ());
    mt.put(2u64, ());
    assert!(!mt.is_full());
}

// =============================================================================
// Test 5: is_full returns true at the limit
// =============================================================================
#[test]
fn is_full_true_at_limit() {
    let mut mt = MemTable::new(3);
    for k in 0..3u64 {
        mt.put(k, ());
    }
    assert!(mt.is_full());
}

// =============================================================================
// Test 6: Drain returns sorted entries and empties the table
// =============================================================================
// Flushes rely on this: the memtable is unsorted, the SSTable must not be.
#[test]
fn drain_sorted_orders_by_key() {
    let mut mt = MemTable::new(10);
    for k in [9u64, 2, 7, 4] {
        mt.put(k, k * 10);
    }

    let entries = mt.drain_sorted();
    assert_eq!(entries, vec![(2, 20), (4, 40), (7, 70), (9, 90)]);
    assert!(mt.is_empty());
    assert_eq!(mt.get(&2), None);
}

// =============================================================================
// Test 7: Range filter is inclusive on both ends
// =============================================================================
#[test]
fn range_is_inclusive() {
    let mut mt = MemTable::new(10);
    for k in 0..10u64 {
        mt.put(k, ());
    }

    let mut keys: Vec<u64> = mt.range(&3, &6).map(|(k, _)| *k).collect();
    keys.sort();
    assert_eq!(keys, vec![3, 4, 5, 6]);
    assert_eq!(mt.range(&6, &3).count(), 0);
}
