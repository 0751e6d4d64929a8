use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Logical I/O charged by a single public operation.
///
/// "I/O" is a counter, not a system call. A B+Tree charges one unit per node
/// visited or modified; an LSM-tree charges one read per SSTable consulted and
/// one sequential write per entry emitted by a flush or compaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoCost {
    pub reads: u64,
    pub writes: u64,
}

impl IoCost {
    pub fn read(&mut self) {
        self.reads += 1;
    }

    pub fn write(&mut self) {
        self.writes += 1;
    }

    pub fn write_n(&mut self, n: usize) {
        self.writes += n as u64;
    }
}

impl AddAssign for IoCost {
    fn add_assign(&mut self, rhs: IoCost) {
        self.reads += rhs.reads;
        self.writes += rhs.writes;
    }
}

/// Cumulative counters kept by an engine across mutating calls.
///
/// Lookups take `&self` and report their cost in the returned value only;
/// these counters cover inserts, flushes and compactions. For the B+Tree this
/// includes the descent reads an insert performs but does not return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoStats {
    /// Logical writes requested by the caller (one per insert).
    pub inserts: u64,
    pub reads: u64,
    pub writes: u64,
    /// B+Tree node splits (leaf and internal).
    pub splits: u64,
    /// LSM memtable flushes.
    pub flushes: u64,
    /// LSM merges of two SSTables.
    pub compactions: u64,
}

impl IoStats {
    pub(crate) fn charge(&mut self, cost: IoCost) {
        self.reads += cost.reads;
        self.writes += cost.writes;
    }

    /// Physical writes per logical write. Zero before the first insert.
    pub fn write_amplification(&self) -> f64 {
        if self.inserts == 0 {
            return 0.0;
        }
        self.writes as f64 / self.inserts as f64
    }
}
