//! # B+Tree vs LSM-Tree I/O Simulator
//!
//! Two classical index structures side by side, instrumented with logical
//! I/O counters so their cost profiles can be compared under the same
//! workload.
//!
//! ## Core idea
//! A B+Tree updates in place: every insert reads a root-to-leaf path and
//! rewrites the leaf, occasionally splitting nodes up the tree. An LSM-tree
//! buffers writes in memory, flushes them as sorted runs and merges those runs
//! later, trading cheap sequential writes for reads that may have to consult
//! several runs. Nothing here touches a disk; "I/O" is a counter.
//!
//! Both engines implement [`Index`]; every lookup returns its cost alongside
//! its result.

pub mod benchmark;
pub mod bptree;
pub mod compaction;
pub mod config;
pub mod error;
pub mod index;
pub mod iterator;
pub mod lsm;
pub mod memtable;
pub mod sstable;
pub mod stats;
pub mod types;
pub mod workload;

// Public re-exports for the top-level API
pub use bptree::BPlusTree;
pub use config::{BPlusTreeConfig, BenchConfig, LsmConfig};
pub use error::{Error, Result};
pub use index::Index;
pub use lsm::LsmTree;
pub use stats::{IoCost, IoStats};
pub use types::{Lookup, RangeScan};
