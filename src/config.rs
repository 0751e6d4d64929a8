use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest B+Tree order that can still hold two children after a split.
pub const MIN_ORDER: usize = 3;

/// Configuration for the B+Tree engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BPlusTreeConfig {
    /// Fan-out bound: a node may hold at most `order - 1` keys (default: 4).
    pub order: usize,
}

impl Default for BPlusTreeConfig {
    fn default() -> Self {
        Self { order: 4 }
    }
}

impl BPlusTreeConfig {
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Largest key count a node may keep once an insert has returned.
    pub fn max_keys(&self) -> usize {
        self.order - 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(Error::InvalidConfig(format!(
                "order must be at least {MIN_ORDER}, got {}",
                self.order
            )));
        }
        Ok(())
    }
}

/// Configuration for the LSM-tree engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LsmConfig {
    /// Memtable entry count that triggers a flush (default: 100).
    pub memtable_size_threshold: usize,
    /// Compact when the SSTable count exceeds this value (default: 3).
    pub compaction_trigger: usize,
}

impl Default for LsmConfig {
    fn default() -> Self {
        Self {
            memtable_size_threshold: 100,
            compaction_trigger: 3,
        }
    }
}

impl LsmConfig {
    pub fn new(memtable_size_threshold: usize) -> Self {
        Self {
            memtable_size_threshold,
            ..Default::default()
        }
    }

    pub fn with_memtable_size_threshold(mut self, threshold: usize) -> Self {
        self.memtable_size_threshold = threshold;
        self
    }

    pub fn with_compaction_trigger(mut self, trigger: usize) -> Self {
        self.compaction_trigger = trigger;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.memtable_size_threshold == 0 {
            return Err(Error::InvalidConfig(
                "memtable_size_threshold must be at least 1".into(),
            ));
        }
        if self.compaction_trigger == 0 {
            return Err(Error::InvalidConfig(
                "compaction_trigger must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Parameters shared by the benchmark driver's measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// B+Tree order used for every measurement (default: 50).
    pub btree_order: usize,
    /// LSM memtable threshold used for every measurement (default: 100).
    pub memtable_size_threshold: usize,
    /// Seed for workload shuffling and query sampling.
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            btree_order: 50,
            memtable_size_threshold: 100,
            seed: 0x5EED_1D5C,
        }
    }
}

impl BenchConfig {
    pub fn with_btree_order(mut self, order: usize) -> Self {
        self.btree_order = order;
        self
    }

    pub fn with_memtable_size_threshold(mut self, threshold: usize) -> Self {
        self.memtable_size_threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn btree(&self) -> BPlusTreeConfig {
        BPlusTreeConfig::new(self.btree_order)
    }

    pub fn lsm(&self) -> LsmConfig {
        LsmConfig::new(self.memtable_size_threshold)
    }

    pub fn validate(&self) -> Result<()> {
        self.btree().validate()?;
        self.lsm().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(BPlusTreeConfig::default().validate().is_ok());
        assert!(LsmConfig::default().validate().is_ok());
        assert!(BenchConfig::default().validate().is_ok());
    }

    #[test]
    fn order_below_three_is_rejected() {
        for order in 0..MIN_ORDER {
            let err = BPlusTreeConfig::new(order).validate().unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)));
        }
        assert!(BPlusTreeConfig::new(MIN_ORDER).validate().is_ok());
    }

    #[test]
    fn zero_thresholds_are_rejected() {
        assert!(LsmConfig::new(0).validate().is_err());
        assert!(
            LsmConfig::default()
                .with_compaction_trigger(0)
                .validate()
                .is_err()
        );
        assert!(LsmConfig::new(1).validate().is_ok());
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = LsmConfig::new(64).with_compaction_trigger(5);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: LsmConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
