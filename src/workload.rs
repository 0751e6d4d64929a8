//! Synthetic key/value streams for driving both engines identically.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Keys are dense integers; values are `"value_<key>"`.
pub type Pair = (u64, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadKind {
    /// Keys `0..size` in ascending order.
    Sequential,
    /// Keys `0..size` in shuffled order.
    Random,
}

pub fn value_for(key: u64) -> String {
    format!("value_{key}")
}

/// `(i, "value_i")` for `i in 0..size`, ascending.
pub fn sequential(size: usize) -> Vec<Pair> {
    (0..size as u64).map(|k| (k, value_for(k))).collect()
}

/// The sequential workload, shuffled with `rng`.
pub fn random<R: rand::Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Pair> {
    let mut pairs = sequential(size);
    pairs.shuffle(rng);
    pairs
}

/// Generate a workload deterministically from `seed`.
pub fn generate(kind: WorkloadKind, size: usize, seed: u64) -> Vec<Pair> {
    match kind {
        WorkloadKind::Sequential => sequential(size),
        WorkloadKind::Random => random(size, &mut StdRng::seed_from_u64(seed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_is_ascending() {
        let pairs = sequential(4);
        assert_eq!(
            pairs,
            vec![
                (0, "value_0".to_string()),
                (1, "value_1".to_string()),
                (2, "value_2".to_string()),
                (3, "value_3".to_string()),
            ]
        );
    }

    #[test]
    fn random_is_a_permutation() {
        let mut pairs = generate(WorkloadKind::Random, 500, 7);
        assert_eq!(pairs.len(), 500);
        pairs.sort();
        assert_eq!(pairs, sequential(500));
    }

    #[test]
    fn same_seed_same_order() {
        assert_eq!(
            generate(WorkloadKind::Random, 100, 42),
            generate(WorkloadKind::Random, 100, 42)
        );
    }
}
