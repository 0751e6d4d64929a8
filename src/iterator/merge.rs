use std::cmp::Ordering;
use std::iter::Peekable;

/// Merges two sorted runs of unique keys into one sorted run.
///
/// `older` and `newer` are each ascending with no duplicate keys. When both
/// hold the same key, the entry from `newer` is yielded and the `older` one is
/// dropped, which is how overwrites are resolved on compaction. Chaining
/// merges left to right (oldest first) therefore keeps the newest copy of
/// every key.
///
/// This is the two-way step of an external merge sort.
pub struct MergeIter<A: Iterator, B: Iterator> {
    older: Peekable<A>,
    newer: Peekable<B>,
}

impl<K, V, A, B> MergeIter<A, B>
where
    K: Ord,
    A: Iterator<Item = (K, V)>,
    B: Iterator<Item = (K, V)>,
{
    pub fn new(older: A, newer: B) -> Self {
        MergeIter {
            older: older.peekable(),
            newer: newer.peekable(),
        }
    }
}

impl<K, V, A, B> Iterator for MergeIter<A, B>
where
    K: Ord,
    A: Iterator<Item = (K, V)>,
    B: Iterator<Item = (K, V)>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let order = match (self.older.peek(), self.newer.peek()) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((a, _)), Some((b, _))) => a.cmp(b),
        };
        match order {
            Ordering::Less => self.older.next(),
            Ordering::Greater => self.newer.next(),
            Ordering::Equal => {
                self.older.next();
                self.newer.next()
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (older_lo, older_hi) = self.older.size_hint();
        let (newer_lo, newer_hi) = self.newer.size_hint();
        let upper = older_hi.zip(newer_hi).map(|(a, b)| a + b);
        (older_lo.max(newer_lo), upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_wins_on_equal_keys() {
        let older = vec![(1, "a1"), (2, "a2"), (4, "a4")];
        let newer = vec![(2, "b2"), (3, "b3"), (4, "b4"), (5, "b5")];
        let merged: Vec<_> = MergeIter::new(older.into_iter(), newer.into_iter()).collect();
        assert_eq!(
            merged,
            vec![(1, "a1"), (2, "b2"), (3, "b3"), (4, "b4"), (5, "b5")]
        );
    }

    #[test]
    fn either_side_empty() {
        let empty: Vec<(u8, u8)> = Vec::new();
        let run = vec![(1u8, 1u8), (2, 2)];
        let left: Vec<_> = MergeIter::new(run.clone().into_iter(), empty.clone().into_iter()).collect();
        let right: Vec<_> = MergeIter::new(empty.into_iter(), run.clone().into_iter()).collect();
        assert_eq!(left, run);
        assert_eq!(right, run);
    }
}
