//! Pluggable equality, hashing, and snapshotting for tracked property
//! values.
//!
//! Identity comparison cannot detect in-place mutation of a collection
//! property, so the persistence boundary compares a snapshot taken at
//! load/save time against the current in-memory value through one of these
//! strategies.

use std::hash::{DefaultHasher, Hash, Hasher};

pub struct ValueComparer<M> {
    equals: Box<dyn Fn(&M, &M) -> bool>,
    hash: Box<dyn Fn(&M) -> u64>,
    snapshot: Box<dyn Fn(&M) -> M>,
}

impl<M> ValueComparer<M> {
    pub fn new(
        equals: impl Fn(&M, &M) -> bool + 'static,
        hash: impl Fn(&M) -> u64 + 'static,
        snapshot: impl Fn(&M) -> M + 'static,
    ) -> Self {
        Self {
            equals: Box::new(equals),
            hash: Box::new(hash),
            snapshot: Box::new(snapshot),
        }
    }

    /// Default strategy: the type's own structural equality, hash, and
    /// clone.
    pub fn structural() -> Self
    where
        M: PartialEq + Hash + Clone + 'static,
    {
        Self::new(|a, b| a == b, hash_one, M::clone)
    }

    pub fn equals(&self, a: &M, b: &M) -> bool {
        (self.equals)(a, b)
    }

    pub fn hash(&self, value: &M) -> u64 {
        (self.hash)(value)
    }

    /// Independent copy of the current value, taken right after a load or
    /// save to serve as the baseline for the next change check.
    pub fn snapshot(&self, value: &M) -> M {
        (self.snapshot)(value)
    }

    /// Hash first as a cheap probable-inequality check; equal hashes are
    /// confirmed element-by-element.
    pub fn changed(&self, baseline: &M, current: &M) -> bool {
        self.hash(baseline) != self.hash(current) || !self.equals(baseline, current)
    }
}

impl<T> ValueComparer<Vec<T>>
where
    T: PartialEq + Hash + Clone + 'static,
{
    /// Strategy for mutable sequences: same length and element-wise equal
    /// values in the same order, an order-sensitive combined hash, and a
    /// deep copy snapshot.
    pub fn sequence() -> Self {
        Self::new(
            |a, b| a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y),
            |v| {
                let mut hasher = DefaultHasher::new();
                for item in v {
                    item.hash(&mut hasher);
                }
                hasher.finish()
            },
            Vec::clone,
        )
    }
}

fn hash_one<M: Hash>(value: &M) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_equality() {
        let comparer = ValueComparer::<Vec<i64>>::sequence();
        assert!(comparer.equals(&vec![1, 2, 3], &vec![1, 2, 3]));
        assert!(!comparer.equals(&vec![1, 2, 3], &vec![1, 2, 4]));
        assert!(!comparer.equals(&vec![1, 2, 3], &vec![1, 2]));
        assert!(!comparer.equals(&vec![1, 2, 3], &vec![3, 2, 1]));
    }

    #[test]
    fn test_sequence_hash_stable_for_equal_values() {
        let comparer = ValueComparer::<Vec<i64>>::sequence();
        assert_eq!(comparer.hash(&vec![1, 2, 3]), comparer.hash(&vec![1, 2, 3]));
        assert_ne!(comparer.hash(&vec![1, 2, 3]), comparer.hash(&vec![1, 2, 4]));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let comparer = ValueComparer::<Vec<i64>>::sequence();
        let mut current = vec![1, 2, 3];
        let baseline = comparer.snapshot(&current);
        current.push(4);
        assert!(comparer.changed(&baseline, &current));
        assert_eq!(baseline, vec![1, 2, 3]);
    }

    #[test]
    fn test_structural_change_detection() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        struct Code(i64);

        let comparer = ValueComparer::<Code>::structural();
        assert!(!comparer.changed(&Code(7), &Code(7)));
        assert!(comparer.changed(&Code(7), &Code(77)));
    }
}
