/// Index of a node in the tree's arena.
///
/// Children and parents refer to each other through ids, never through
/// references, so the parent back-link does not create an ownership cycle.
pub type NodeId = usize;

/// Leaf payload: sorted keys, one value per key, and the forward link.
///
/// Duplicate keys are allowed here; the newest copy sits in front of older
/// ones because inserts go to the first position whose key is not less.
#[derive(Debug, Clone)]
pub(crate) struct LeafNode<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) next: Option<NodeId>,
}

impl<K: Ord, V> LeafNode<K, V> {
    pub(crate) fn new() -> Self {
        LeafNode {
            keys: Vec::new(),
            values: Vec::new(),
            next: None,
        }
    }

    /// Sorted insert. Equal keys are not merged.
    pub(crate) fn insert(&mut self, key: K, value: V) {
        let pos = self.keys.partition_point(|k| *k < key);
        self.keys.insert(pos, key);
        self.values.insert(pos, value);
    }

    /// First entry whose key equals `key`.
    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|i| &self.values[i])
    }

    /// Move `[mid..]` into a new leaf that takes over this leaf's forward link.
    pub(crate) fn split_off(&mut self, mid: usize) -> LeafNode<K, V> {
        LeafNode {
            keys: self.keys.split_off(mid),
            values: self.values.split_off(mid),
            next: self.next.take(),
        }
    }
}

/// Internal payload: `children.len() == keys.len() + 1`.
///
/// `keys[i]` is the lower bound of `children[i + 1]`.
#[derive(Debug, Clone)]
pub(crate) struct InternalNode<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<NodeId>,
}

impl<K: Ord> InternalNode<K> {
    /// Child to descend into: advance past every key `<= key`.
    pub(crate) fn route(&self, key: &K) -> NodeId {
        let idx = self.keys.partition_point(|k| k <= key);
        self.children[idx]
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeBody<K, V> {
    Leaf(LeafNode<K, V>),
    Internal(InternalNode<K>),
}

/// Arena slot: the payload plus a non-owning link to the parent.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) body: NodeBody<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(parent: Option<NodeId>, leaf: LeafNode<K, V>) -> Self {
        Node {
            parent,
            body: NodeBody::Leaf(leaf),
        }
    }

    pub(crate) fn internal(parent: Option<NodeId>, internal: InternalNode<K>) -> Self {
        Node {
            parent,
            body: NodeBody::Internal(internal),
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        match &self.body {
            NodeBody::Leaf(leaf) => leaf.keys.len(),
            NodeBody::Internal(internal) => internal.keys.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_insert_keeps_keys_sorted() {
        let mut leaf = LeafNode::new();
        for k in [5, 1, 9, 3] {
            leaf.insert(k, k * 10);
        }
        assert_eq!(leaf.keys, vec![1, 3, 5, 9]);
        assert_eq!(leaf.values, vec![10, 30, 50, 90]);
    }

    #[test]
    fn leaf_duplicate_goes_in_front() {
        let mut leaf = LeafNode::new();
        leaf.insert(4, "old");
        leaf.insert(4, "new");
        assert_eq!(leaf.keys, vec![4, 4]);
        assert_eq!(leaf.get(&4), Some(&"new"));
    }

    #[test]
    fn route_sends_equal_keys_right() {
        let node = InternalNode {
            keys: vec![10, 20],
            children: vec![0, 1, 2],
        };
        assert_eq!(node.route(&5), 0);
        assert_eq!(node.route(&10), 1);
        assert_eq!(node.route(&19), 1);
        assert_eq!(node.route(&20), 2);
        assert_eq!(node.route(&99), 2);
    }

    #[test]
    fn split_off_hands_over_forward_link() {
        let mut leaf = LeafNode::new();
        for k in 1..=4 {
            leaf.insert(k, ());
        }
        leaf.next = Some(7);
        let right = leaf.split_off(2);
        assert_eq!(leaf.keys, vec![1, 2]);
        assert_eq!(right.keys, vec![3, 4]);
        assert_eq!(leaf.next, None);
        assert_eq!(right.next, Some(7));
    }
}
