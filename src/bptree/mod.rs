//! In-memory B+Tree with logical I/O accounting.
//!
//! ```text
//!                 [ 5 ]                      internal: keys[i] is the lower
//!               /       \                    bound of children[i + 1]
//!        [1 | 3]  ───►  [5 | 7 | 9]  ───► ∅  leaves: sorted, linked forward
//! ```
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by
//! [`NodeId`]. The parent link lets a split walk upward without a second
//! descent from the root.
//!
//! Cost model: every node visited costs one read, every node created or
//! modified costs one write. Each public call starts from zero and reports
//! only its own cost.

mod node;
mod split;

pub use node::NodeId;

use node::{InternalNode, LeafNode, Node, NodeBody};
use tracing::debug;

use crate::config::BPlusTreeConfig;
use crate::error::{Error, Result};
use crate::stats::{IoCost, IoStats};
use crate::types::{Lookup, RangeScan};

/// A B+Tree index that counts the node reads and writes of each operation.
///
/// Growth happens only through splits; there is no delete and no rebalancing,
/// so the only occupancy guarantee is the upper bound of `order - 1` keys per
/// node.
#[derive(Debug, Clone)]
pub struct BPlusTree<K, V> {
    config: BPlusTreeConfig,
    nodes: Vec<Node<K, V>>,
    root: NodeId,
    len: usize,
    stats: IoStats,
}

impl<K: Ord + Clone, V: Clone> BPlusTree<K, V> {
    /// Create an empty tree. Fails if `order < 3`.
    pub fn new(order: usize) -> Result<Self> {
        Self::with_config(BPlusTreeConfig::new(order))
    }

    pub fn with_config(config: BPlusTreeConfig) -> Result<Self> {
        config.validate()?;
        debug!(order = config.order, "creating b+tree");
        Ok(BPlusTree {
            config,
            nodes: vec![Node::leaf(None, LeafNode::new())],
            root: 0,
            len: 0,
            stats: IoStats::default(),
        })
    }

    /// Point lookup.
    ///
    /// Algorithm:
    ///   1. Descend from the root, one read per internal node
    ///   2. Read the leaf (one more unit)
    ///   3. Scan it for the first exact match
    pub fn search(&self, key: &K) -> Lookup<V> {
        let mut cost = IoCost::default();
        let leaf_id = self.find_leaf(key, &mut cost);
        cost.read();
        match self.leaf(leaf_id).get(key) {
            Some(value) => Lookup::found(value.clone(), cost.reads),
            None => Lookup::missing(cost.reads),
        }
    }

    /// Insert a key-value pair and return the number of node writes.
    ///
    /// The descent reads are recorded in [`IoStats`] but are not part of the
    /// returned count. Inserting an existing key stores a second entry rather
    /// than replacing the first.
    pub fn insert(&mut self, key: K, value: V) -> u64 {
        let mut cost = IoCost::default();
        let leaf_id = self.find_leaf(&key, &mut cost);
        let max_keys = self.config.max_keys();

        let leaf = self.leaf_mut(leaf_id);
        leaf.insert(key, value);
        let overflow = leaf.keys.len() > max_keys;
        cost.write();
        self.len += 1;

        if overflow {
            self.split_leaf(leaf_id, &mut cost);
        }

        self.stats.inserts += 1;
        self.stats.charge(cost);
        cost.writes
    }

    /// Inclusive range scan over `[low, high]`.
    ///
    /// Finds the leaf that would hold `low`, then follows the leaf chain,
    /// reading one unit per leaf, until a key greater than `high` shows up.
    pub fn range_query(&self, low: &K, high: &K) -> RangeScan<K, V> {
        let mut cost = IoCost::default();
        let mut entries = Vec::new();
        let mut current = Some(self.find_leaf(low, &mut cost));

        while let Some(id) = current {
            cost.read();
            let leaf = self.leaf(id);
            for (key, value) in leaf.keys.iter().zip(&leaf.values) {
                if key > high {
                    return RangeScan {
                        entries,
                        reads: cost.reads,
                    };
                }
                if key >= low {
                    entries.push((key.clone(), value.clone()));
                }
            }
            current = leaf.next;
        }

        RangeScan {
            entries,
            reads: cost.reads,
        }
    }
}

impl<K: Ord, V> BPlusTree<K, V> {
    pub fn order(&self) -> usize {
        self.config.order
    }

    pub fn config(&self) -> &BPlusTreeConfig {
        &self.config
    }

    /// Stored entries, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, counting the leaf level. An empty tree has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut id = self.root;
        while let NodeBody::Internal(internal) = &self.nodes[id].body {
            id = internal.children[0];
            height += 1;
        }
        height
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn stats(&self) -> &IoStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = IoStats::default();
    }

    /// Walk the leaf chain in key order. Charges no I/O.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut id = self.root;
        while let NodeBody::Internal(internal) = &self.nodes[id].body {
            id = internal.children[0];
        }
        Iter {
            tree: self,
            leaf: Some(id),
            pos: 0,
        }
    }

    /// Verify the structural invariants of the tree.
    ///
    /// Checks node capacity, key order, separator bounds, parent links,
    /// uniform leaf depth, and that the leaf chain visits every leaf in order.
    pub fn check_invariants(&self) -> Result<()> {
        if self.nodes[self.root].parent.is_some() {
            return Err(Error::Invariant(format!(
                "root {} has a parent",
                self.root
            )));
        }

        let mut walk = Walk {
            leaf_depth: None,
            leaves: Vec::new(),
            entries: 0,
        };
        self.check_node(self.root, 1, None, None, &mut walk)?;

        if walk.entries != self.len {
            return Err(Error::Invariant(format!(
                "leaves hold {} entries, expected {}",
                walk.entries, self.len
            )));
        }

        let mut chain = Vec::with_capacity(walk.leaves.len());
        let mut current = walk.leaves.first().copied();
        while let Some(id) = current {
            if chain.len() > walk.leaves.len() {
                return Err(Error::Invariant("leaf chain does not terminate".into()));
            }
            chain.push(id);
            current = self.leaf(id).next;
        }
        if chain != walk.leaves {
            return Err(Error::Invariant(
                "leaf chain order differs from tree order".into(),
            ));
        }
        Ok(())
    }

    fn check_node(
        &self,
        id: NodeId,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = &self.nodes[id];
        if node.key_count() > self.config.max_keys() {
            return Err(Error::Invariant(format!(
                "node {id} holds {} keys, limit is {}",
                node.key_count(),
                self.config.max_keys()
            )));
        }

        let keys = match &node.body {
            NodeBody::Leaf(leaf) => &leaf.keys,
            NodeBody::Internal(internal) => &internal.keys,
        };
        if keys.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::Invariant(format!("node {id} keys are out of order")));
        }
        let below = lower.is_some_and(|lo| keys.first().is_some_and(|k| k < lo));
        let above = upper.is_some_and(|hi| keys.last().is_some_and(|k| k > hi));
        if below || above {
            return Err(Error::Invariant(format!(
                "node {id} keys fall outside the parent separators"
            )));
        }

        match &node.body {
            NodeBody::Leaf(leaf) => {
                if leaf.keys.len() != leaf.values.len() {
                    return Err(Error::Invariant(format!(
                        "leaf {id} has {} keys but {} values",
                        leaf.keys.len(),
                        leaf.values.len()
                    )));
                }
                match walk.leaf_depth {
                    Some(expected) if expected != depth => {
                        return Err(Error::Invariant(format!(
                            "leaf {id} at depth {depth}, other leaves at depth {expected}"
                        )));
                    }
                    _ => walk.leaf_depth = Some(depth),
                }
                walk.leaves.push(id);
                walk.entries += leaf.keys.len();
            }
            NodeBody::Internal(internal) => {
                if internal.children.len() != internal.keys.len() + 1 {
                    return Err(Error::Invariant(format!(
                        "internal node {id} has {} keys and {} children",
                        internal.keys.len(),
                        internal.children.len()
                    )));
                }
                for (i, &child) in internal.children.iter().enumerate() {
                    if self.nodes[child].parent != Some(id) {
                        return Err(Error::Invariant(format!(
                            "child {child} does not point back to parent {id}"
                        )));
                    }
                    let lo = if i == 0 { lower } else { internal.keys.get(i - 1) };
                    let hi = internal.keys.get(i).or(upper);
                    self.check_node(child, depth + 1, lo, hi, walk)?;
                }
            }
        }
        Ok(())
    }

    /// Descend to the leaf whose range covers `key`, one read per internal node.
    fn find_leaf(&self, key: &K, cost: &mut IoCost) -> NodeId {
        let mut id = self.root;
        while let NodeBody::Internal(internal) = &self.nodes[id].body {
            cost.read();
            id = internal.route(key);
        }
        id
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn leaf(&self, id: NodeId) -> &LeafNode<K, V> {
        match &self.nodes[id].body {
            NodeBody::Leaf(leaf) => leaf,
            NodeBody::Internal(_) => unreachable!("node {id} is not a leaf"),
        }
    }

    fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode<K, V> {
        match &mut self.nodes[id].body {
            NodeBody::Leaf(leaf) => leaf,
            NodeBody::Internal(_) => unreachable!("node {id} is not a leaf"),
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode<K> {
        match &mut self.nodes[id].body {
            NodeBody::Internal(internal) => internal,
            NodeBody::Leaf(_) => unreachable!("node {id} is not an internal node"),
        }
    }
}

struct Walk {
    leaf_depth: Option<usize>,
    leaves: Vec<NodeId>,
    entries: usize,
}

/// Iterator over the leaf chain, in ascending key order.
pub struct Iter<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    leaf: Option<NodeId>,
    pos: usize,
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            let leaf = tree.leaf(self.leaf?);
            if self.pos < leaf.keys.len() {
                let item = (&leaf.keys[self.pos], &leaf.values[self.pos]);
                self.pos += 1;
                return Some(item);
            }
            self.leaf = leaf.next;
            self.pos = 0;
        }
    }
}
