use tracing::{debug, trace};

use super::BPlusTree;
use super::node::{InternalNode, Node, NodeId};
use crate::stats::IoCost;

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Split an overflowing leaf at `len / 2`.
    ///
    /// The lower half stays put, the upper half moves to a new right sibling
    /// spliced into the leaf chain. Both leaves are written, and the right
    /// leaf's first key is promoted into the parent.
    pub(super) fn split_leaf(&mut self, leaf_id: NodeId, cost: &mut IoCost) {
        let parent = self.nodes[leaf_id].parent;
        let leaf = self.leaf_mut(leaf_id);
        let mid = leaf.keys.len() / 2;
        let right = leaf.split_off(mid);
        let separator = right.keys[0].clone();

        let right_id = self.alloc(Node::leaf(parent, right));
        self.leaf_mut(leaf_id).next = Some(right_id);
        cost.write();
        cost.write();
        self.stats.splits += 1;
        trace!(left = leaf_id, right = right_id, mid, "split leaf");

        self.insert_into_parent(leaf_id, separator, right_id, cost);
    }

    /// Hook `right` into the tree next to `left`, separated by `key`.
    ///
    /// Without a parent, `left` was the root: a new root is created with the
    /// single key and both children. Otherwise the parent is read, takes the
    /// key and the new child right after `left`, is written, and splits in
    /// turn if it overflows.
    fn insert_into_parent(&mut self, left: NodeId, key: K, right: NodeId, cost: &mut IoCost) {
        let Some(parent_id) = self.nodes[left].parent else {
            let root = self.alloc(Node::internal(
                None,
                InternalNode {
                    keys: vec![key],
                    children: vec![left, right],
                },
            ));
            self.nodes[left].parent = Some(root);
            self.nodes[right].parent = Some(root);
            self.root = root;
            cost.write();
            debug!(root, height = self.height(), "b+tree grew a new root");
            return;
        };

        cost.read();
        let max_keys = self.config.max_keys();
        let parent = self.internal_mut(parent_id);
        let Some(idx) = parent.children.iter().position(|&c| c == left) else {
            unreachable!("node {left} is missing from its parent {parent_id}");
        };
        parent.keys.insert(idx, key);
        parent.children.insert(idx + 1, right);
        let overflow = parent.keys.len() > max_keys;
        self.nodes[right].parent = Some(parent_id);
        cost.write();

        if overflow {
            self.split_internal(parent_id, cost);
        }
    }

    /// Split an overflowing internal node at `len / 2`.
    ///
    /// ```text
    ///   keys:      k0 .. k(mid-1) | k(mid) | k(mid+1) ..
    ///   children:  c0 .. c(mid)          | c(mid+1) ..
    ///              └── stays ──┘  promoted └── moves ──┘
    /// ```
    ///
    /// The middle key is not kept in either half. Children that move get
    /// their parent link rewritten to the new node.
    fn split_internal(&mut self, node_id: NodeId, cost: &mut IoCost) {
        let parent = self.nodes[node_id].parent;
        let node = self.internal_mut(node_id);
        let mid = node.keys.len() / 2;
        let mut right_keys = node.keys.split_off(mid);
        let separator = right_keys.remove(0);
        let right_children = node.children.split_off(mid + 1);

        let right_id = self.nodes.len();
        for &child in &right_children {
            self.nodes[child].parent = Some(right_id);
        }
        self.alloc(Node::internal(
            parent,
            InternalNode {
                keys: right_keys,
                children: right_children,
            },
        ));
        cost.write();
        cost.write();
        self.stats.splits += 1;
        trace!(left = node_id, right = right_id, mid, "split internal node");

        self.insert_into_parent(node_id, separator, right_id, cost);
    }
}
