// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, sibling links, queries.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::traverse::{Bfs, Dfs};
use crate::types::{NodeId, TreeNode};

/// An arena of sibling-linked nodes.
///
/// The tree owns all of its nodes. Each node records its parent and its immediate
/// left and right siblings as [`NodeId`] handles, so navigation never needs a second
/// owner and never forms reference cycles. Root nodes form a sibling list of their
/// own.
///
/// Nodes are only ever added. Once built, the topology is fixed; callers may still
/// edit payloads through [`Tree::value_mut`].
///
/// ## Example
///
/// ```rust
/// use understory_tree::Tree;
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None, "root", "Root");
/// let a = tree.insert(Some(root), "a", "A");
/// let b = tree.insert(Some(root), "b", "B");
///
/// assert_eq!(tree.children_of(root), &[a, b]);
/// assert_eq!(tree.right_of(a), Some(b));
/// assert_eq!(tree.left_of(b), Some(a));
/// assert_eq!(tree.find("b"), Some(b));
/// ```
#[derive(Clone)]
pub struct Tree<V> {
    nodes: Vec<TreeNode<V>>,
    roots: Vec<NodeId>,
    /// First node registered under each key.
    by_key: HashMap<String, NodeId>,
}

impl<V> core::fmt::Debug for Tree<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree")
            .field("nodes_total", &self.nodes.len())
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Tree<V> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes, in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Insert a new node as the last child of `parent` (or as the last root if `None`).
    ///
    /// Sibling links of the new node and of its previous last sibling are updated, so
    /// the linking invariant holds after every insert.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this tree.
    pub fn insert(&mut self, parent: Option<NodeId>, key: impl Into<String>, value: V) -> NodeId {
        let id = self.alloc(parent, key.into(), value);
        let previous = match parent {
            Some(p) => {
                let siblings = self.node_mut(p).children.get_or_insert_with(Vec::new);
                let previous = siblings.last().copied();
                siblings.push(id);
                previous
            }
            None => {
                let previous = self.roots.last().copied();
                self.roots.push(id);
                previous
            }
        };
        if let Some(previous) = previous {
            self.node_mut(previous).right = Some(id);
            self.node_mut(id).left = Some(previous);
        }
        id
    }

    /// Give `id` an empty children list if it has none.
    ///
    /// This distinguishes "declared, but empty" from "no children list" for callers
    /// that care; traversal and navigation treat both as a leaf.
    pub fn declare_children(&mut self, id: NodeId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.children.get_or_insert_with(Vec::new);
        }
    }

    /// Returns true if `id` was issued by this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Access a node, or `None` if `id` was not issued by this tree.
    pub fn get(&self, id: NodeId) -> Option<&TreeNode<V>> {
        self.nodes.get(id.idx())
    }

    /// Look up a node by its string key.
    ///
    /// Keys are expected to be unique; if they are not, the first node inserted
    /// under the key wins.
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    /// Returns the key of a node.
    pub fn key_of(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(TreeNode::key)
    }

    /// Returns the payload of a node.
    pub fn value_of(&self, id: NodeId) -> Option<&V> {
        self.get(id).map(TreeNode::value)
    }

    /// Mutable access to the payload of a node. Topology cannot be changed this way.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.node_opt_mut(id).map(|n| &mut n.value)
    }

    /// Returns the parent of a node, or `None` for roots and foreign ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(TreeNode::parent)
    }

    /// Returns the left sibling of a node.
    pub fn left_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(TreeNode::left)
    }

    /// Returns the right sibling of a node.
    pub fn right_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(TreeNode::right)
    }

    /// Get the children of a node, or an empty slice for leaves and foreign ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(TreeNode::children).unwrap_or(&[])
    }

    /// First child of a node.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children_of(id).first().copied()
    }

    /// Last child of a node.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children_of(id).last().copied()
    }

    /// Number of ancestors of a node (0 for roots).
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        let mut node = self.get(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            depth += 1;
            node = self.node(parent);
        }
        Some(depth)
    }

    /// Set the `left`/`right` links of `ids` from their order in the slice.
    ///
    /// The first node loses its left link and the last node loses its right link.
    /// Returns `ids` unchanged. Only meaningful for a complete sibling list (all
    /// children of one parent, or all roots).
    ///
    /// # Panics
    ///
    /// Panics if any id was not issued by this tree.
    pub fn link_siblings<'a>(&mut self, ids: &'a [NodeId]) -> &'a [NodeId] {
        for (i, &id) in ids.iter().enumerate() {
            let left = i.checked_sub(1).map(|l| ids[l]);
            let right = ids.get(i + 1).copied();
            let node = self.node_mut(id);
            node.left = left;
            node.right = right;
        }
        ids
    }

    /// Recompute the sibling links of `parent`'s children (or of the roots).
    pub fn relink_children(&mut self, parent: Option<NodeId>) {
        let ids = match parent {
            Some(p) => self.children_of(p).to_vec(),
            None => self.roots.clone(),
        };
        self.link_siblings(&ids);
    }

    /// Iterate over the subtrees of `start` breadth-first.
    ///
    /// Pass [`Tree::roots`] to walk the whole forest.
    pub fn bfs<'a>(&'a self, start: &[NodeId]) -> impl Iterator<Item = NodeId> + use<'a, V> {
        Bfs::new(start.to_vec(), move |&id: &NodeId| {
            Some(self.children_of(id).iter().copied())
        })
    }

    /// Iterate over the subtrees of `start` depth-first, in pre-order.
    pub fn dfs<'a>(&'a self, start: &[NodeId]) -> impl Iterator<Item = NodeId> + use<'a, V> {
        Dfs::new(start.to_vec(), move |&id: &NodeId| {
            Some(self.children_of(id).iter().copied())
        })
    }

    /// Access a node; panics if `id` is foreign to this tree.
    pub(crate) fn node(&self, id: NodeId) -> &TreeNode<V> {
        self.nodes.get(id.idx()).expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode<V> {
        self.nodes.get_mut(id.idx()).expect("dangling NodeId")
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<V>> {
        self.nodes.get_mut(id.idx())
    }

    /// Allocate a node without attaching it to a sibling list.
    pub(crate) fn alloc(&mut self, parent: Option<NodeId>, key: String, value: V) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        if self.by_key.contains_key(&key) {
            log::debug!("duplicate node key {key:?}; lookups keep the first node");
        } else {
            self.by_key.insert(key.clone(), id);
        }
        self.nodes.push(TreeNode::new(key, value, parent));
        id
    }

    /// Install an already-allocated child list, without linking.
    pub(crate) fn set_children(&mut self, parent: Option<NodeId>, children: Vec<NodeId>) {
        match parent {
            Some(p) => self.node_mut(p).children = Some(children),
            None => self.roots = children,
        }
    }
}
