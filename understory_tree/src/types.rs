// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree: node identifiers and per-node data.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a node in a [`Tree`](crate::Tree).
///
/// A `NodeId` is an index into the tree's arena. Trees never remove nodes, so an
/// identifier stays valid for the lifetime of the tree that issued it. Identifiers
/// are not meaningful across trees.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A node stored in a [`Tree`](crate::Tree).
///
/// The tree owns every node; `parent`, `left` and `right` are navigational
/// handles only. `left` and `right` are derived from the parent's children order
/// (or the root order) by [`Tree::link_siblings`](crate::Tree::link_siblings) and
/// are never edited by hand.
#[derive(Clone, Debug)]
pub struct TreeNode<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// `None` when the node never declared a children list.
    pub(crate) children: Option<Vec<NodeId>>,
}

impl<V> TreeNode<V> {
    pub(crate) fn new(key: String, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
            children: None,
        }
    }

    /// The node's string id, used by renderers as a lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The caller-defined payload.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Parent of this node, or `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Previous sibling at the same level.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Next sibling at the same level.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Children in order; empty when the node has none.
    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Children as declared: `None` if the node has no children list at all,
    /// `Some(&[])` if it declared an empty one.
    pub fn declared_children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    /// Returns `true` if the node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}
