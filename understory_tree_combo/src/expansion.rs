// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation-side expansion state.

use hashbrown::HashMap;
use understory_tree::{NodeId, Tree};

/// Visual expansion state of a rendered tree row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expansion {
    /// The row has no toggle (no children to show).
    NotExpandable,
    /// The row has a toggle and its children are hidden.
    Collapsed,
    /// The row has a toggle and its children are shown.
    Expanded,
}

impl Expansion {
    /// Returns `true` for [`Expansion::Expanded`].
    pub fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }
}

/// Read/write access to the expansion state owned by the presentation layer.
///
/// The navigator never infers expansion from the data model: a node with children
/// may well be collapsed on screen. Implementations answer `None` when there is no
/// rendered row for the node at all, which the navigator treats as a broken
/// invariant between the data and the presentation.
pub trait ExpansionView {
    /// Current state of the row for `node`, or `None` if no row exists.
    fn expansion(&self, node: NodeId) -> Option<Expansion>;

    /// Show or hide the children of `node`.
    ///
    /// Only called for rows that reported [`Expansion::Collapsed`] or
    /// [`Expansion::Expanded`].
    fn set_expanded(&mut self, node: NodeId, expanded: bool);
}

/// An in-memory [`ExpansionView`].
///
/// [`ExpansionMap::from_tree`] mirrors how a tree is first rendered: every node gets a
/// row, rows with children get a toggle, and every toggle starts collapsed.
#[derive(Clone, Debug, Default)]
pub struct ExpansionMap {
    rows: HashMap<NodeId, Expansion>,
}

impl ExpansionMap {
    /// Create an empty map (no rows).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create rows for every node of `tree`, all collapsed.
    pub fn from_tree<V>(tree: &Tree<V>) -> Self {
        let rows = tree
            .bfs(tree.roots())
            .map(|id| {
                let state = if tree.children_of(id).is_empty() {
                    Expansion::NotExpandable
                } else {
                    Expansion::Collapsed
                };
                (id, state)
            })
            .collect();
        Self { rows }
    }

    /// Add or replace the row for `node`.
    pub fn insert(&mut self, node: NodeId, state: Expansion) {
        self.rows.insert(node, state);
    }

    /// Remove the row for `node`.
    pub fn remove(&mut self, node: NodeId) -> Option<Expansion> {
        self.rows.remove(&node)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if `node` has a row and it is expanded.
    pub fn is_expanded(&self, node: NodeId) -> bool {
        self.rows.get(&node).is_some_and(|s| s.is_expanded())
    }
}

impl ExpansionView for ExpansionMap {
    fn expansion(&self, node: NodeId) -> Option<Expansion> {
        self.rows.get(&node).copied()
    }

    fn set_expanded(&mut self, node: NodeId, expanded: bool) {
        match self.rows.get_mut(&node) {
            Some(state @ (Expansion::Collapsed | Expansion::Expanded)) => {
                *state = if expanded {
                    Expansion::Expanded
                } else {
                    Expansion::Collapsed
                };
            }
            Some(Expansion::NotExpandable) | None => {
                log::debug!("ignoring expansion change for {node:?}: no toggle");
            }
        }
    }
}
