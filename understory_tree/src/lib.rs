// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tree: sibling-linked arena trees, generic traversal, and structural diffing.
//!
//! Understory Tree is the data layer under hierarchical widgets such as tree views and
//! tree comboboxes.
//!
//! - Stores a forest of keyed nodes with parent, left-sibling and right-sibling links.
//! - Walks any hierarchy breadth-first or depth-first, eagerly or lazily.
//! - Compares two trees and reports where they first diverge.
//!
//! ## Nodes and links
//!
//! A [`Tree`] is an arena. Nodes are addressed by [`NodeId`] and own nothing but
//! their payload and child list. `parent`, `left` and `right` are plain handles,
//! so there is no shared ownership and no cycle to break. Sibling links are derived
//! data: [`Tree::insert`] keeps them current, and [`Tree::link_siblings`] recomputes
//! them for a whole level.
//!
//! Every node also carries a string key (the `id` of the serialized form) that
//! renderers use to address it; [`Tree::find`] maps a key back to a [`NodeId`].
//!
//! ## Traversal
//!
//! The [`traverse`] module is independent of [`Tree`]: it takes a children accessor
//! closure and works over any node type. [`Tree::bfs`] and [`Tree::dfs`] are thin
//! wrappers that supply the accessor for a tree.
//!
//! ## Diffing
//!
//! The [`diff`] module compares node pairs breadth-first and never descends below a
//! divergence. Payload equality is always supplied by the caller.
//!
//! ## Serialized form
//!
//! [`SerializedNode`] is the nested record form (`id`, optional `children`, and
//! flattened payload fields). [`Tree::from_json_str`] and [`Tree::from_records`]
//! build a linked tree from it.
//!
//! ## API overview
//!
//! - [`Tree::insert`] → [`NodeId`]
//! - [`Tree::parent_of`] / [`Tree::left_of`] / [`Tree::right_of`] / [`Tree::children_of`]
//! - [`Tree::link_siblings`] / [`Tree::relink_children`]
//! - [`traverse::bfs`] / [`traverse::dfs`] / [`traverse::Bfs`] / [`traverse::Dfs`]
//! - [`diff::diff`] / [`diff::diff_forests`] / [`diff::divergences`] / [`diff::find_top_level_diff`]
//!
//! ```rust
//! use understory_tree::{Tree, diff::find_top_level_diff};
//!
//! let old: Tree<serde_json::Map<String, serde_json::Value>> = Tree::from_json_str(
//!     r#"[{"id": "root", "name": "root", "children": [{"id": "c1", "name": "child1"}]}]"#,
//! )
//! .unwrap();
//! let new = Tree::from_json_str(
//!     r#"[{"id": "root", "name": "root", "children": [
//!         {"id": "c1", "name": "child1", "children": [{"id": "g1", "name": "grandchild1"}]}
//!     ]}]"#,
//! )
//! .unwrap();
//!
//! // `c1` is a leaf in the old tree, so growth beneath it is not a top-level change.
//! assert_eq!(find_top_level_diff(&old, &new), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod diff;
mod error;
mod serial;
pub mod traverse;
mod tree;
mod types;

pub use error::TreeError;
pub use serial::SerializedNode;
pub use tree::Tree;
pub use types::{NodeId, TreeNode};
