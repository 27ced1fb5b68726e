// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use understory_tree::{NodeId, Tree};

/// A broken invariant between the tree, the presentation layer and the focus state.
///
/// These are not input errors: they mean the renderer and the data model have drifted
/// apart. A command that fails leaves focus and expansion untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// A node reachable as a focus target has no rendered row.
    #[error("no presentation element for tree node {key:?}")]
    MissingPresentation {
        /// Key of the node whose row is missing.
        key: String,
    },
    /// The focused node does not belong to the current tree.
    #[error("focused node {0:?} is not part of the current tree")]
    UnknownNode(NodeId),
}

impl NavigationError {
    pub(crate) fn missing<V>(tree: &Tree<V>, node: NodeId) -> Self {
        Self::MissingPresentation {
            key: String::from(tree.key_of(node).unwrap_or_default()),
        }
    }
}
