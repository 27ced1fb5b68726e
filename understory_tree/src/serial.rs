// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested record form of a tree.
//!
//! Each record carries a string `id`, an optional `children` array of the same shape,
//! and any number of other fields. The other fields are flattened into the node's
//! payload `V`; `id` and `children` are reserved and never reach it.
//!
//! ```rust
//! use serde_json::{Map, Value};
//! use understory_tree::Tree;
//!
//! let tree: Tree<Map<String, Value>> = Tree::from_json_str(
//!     r#"[{"id": "root", "name": "Root", "children": [{"id": "c1", "name": "Child"}]}]"#,
//! )
//! .unwrap();
//!
//! let root = tree.find("root").unwrap();
//! let payload = tree.value_of(root).unwrap();
//! assert_eq!(payload.get("name"), Some(&Value::from("Root")));
//! assert!(!payload.contains_key("children"));
//! assert_eq!(tree.children_of(root).len(), 1);
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::tree::Tree;
use crate::types::NodeId;

/// One record of the nested serialized form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedNode<V> {
    /// The node's key.
    pub id: String,
    /// Child records. Absent and empty are kept apart; a missing field reads as `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SerializedNode<V>>>,
    /// Every other field of the record.
    #[serde(flatten)]
    pub value: V,
}

impl<V> Tree<V> {
    /// Build a tree from nested records.
    ///
    /// The records become the roots. Every level of children is linked with
    /// [`Tree::link_siblings`] as it is built, and every child gets its parent link.
    pub fn from_records(records: Vec<SerializedNode<V>>) -> Self {
        let mut tree = Self::new();
        tree.build_level(None, records);
        tree
    }

    /// Parse a JSON array of records and build a tree from it.
    pub fn from_json_str(json: &str) -> Result<Self, TreeError>
    where
        V: DeserializeOwned,
    {
        let records: Vec<SerializedNode<V>> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Rebuild the nested record form of the whole forest.
    pub fn to_records(&self) -> Vec<SerializedNode<V>>
    where
        V: Clone,
    {
        self.roots().iter().map(|&id| self.to_record(id)).collect()
    }

    fn to_record(&self, id: NodeId) -> SerializedNode<V>
    where
        V: Clone,
    {
        let node = self.node(id);
        SerializedNode {
            id: node.key.clone(),
            children: node
                .declared_children()
                .map(|c| c.iter().map(|&child| self.to_record(child)).collect()),
            value: node.value.clone(),
        }
    }

    fn build_level(&mut self, parent: Option<NodeId>, records: Vec<SerializedNode<V>>) {
        let mut ids = Vec::with_capacity(records.len());
        let mut nested = Vec::with_capacity(records.len());
        for record in records {
            let id = self.alloc(parent, record.id, record.value);
            ids.push(id);
            nested.push((id, record.children));
        }
        self.link_siblings(&ids);
        self.set_children(parent, ids);
        for (id, children) in nested {
            if let Some(children) = children {
                self.build_level(Some(id), children);
            }
        }
    }
}
