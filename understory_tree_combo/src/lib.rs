// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tree Combo: keyboard focus for tree comboboxes.
//!
//! A tree combobox is a text input with a popup that shows a partially expanded tree.
//! The keyboard moves a single focus through the rows that are currently visible.
//!
//! - [`FocusNavigator`] is the state machine: it holds the focused [`NodeId`] and
//!   applies [`TreeNavigation`] commands against an [`understory_tree::Tree`].
//! - [`ExpansionView`] is how the navigator asks the renderer whether a row is
//!   expanded. [`ExpansionMap`] is an in-memory implementation.
//! - [`TreeCombo`] wires a [`TreeSource`] and a navigator to key presses, and tracks
//!   whether the popup is open.
//!
//! ## Expansion is presentation state
//!
//! The data model only knows which nodes have children. Whether those children are
//! shown is up to the renderer, so the navigator always reads it through
//! [`ExpansionView`] and never caches it. A row that should exist but does not is a
//! broken invariant between the two layers and surfaces as a [`NavigationError`].
//!
//! ## Moving up
//!
//! Moving down only follows links: first child of an expanded node, else the right
//! sibling, else the parent's right sibling. Moving up has to find what is drawn
//! above, which may be deep inside an expanded sibling. The navigator does this with
//! a lazy reverse depth-first walk over expanded nodes that stops at the first
//! match. [`Backtrack`] selects between the two supported target rules.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::{Map, Value};
//! use understory_tree::Tree;
//! use understory_tree_combo::{ComboEvent, Key, TreeCombo};
//!
//! let source = |_query: &str| -> Tree<Map<String, Value>> {
//!     Tree::from_json_str(
//!         r#"[{"id": "docs", "name": "Docs", "children": [{"id": "intro", "name": "Intro"}]},
//!             {"id": "api", "name": "API"}]"#,
//!     )
//!     .unwrap()
//! };
//!
//! let mut combo = TreeCombo::new(source);
//! combo.handle_key(Key::ArrowDown).unwrap(); // open
//! assert_eq!(combo.focused_key(), Some("docs"));
//!
//! combo.handle_key(Key::ArrowRight).unwrap(); // expand "docs"
//! combo.handle_key(Key::ArrowDown).unwrap();
//! assert_eq!(combo.focused_key(), Some("intro"));
//!
//! let out = combo.handle_key(Key::Enter).unwrap();
//! let ComboEvent::Selected(node) = out.event else { panic!("nothing selected") };
//! assert_eq!(combo.items().value_of(node).unwrap()["name"], "Intro");
//! assert!(!combo.is_open());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod combo;
mod error;
mod expansion;
mod navigator;

pub use combo::{ComboEvent, Key, KeyOutcome, TreeCombo, TreeSource};
pub use error::NavigationError;
pub use expansion::{Expansion, ExpansionMap, ExpansionView};
pub use navigator::{
    Backtrack, FocusNavigator, NavOutcome, NavigatorConfig, TreeNavigation, WrapMode,
};

pub use understory_tree::NodeId;
