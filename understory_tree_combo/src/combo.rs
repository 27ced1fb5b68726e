// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree combobox controller: data source, open state and key handling.

use alloc::string::String;
use core::fmt;

use understory_tree::{NodeId, Tree};

use crate::error::NavigationError;
use crate::expansion::ExpansionMap;
use crate::navigator::{FocusNavigator, NavOutcome, NavigatorConfig, TreeNavigation};

/// Supplies the items shown for a query.
///
/// Any `FnMut(&str) -> Tree<V>` is a source.
pub trait TreeSource<V> {
    /// Build the tree of items matching `query`.
    fn query(&mut self, query: &str) -> Tree<V>;
}

impl<V, F> TreeSource<V> for F
where
    F: FnMut(&str) -> Tree<V>,
{
    fn query(&mut self, query: &str) -> Tree<V> {
        self(query)
    }
}

/// Keys the combobox reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Previous row.
    ArrowUp,
    /// Open, or next row.
    ArrowDown,
    /// Collapse, or go to the parent.
    ArrowLeft,
    /// Expand, or go to the first child.
    ArrowRight,
    /// Select and close.
    Enter,
    /// Close.
    Escape,
}

/// A change in the combobox caused by an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComboEvent {
    /// Nothing happened.
    Ignored,
    /// The popup opened (or re-queried) and focus is on the first root, if any.
    Opened,
    /// A navigation command ran while open.
    Navigated(NavOutcome),
    /// A node was chosen and the popup closed. Its payload is still reachable
    /// through [`TreeCombo::items`] until the next query.
    Selected(NodeId),
    /// The popup closed without a selection.
    Closed,
}

/// Result of [`TreeCombo::handle_key`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyOutcome {
    /// Whether the key should stop propagating to the host.
    pub consumed: bool,
    /// What the key did.
    pub event: ComboEvent,
}

impl KeyOutcome {
    fn consumed(event: ComboEvent) -> Self {
        Self {
            consumed: true,
            event,
        }
    }

    fn passed(event: ComboEvent) -> Self {
        Self {
            consumed: false,
            event,
        }
    }
}

/// A combobox whose popup is a tree.
///
/// The combo owns its data source, the current query and the items built for it, an
/// [`ExpansionMap`] standing in for the rendered rows, and a [`FocusNavigator`].
/// Each (re)query rebuilds the items and the rows, with every toggle collapsed, and
/// focuses the first root.
///
/// Key handling:
///
/// - `ArrowDown` opens a closed combo, and moves down when open.
/// - `ArrowUp` moves up when open.
/// - `ArrowLeft` / `ArrowRight` collapse and expand when open and focused.
/// - `Enter` selects the focused node and closes.
/// - `Escape` closes.
///
/// Arrow keys are consumed whenever they acted; `Enter` and `Escape` never are.
pub struct TreeCombo<V, S> {
    source: S,
    query: String,
    items: Tree<V>,
    expansion: ExpansionMap,
    navigator: FocusNavigator,
    open: bool,
}

impl<V, S> fmt::Debug for TreeCombo<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeCombo")
            .field("query", &self.query)
            .field("items", &self.items)
            .field("focused", &self.navigator.focused())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl<V, S> TreeCombo<V, S>
where
    S: TreeSource<V>,
{
    /// Create a closed combo with an empty query.
    pub fn new(source: S) -> Self {
        Self::with_config(source, NavigatorConfig::default())
    }

    /// Create a closed combo whose navigator uses `config`.
    pub fn with_config(source: S, config: NavigatorConfig) -> Self {
        Self {
            source,
            query: String::new(),
            items: Tree::new(),
            expansion: ExpansionMap::new(),
            navigator: FocusNavigator::with_config(config),
            open: false,
        }
    }

    /// Returns `true` while the popup is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Items built for the current query.
    pub fn items(&self) -> &Tree<V> {
        &self.items
    }

    /// Row state of the current items.
    pub fn expansion(&self) -> &ExpansionMap {
        &self.expansion
    }

    /// The focused node.
    pub fn focused(&self) -> Option<NodeId> {
        self.navigator.focused()
    }

    /// Key of the focused node, for the host's active-descendant attribute.
    pub fn focused_key(&self) -> Option<&str> {
        self.navigator.focused().and_then(|id| self.items.key_of(id))
    }

    /// Query the source with the current query, and open.
    pub fn open(&mut self) -> ComboEvent {
        self.refresh();
        self.open = true;
        ComboEvent::Opened
    }

    /// Close without selecting.
    pub fn close(&mut self) -> ComboEvent {
        if !self.open {
            return ComboEvent::Ignored;
        }
        self.open = false;
        self.navigator.clear();
        log::debug!("tree combo closed");
        ComboEvent::Closed
    }

    /// Focus left the widget.
    pub fn blur(&mut self) -> ComboEvent {
        self.close()
    }

    /// Replace the query (the user typed), re-query the source, and open.
    pub fn set_query(&mut self, query: impl Into<String>) -> ComboEvent {
        self.query = query.into();
        self.open()
    }

    /// React to a key press.
    ///
    /// Fails only if the rows and items disagree; the combo is unchanged then.
    pub fn handle_key(&mut self, key: Key) -> Result<KeyOutcome, NavigationError> {
        let focused = self.navigator.focused().is_some();
        let outcome = match key {
            Key::ArrowDown if !self.open => KeyOutcome::consumed(self.open()),
            Key::ArrowDown => KeyOutcome::consumed(self.navigate(TreeNavigation::Next)?),
            Key::ArrowUp if self.open => KeyOutcome::consumed(self.navigate(TreeNavigation::Prev)?),
            Key::ArrowLeft if self.open && focused => {
                KeyOutcome::consumed(self.navigate(TreeNavigation::Collapse)?)
            }
            Key::ArrowRight if self.open && focused => {
                KeyOutcome::consumed(self.navigate(TreeNavigation::Expand)?)
            }
            Key::Enter if self.open => {
                let outcome = self.navigator.navigate(
                    &self.items,
                    &mut self.expansion,
                    TreeNavigation::Activate,
                )?;
                self.open = false;
                KeyOutcome::passed(match outcome {
                    NavOutcome::Activated(node) => {
                        log::debug!("tree combo selected {:?}", self.items.key_of(node));
                        ComboEvent::Selected(node)
                    }
                    _ => ComboEvent::Closed,
                })
            }
            Key::Escape => KeyOutcome::passed(self.close()),
            Key::ArrowUp | Key::ArrowLeft | Key::ArrowRight | Key::Enter => {
                KeyOutcome::passed(ComboEvent::Ignored)
            }
        };
        Ok(outcome)
    }

    fn navigate(&mut self, command: TreeNavigation) -> Result<ComboEvent, NavigationError> {
        self.navigator
            .navigate(&self.items, &mut self.expansion, command)
            .map(ComboEvent::Navigated)
    }

    fn refresh(&mut self) {
        self.items = self.source.query(&self.query);
        self.expansion = ExpansionMap::from_tree(&self.items);
        self.navigator.focus(self.items.roots().first().copied());
        log::debug!(
            "tree combo query {:?}: {} items",
            self.query,
            self.items.len()
        );
    }
}
