// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus state machine over a partially expanded tree.

use core::cell::Cell;

use understory_tree::traverse::Dfs;
use understory_tree::{NodeId, Tree};

use crate::error::NavigationError;
use crate::expansion::{Expansion, ExpansionView};

/// A navigation command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TreeNavigation {
    /// Move down one visible row (`ArrowDown`).
    Next,
    /// Move up one visible row (`ArrowUp`).
    Prev,
    /// Expand the focused node, or enter it if already expanded (`ArrowRight`).
    Expand,
    /// Collapse the focused node, or leave it for its parent (`ArrowLeft`).
    Collapse,
    /// Select the focused node (`Enter`).
    Activate,
    /// Drop focus (`Escape`, blur).
    Dismiss,
}

/// What a command did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavOutcome {
    /// Nothing changed: no focus, or no target in that direction.
    Unchanged,
    /// Focus moved.
    Moved {
        /// Previously focused node.
        from: NodeId,
        /// Newly focused node.
        to: NodeId,
    },
    /// The focused node was expanded in place.
    Expanded(NodeId),
    /// The focused node was collapsed in place.
    Collapsed(NodeId),
    /// The node was selected; focus is now cleared.
    Activated(NodeId),
    /// Focus is now cleared without a selection.
    Dismissed,
}

/// Whether moving down past the end of the top level wraps around.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop at the edges; the command is a no-op there.
    #[default]
    Never,
    /// `Next` on the last root lands on the first root, `Prev` on the first root
    /// searches back from the last root.
    Roots,
}

/// How `Prev` picks its target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backtrack {
    /// Search the left sibling, else the parent's left sibling, else take the parent.
    ///
    /// The search walks the subtree in reverse pre-order through expanded nodes only,
    /// and lands on the first node that is neither the search root nor the focused
    /// node, falling back to the search root.
    #[default]
    SiblingFirst,
    /// Land on the row drawn directly above: the deepest visible last descendant of
    /// the left sibling, else the parent.
    Visual,
}

/// Navigator configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NavigatorConfig {
    /// Edge behavior.
    pub wrap: WrapMode,
    /// Move-up target selection.
    pub backtrack: Backtrack,
}

/// Tracks the keyboard-focused node of a tree and applies [`TreeNavigation`] commands.
///
/// The navigator holds only the focused [`NodeId`]. The tree is passed to every call,
/// and so is the presentation layer's [`ExpansionView`]: expansion is visual state and
/// is never derived from the data model. Every command first reads the focused node's
/// expansion state; a missing row is a [`NavigationError`], and a failed command
/// changes nothing.
///
/// ```rust
/// use understory_tree::Tree;
/// use understory_tree_combo::{ExpansionMap, FocusNavigator, NavOutcome, TreeNavigation};
///
/// let mut tree = Tree::new();
/// let a = tree.insert(None, "a", ());
/// let a1 = tree.insert(Some(a), "a1", ());
/// let b = tree.insert(None, "b", ());
/// let mut view = ExpansionMap::from_tree(&tree);
///
/// let mut nav = FocusNavigator::new();
/// nav.focus(Some(a));
///
/// // `a` is collapsed, so its child is skipped.
/// assert_eq!(
///     nav.navigate(&tree, &mut view, TreeNavigation::Next),
///     Ok(NavOutcome::Moved { from: a, to: b })
/// );
///
/// // Back up, open `a`, and step into it.
/// nav.navigate(&tree, &mut view, TreeNavigation::Prev).unwrap();
/// nav.navigate(&tree, &mut view, TreeNavigation::Expand).unwrap();
/// nav.navigate(&tree, &mut view, TreeNavigation::Next).unwrap();
/// assert_eq!(nav.focused(), Some(a1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FocusNavigator {
    focused: Option<NodeId>,
    config: NavigatorConfig,
}

impl FocusNavigator {
    /// Create a navigator with no focus and the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator with no focus and the given configuration.
    pub fn with_config(config: NavigatorConfig) -> Self {
        Self {
            focused: None,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> NavigatorConfig {
        self.config
    }

    /// The focused node, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Set the focused node directly. Returns the previous focus.
    pub fn focus(&mut self, node: Option<NodeId>) -> Option<NodeId> {
        core::mem::replace(&mut self.focused, node)
    }

    /// Clear focus. Returns the previous focus.
    pub fn clear(&mut self) -> Option<NodeId> {
        self.focused.take()
    }

    /// Apply a command.
    pub fn navigate<T, E>(
        &mut self,
        tree: &Tree<T>,
        view: &mut E,
        command: TreeNavigation,
    ) -> Result<NavOutcome, NavigationError>
    where
        E: ExpansionView + ?Sized,
    {
        match command {
            TreeNavigation::Activate => {
                return Ok(match self.focused.take() {
                    Some(node) => {
                        log::trace!("activate {:?}", tree.key_of(node));
                        NavOutcome::Activated(node)
                    }
                    None => NavOutcome::Dismissed,
                });
            }
            TreeNavigation::Dismiss => {
                self.focused = None;
                return Ok(NavOutcome::Dismissed);
            }
            _ => {}
        }

        let Some((from, state)) = self.current(tree, view)? else {
            return Ok(NavOutcome::Unchanged);
        };
        let outcome = match command {
            TreeNavigation::Next => {
                let to = self.next_from(tree, from, state);
                self.move_to(tree, from, to)
            }
            TreeNavigation::Prev => {
                let to = self.prev_from(tree, view, from)?;
                self.move_to(tree, from, to)
            }
            TreeNavigation::Expand => match state {
                Expansion::NotExpandable => NavOutcome::Unchanged,
                Expansion::Collapsed => {
                    view.set_expanded(from, true);
                    NavOutcome::Expanded(from)
                }
                Expansion::Expanded => self.move_to(tree, from, tree.first_child(from)),
            },
            TreeNavigation::Collapse => match state {
                Expansion::Expanded => {
                    view.set_expanded(from, false);
                    NavOutcome::Collapsed(from)
                }
                Expansion::Collapsed | Expansion::NotExpandable => {
                    self.move_to(tree, from, tree.parent_of(from))
                }
            },
            TreeNavigation::Activate | TreeNavigation::Dismiss => NavOutcome::Unchanged,
        };
        Ok(outcome)
    }

    /// The node `Next` would move to, without moving.
    pub fn next_target<T, E>(
        &self,
        tree: &Tree<T>,
        view: &E,
    ) -> Result<Option<NodeId>, NavigationError>
    where
        E: ExpansionView + ?Sized,
    {
        match self.current(tree, view)? {
            Some((from, state)) => Ok(self.next_from(tree, from, state)),
            None => Ok(None),
        }
    }

    /// The node `Prev` would move to, without moving.
    pub fn prev_target<T, E>(
        &self,
        tree: &Tree<T>,
        view: &E,
    ) -> Result<Option<NodeId>, NavigationError>
    where
        E: ExpansionView + ?Sized,
    {
        match self.current(tree, view)? {
            Some((from, _)) => self.prev_from(tree, view, from),
            None => Ok(None),
        }
    }

    /// The focused node and its expansion state, checked against `tree` and `view`.
    fn current<T, E>(
        &self,
        tree: &Tree<T>,
        view: &E,
    ) -> Result<Option<(NodeId, Expansion)>, NavigationError>
    where
        E: ExpansionView + ?Sized,
    {
        let Some(node) = self.focused else {
            return Ok(None);
        };
        if !tree.contains(node) {
            return Err(NavigationError::UnknownNode(node));
        }
        Ok(Some((node, presentation(tree, view, node)?)))
    }

    fn next_from<T>(&self, tree: &Tree<T>, from: NodeId, state: Expansion) -> Option<NodeId> {
        if state.is_expanded()
            && let Some(child) = tree.first_child(from)
        {
            return Some(child);
        }
        if let Some(right) = tree.right_of(from) {
            return Some(right);
        }
        let parent = tree.parent_of(from);
        if let Some(uncle) = parent.and_then(|p| tree.right_of(p)) {
            return Some(uncle);
        }
        match self.config.wrap {
            WrapMode::Roots if parent.is_none() => {
                tree.roots().first().copied().filter(|&first| first != from)
            }
            WrapMode::Roots | WrapMode::Never => None,
        }
    }

    fn prev_from<T, E>(
        &self,
        tree: &Tree<T>,
        view: &E,
        from: NodeId,
    ) -> Result<Option<NodeId>, NavigationError>
    where
        E: ExpansionView + ?Sized,
    {
        let parent = tree.parent_of(from);
        match self.config.backtrack {
            Backtrack::SiblingFirst => {
                let search_root = tree
                    .left_of(from)
                    .or_else(|| parent.and_then(|p| tree.left_of(p)));
                if let Some(root) = search_root {
                    return reverse_search(tree, view, root, from).map(Some);
                }
            }
            Backtrack::Visual => {
                if let Some(left) = tree.left_of(from) {
                    return deepest_visible(tree, view, left).map(Some);
                }
            }
        }
        if parent.is_some() {
            return Ok(parent);
        }
        match self.config.wrap {
            WrapMode::Never => Ok(None),
            WrapMode::Roots => match tree.roots().last().copied() {
                Some(last) if last != from => match self.config.backtrack {
                    Backtrack::SiblingFirst => reverse_search(tree, view, last, from).map(Some),
                    Backtrack::Visual => deepest_visible(tree, view, last).map(Some),
                },
                _ => Ok(None),
            },
        }
    }

    fn move_to<T>(&mut self, tree: &Tree<T>, from: NodeId, to: Option<NodeId>) -> NavOutcome {
        match to {
            Some(to) if to != from => {
                log::trace!("focus {:?} -> {:?}", tree.key_of(from), tree.key_of(to));
                self.focused = Some(to);
                NavOutcome::Moved { from, to }
            }
            _ => NavOutcome::Unchanged,
        }
    }
}

fn presentation<T, E>(tree: &Tree<T>, view: &E, node: NodeId) -> Result<Expansion, NavigationError>
where
    E: ExpansionView + ?Sized,
{
    view.expansion(node).ok_or_else(|| NavigationError::missing(tree, node))
}

/// Walk `root`'s subtree in reverse pre-order through expanded nodes and take the
/// first node other than `root` and `focused`.
///
/// The walk stops at the first match, so at most one path into the subtree is read.
fn reverse_search<T, E>(
    tree: &Tree<T>,
    view: &E,
    root: NodeId,
    focused: NodeId,
) -> Result<NodeId, NavigationError>
where
    E: ExpansionView + ?Sized,
{
    let missing = Cell::new(None);
    let found = Dfs::new([root], |&node: &NodeId| match view.expansion(node) {
        Some(Expansion::Expanded) => Some(tree.children_of(node).iter().rev().copied()),
        Some(Expansion::Collapsed | Expansion::NotExpandable) => None,
        None => {
            missing.set(Some(node));
            None
        }
    })
    .find(|&node| missing.get().is_some() || (node != root && node != focused));
    if let Some(node) = missing.get() {
        return Err(NavigationError::missing(tree, node));
    }
    Ok(found.unwrap_or(root))
}

/// Follow last children down from `node` while they are expanded.
fn deepest_visible<T, E>(
    tree: &Tree<T>,
    view: &E,
    mut node: NodeId,
) -> Result<NodeId, NavigationError>
where
    E: ExpansionView + ?Sized,
{
    loop {
        if presentation(tree, view, node)?.is_expanded()
            && let Some(last) = tree.last_child(node)
        {
            node = last;
        } else {
            return Ok(node);
        }
    }
}
