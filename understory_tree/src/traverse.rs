// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic breadth-first and depth-first traversal.
//!
//! Every traversal here is parameterized by a *children accessor*: a closure that,
//! given a node, returns `Some(children)` or `None` for "no children". The node type
//! is free; it can be a [`NodeId`](crate::NodeId) into a [`Tree`](crate::Tree), a
//! reference into some other hierarchy, or an owned value.
//!
//! Two flavors are provided:
//!
//! - Eager: [`bfs`] and [`dfs`] drive the whole walk and call a visitor for each node.
//! - Lazy: [`Bfs`] and [`Dfs`] are iterators that only process the worklist when the
//!   next node is pulled. Dropping one early is the cancellation mechanism; it owns
//!   nothing but its worklist.
//!
//! Both flavors produce the same order for the same input. Breadth-first appends
//! children at the back of the worklist (nodes come out in non-decreasing depth);
//! depth-first inserts them at the front in their original order (pre-order).
//!
//! There is no cycle detection: an accessor that reports a cycle makes the traversal
//! run forever.
//!
//! ```rust
//! use understory_tree::traverse::{Dfs, bfs};
//!
//! // A tree encoded as an adjacency list: 0 -> [1, 2], 1 -> [3].
//! let edges: [&[usize]; 4] = [&[1, 2], &[3], &[], &[]];
//! let children = |n: &usize| Some(edges[*n].iter().copied());
//!
//! let mut order = Vec::new();
//! bfs([0], children, |n| order.push(n));
//! assert_eq!(order, [0, 1, 2, 3]);
//!
//! let pre: Vec<usize> = Dfs::new([0], children).collect();
//! assert_eq!(pre, [0, 1, 3, 2]);
//! ```

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

/// Eager breadth-first traversal.
///
/// Starts from `roots` (pass `[root]` for a single root). For each node taken from
/// the front of the worklist, its children are queried and appended, then `visit`
/// is called on the node.
pub fn bfs<T, I, F, V>(roots: impl IntoIterator<Item = T>, mut children: F, mut visit: V)
where
    F: FnMut(&T) -> Option<I>,
    I: IntoIterator<Item = T>,
    V: FnMut(T),
{
    let mut worklist: VecDeque<T> = roots.into_iter().collect();
    while let Some(node) = worklist.pop_front() {
        if let Some(kids) = children(&node) {
            worklist.extend(kids);
        }
        visit(node);
    }
}

/// Eager depth-first (pre-order) traversal.
///
/// Like [`bfs`], but children are inserted at the front of the worklist, keeping
/// child 0 ahead of child 1, so a node is visited before its descendants and
/// descendants are visited left to right.
pub fn dfs<T, I, F, V>(roots: impl IntoIterator<Item = T>, mut children: F, mut visit: V)
where
    F: FnMut(&T) -> Option<I>,
    I: IntoIterator<Item = T>,
    V: FnMut(T),
{
    let mut worklist: VecDeque<T> = roots.into_iter().collect();
    let mut scratch = Vec::new();
    while let Some(node) = worklist.pop_front() {
        if let Some(kids) = children(&node) {
            prepend(&mut worklist, &mut scratch, kids);
        }
        visit(node);
    }
}

fn prepend<T>(worklist: &mut VecDeque<T>, scratch: &mut Vec<T>, kids: impl IntoIterator<Item = T>) {
    scratch.extend(kids);
    for kid in scratch.drain(..).rev() {
        worklist.push_front(kid);
    }
}

/// Lazy breadth-first traversal.
///
/// Yields nodes in the same order as [`bfs`]. The children accessor is only
/// called for nodes that have actually been pulled.
pub struct Bfs<T, F> {
    worklist: VecDeque<T>,
    children: F,
}

impl<T, F> Bfs<T, F> {
    /// Create a traversal starting from `roots`.
    pub fn new(roots: impl IntoIterator<Item = T>, children: F) -> Self {
        Self {
            worklist: roots.into_iter().collect(),
            children,
        }
    }

    /// Number of nodes discovered but not yet yielded.
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }
}

impl<T, I, F> Iterator for Bfs<T, F>
where
    F: FnMut(&T) -> Option<I>,
    I: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.worklist.pop_front()?;
        if let Some(kids) = (self.children)(&node) {
            self.worklist.extend(kids);
        }
        Some(node)
    }
}

impl<T, I, F> FusedIterator for Bfs<T, F>
where
    F: FnMut(&T) -> Option<I>,
    I: IntoIterator<Item = T>,
{
}

impl<T, F> fmt::Debug for Bfs<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bfs")
            .field("pending", &self.worklist.len())
            .finish_non_exhaustive()
    }
}

/// Lazy depth-first (pre-order) traversal.
///
/// Yields nodes in the same order as [`dfs`]. Reversing the children reported by
/// the accessor gives a reverse pre-order, which is how "last visible descendant"
/// searches are written:
///
/// ```rust
/// use understory_tree::traverse::Dfs;
///
/// let edges: [&[usize]; 4] = [&[1, 2], &[3], &[], &[]];
/// let mut rev = Dfs::new([0], |n: &usize| Some(edges[*n].iter().rev().copied()));
/// assert_eq!(rev.next(), Some(0));
/// assert_eq!(rev.next(), Some(2));
/// // Stop here; nothing else is computed.
/// drop(rev);
/// ```
pub struct Dfs<T, F> {
    worklist: VecDeque<T>,
    scratch: Vec<T>,
    children: F,
}

impl<T, F> Dfs<T, F> {
    /// Create a traversal starting from `roots`.
    pub fn new(roots: impl IntoIterator<Item = T>, children: F) -> Self {
        Self {
            worklist: roots.into_iter().collect(),
            scratch: Vec::new(),
            children,
        }
    }

    /// Number of nodes discovered but not yet yielded.
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }
}

impl<T, I, F> Iterator for Dfs<T, F>
where
    F: FnMut(&T) -> Option<I>,
    I: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.worklist.pop_front()?;
        if let Some(kids) = (self.children)(&node) {
            prepend(&mut self.worklist, &mut self.scratch, kids);
        }
        Some(node)
    }
}

impl<T, I, F> FusedIterator for Dfs<T, F>
where
    F: FnMut(&T) -> Option<I>,
    I: IntoIterator<Item = T>,
{
}

impl<T, F> fmt::Debug for Dfs<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dfs")
            .field("pending", &self.worklist.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::Cell;

    // 0 -> [1, 2, 3], 1 -> [4, 5], 3 -> [6], 5 -> [7]
    const EDGES: [&[u32]; 8] = [&[1, 2, 3], &[4, 5], &[], &[6], &[], &[7], &[], &[]];

    fn kids(n: &u32) -> Option<core::iter::Copied<core::slice::Iter<'static, u32>>> {
        let e = EDGES[*n as usize];
        (!e.is_empty()).then(|| e.iter().copied())
    }

    #[test]
    fn bfs_is_level_order() {
        let mut seen = Vec::new();
        bfs([0], kids, |n| seen.push(n));
        assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn dfs_is_pre_order() {
        let mut seen = Vec::new();
        dfs([0], kids, |n| seen.push(n));
        assert_eq!(seen, [0, 1, 4, 5, 7, 2, 3, 6]);
    }

    #[test]
    fn lazy_matches_eager() {
        let mut eager = Vec::new();
        bfs([0], kids, |n| eager.push(n));
        assert_eq!(Bfs::new([0], kids).collect::<Vec<_>>(), eager);

        eager.clear();
        dfs([0], kids, |n| eager.push(n));
        assert_eq!(Dfs::new([0], kids).collect::<Vec<_>>(), eager);
    }

    #[test]
    fn multiple_roots_start_the_worklist() {
        let bfs_order: Vec<u32> = Bfs::new([1, 3], kids).collect();
        assert_eq!(bfs_order, [1, 3, 4, 5, 6, 7]);
        let dfs_order: Vec<u32> = Dfs::new([1, 3], kids).collect();
        assert_eq!(dfs_order, [1, 4, 5, 7, 3, 6]);
    }

    #[test]
    fn empty_roots_yield_nothing() {
        let mut visited = false;
        dfs(core::iter::empty::<u32>(), kids, |_| visited = true);
        assert!(!visited, "no roots means no visits");
        assert_eq!(Bfs::new(core::iter::empty::<u32>(), kids).next(), None);
    }

    #[test]
    fn absent_and_empty_children_are_both_leaves() {
        let none = |_: &u32| None::<Vec<u32>>;
        let empty = |_: &u32| Some(Vec::<u32>::new());
        assert_eq!(Dfs::new([9], none).collect::<Vec<_>>(), [9]);
        assert_eq!(Dfs::new([9], empty).collect::<Vec<_>>(), [9]);
    }

    #[test]
    fn lazy_only_expands_pulled_nodes() {
        let calls = Cell::new(0);
        let counted = |n: &u32| {
            calls.set(calls.get() + 1);
            kids(n)
        };
        let mut walk = Dfs::new([0], counted);
        assert_eq!(walk.next(), Some(0));
        assert_eq!(walk.next(), Some(1));
        assert_eq!(calls.get(), 2, "only the two pulled nodes were expanded");
        assert_eq!(walk.pending(), 4);
        drop(walk);
        assert_eq!(calls.get(), 2, "dropping the traversal does no further work");
    }

    #[test]
    fn reversed_children_give_reverse_pre_order() {
        let rev = |n: &u32| Some(EDGES[*n as usize].iter().rev().copied());
        let order: Vec<u32> = Dfs::new([0], rev).collect();
        assert_eq!(order, [0, 3, 6, 2, 1, 5, 7, 4]);
    }

    #[test]
    fn works_over_borrowed_nodes() {
        struct Item {
            name: &'static str,
            children: Vec<Item>,
        }
        let tree = Item {
            name: "a",
            children: vec![
                Item {
                    name: "b",
                    children: vec![],
                },
                Item {
                    name: "c",
                    children: vec![Item {
                        name: "d",
                        children: vec![],
                    }],
                },
            ],
        };
        fn item_kids<'a>(item: &&'a Item) -> Option<core::slice::Iter<'a, Item>> {
            Some(item.children.iter())
        }
        let names: Vec<&str> = Bfs::new([&tree], item_kids).map(|i| i.name).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }
}
