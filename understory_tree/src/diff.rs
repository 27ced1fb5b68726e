// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural comparison of two trees.
//!
//! The differ walks node pairs breadth-first. For each pair it compares, in order:
//!
//! 1. the keys,
//! 2. the payloads, with a caller-supplied equality,
//! 3. the number of children.
//!
//! The first failing check produces a [`Divergence`] for that pair and the pair's
//! children are never compared. Pairs that were already scheduled (siblings and
//! cousins) are still compared, so [`divergences`] lists every *top-level*
//! divergence: none of them lies beneath another.
//!
//! The order is fixed: a pair is compared before its children, and all pairs at depth
//! `d` are compared, left to right, before any pair at depth `d + 1`. [`diff`] and
//! [`diff_forests`] return the first divergence in that order.
//!
//! ```rust
//! use understory_tree::{Tree, diff::{DivergenceKind, diff}};
//!
//! let mut old = Tree::new();
//! let r = old.insert(None, "r", 1);
//! old.insert(Some(r), "a", 2);
//!
//! let mut new = old.clone();
//! let a = new.find("a").unwrap();
//! *new.value_mut(a).unwrap() = 3;
//!
//! let d = diff(&old, r, &new, r, |x, y| x == y).unwrap();
//! assert_eq!(d.kind, DivergenceKind::Value);
//! assert_eq!(d.right, Some(a));
//! assert_eq!(&d.path[..], &[0]);
//! ```

use alloc::collections::VecDeque;
use core::fmt;
use smallvec::SmallVec;

use crate::tree::Tree;
use crate::types::NodeId;

/// Child-index path from the compared root(s) to a node pair.
///
/// For [`diff`] the path starts below the given roots (the roots themselves have an
/// empty path). For [`diff_forests`] the first element is the index of the root.
pub type DiffPath = SmallVec<[usize; 8]>;

/// How a leaf on the left-hand side compares against children on the right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum LeafMode {
    /// Child counts must match exactly; a leaf against a branch is a divergence.
    #[default]
    Strict,
    /// A left-hand node with no children matches any right-hand subtree.
    ///
    /// The comparison only reaches as deep as the left tree's shape, which is what
    /// "has anything at the top changed" queries want.
    Open,
}

/// Options for a diff.
#[derive(Copy, Clone, Debug, Default)]
pub struct DiffOptions {
    /// Leaf handling on the left-hand side.
    pub leaves: LeafMode,
}

/// What differed at a [`Divergence`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DivergenceKind {
    /// The two nodes have different keys.
    Key,
    /// The two payloads are not equal.
    Value,
    /// The two nodes (or the two root lists) have different numbers of children.
    ChildCount {
        /// Children on the left-hand side.
        left: usize,
        /// Children on the right-hand side.
        right: usize,
    },
}

/// The point where two trees differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Node on the left-hand side; `None` when the root lists themselves differ.
    pub left: Option<NodeId>,
    /// Node on the right-hand side; `None` when the root lists themselves differ.
    pub right: Option<NodeId>,
    /// Child-index path to the pair.
    pub path: DiffPath,
    /// What differed.
    pub kind: DivergenceKind,
}

/// Lazy iterator over top-level divergences, in breadth-first pair order.
///
/// Created by [`divergences`] and [`forest_divergences`]. Stop pulling at any time;
/// nothing runs in between.
pub struct Divergences<'t, A, B, F> {
    left: &'t Tree<A>,
    right: &'t Tree<B>,
    value_eq: F,
    options: DiffOptions,
    pending: VecDeque<(NodeId, NodeId, DiffPath)>,
    root_mismatch: Option<Divergence>,
}

impl<A, B, F> fmt::Debug for Divergences<'_, A, B, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Divergences")
            .field("options", &self.options)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<'t, A, B, F> Divergences<'t, A, B, F>
where
    F: FnMut(&A, &B) -> bool,
{
    fn new(left: &'t Tree<A>, right: &'t Tree<B>, value_eq: F, options: DiffOptions) -> Self {
        Self {
            left,
            right,
            value_eq,
            options,
            pending: VecDeque::new(),
            root_mismatch: None,
        }
    }

    /// Schedule the children of an already-equal pair, or report their shape mismatch.
    fn schedule(
        &mut self,
        lc: &[NodeId],
        rc: &[NodeId],
        path: &DiffPath,
    ) -> Result<(), DivergenceKind> {
        if lc.is_empty() && self.options.leaves == LeafMode::Open {
            return Ok(());
        }
        if lc.len() != rc.len() {
            return Err(DivergenceKind::ChildCount {
                left: lc.len(),
                right: rc.len(),
            });
        }
        for (i, (&l, &r)) in lc.iter().zip(rc).enumerate() {
            let mut child_path = path.clone();
            child_path.push(i);
            self.pending.push_back((l, r, child_path));
        }
        Ok(())
    }

    fn compare(&mut self, l: NodeId, r: NodeId, path: &DiffPath) -> Result<(), DivergenceKind> {
        let ln = self.left.node(l);
        let rn = self.right.node(r);
        if ln.key() != rn.key() {
            return Err(DivergenceKind::Key);
        }
        if !(self.value_eq)(ln.value(), rn.value()) {
            return Err(DivergenceKind::Value);
        }
        let (left, right) = (self.left, self.right);
        self.schedule(left.children_of(l), right.children_of(r), path)
    }
}

impl<A, B, F> Iterator for Divergences<'_, A, B, F>
where
    F: FnMut(&A, &B) -> bool,
{
    type Item = Divergence;

    fn next(&mut self) -> Option<Divergence> {
        if let Some(d) = self.root_mismatch.take() {
            return Some(d);
        }
        while let Some((l, r, path)) = self.pending.pop_front() {
            if let Err(kind) = self.compare(l, r, &path) {
                return Some(Divergence {
                    left: Some(l),
                    right: Some(r),
                    path,
                    kind,
                });
            }
        }
        None
    }
}

/// Iterate the top-level divergences between the subtrees at `a_root` and `b_root`.
///
/// # Panics
///
/// Panics if `a_root` or `b_root` was not issued by its tree.
pub fn divergences<'t, A, B, F>(
    a: &'t Tree<A>,
    a_root: NodeId,
    b: &'t Tree<B>,
    b_root: NodeId,
    value_eq: F,
    options: DiffOptions,
) -> Divergences<'t, A, B, F>
where
    F: FnMut(&A, &B) -> bool,
{
    let mut it = Divergences::new(a, b, value_eq, options);
    it.pending.push_back((a_root, b_root, DiffPath::new()));
    it
}

/// Iterate the top-level divergences between two whole forests.
///
/// The root lists are compared like the children of an invisible common parent,
/// always by exact length whatever the [`LeafMode`]. If their lengths differ, a single
/// divergence with both nodes set to `None` is reported and nothing else is compared.
pub fn forest_divergences<'t, A, B, F>(
    a: &'t Tree<A>,
    b: &'t Tree<B>,
    value_eq: F,
    options: DiffOptions,
) -> Divergences<'t, A, B, F>
where
    F: FnMut(&A, &B) -> bool,
{
    let mut it = Divergences::new(a, b, value_eq, options);
    let (lr, rr) = (a.roots(), b.roots());
    // Root lists compare by exact length; `LeafMode::Open` applies to nodes only.
    let scheduled = if lr.len() == rr.len() {
        it.schedule(lr, rr, &DiffPath::new())
    } else {
        Err(DivergenceKind::ChildCount {
            left: lr.len(),
            right: rr.len(),
        })
    };
    if let Err(kind) = scheduled {
        it.root_mismatch = Some(Divergence {
            left: None,
            right: None,
            path: DiffPath::new(),
            kind,
        });
    }
    it
}

/// First divergence between two subtrees, with exact child-count matching.
///
/// Returns `None` when every compared pair has equal keys, equal payloads and the
/// same number of children.
pub fn diff<A, B, F>(
    a: &Tree<A>,
    a_root: NodeId,
    b: &Tree<B>,
    b_root: NodeId,
    value_eq: F,
) -> Option<Divergence>
where
    F: FnMut(&A, &B) -> bool,
{
    divergences(a, a_root, b, b_root, value_eq, DiffOptions::default()).next()
}

/// First divergence between two forests.
pub fn diff_forests<A, B, F>(
    a: &Tree<A>,
    b: &Tree<B>,
    value_eq: F,
    options: DiffOptions,
) -> Option<Divergence>
where
    F: FnMut(&A, &B) -> bool,
{
    forest_divergences(a, b, value_eq, options).next()
}

/// Finds the first top-level difference between an old and a new forest.
///
/// Payloads are compared with `==`, and the comparison never descends below a
/// node that has no children in `old` ([`LeafMode::Open`]): a new tree that only
/// grew deeper under old leaves compares equal. The root lists must still have the
/// same length, so an empty `old` against a populated `new` is a divergence.
pub fn find_top_level_diff<V: PartialEq>(old: &Tree<V>, new: &Tree<V>) -> Option<Divergence> {
    diff_forests(
        old,
        new,
        |a, b| a == b,
        DiffOptions {
            leaves: LeafMode::Open,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    // r -> [x, y], x -> [x1, x2], y -> [y1]
    fn sample() -> Tree<i32> {
        let mut t = Tree::new();
        let r = t.insert(None, "r", 0);
        let x = t.insert(Some(r), "x", 1);
        let y = t.insert(Some(r), "y", 2);
        t.insert(Some(x), "x1", 3);
        t.insert(Some(x), "x2", 4);
        t.insert(Some(y), "y1", 5);
        t
    }

    fn set(t: &mut Tree<i32>, key: &str, v: i32) -> NodeId {
        let id = t.find(key).unwrap();
        *t.value_mut(id).unwrap() = v;
        id
    }

    fn eq(a: &i32, b: &i32) -> bool {
        a == b
    }

    /// Every top-level divergence between the first roots of `a` and `b`.
    fn all_divergences(a: &Tree<i32>, b: &Tree<i32>) -> Vec<Divergence> {
        let (ra, rb) = (a.roots()[0], b.roots()[0]);
        let strict = DiffOptions::default();
        divergences(a, ra, b, rb, eq, strict).collect()
    }

    fn links(t: &Tree<i32>) -> Vec<(NodeId, Option<NodeId>, Option<NodeId>)> {
        t.dfs(t.roots())
            .map(|id| (id, t.left_of(id), t.right_of(id)))
            .collect()
    }

    #[test]
    fn identical_copies_do_not_diverge() {
        let a = sample();
        let b = sample();
        let root = a.roots()[0];
        assert_eq!(diff(&a, root, &b, b.roots()[0], eq), None);
        assert_eq!(diff_forests(&a, &b, eq, DiffOptions::default()), None);
    }

    #[test]
    fn root_value_mismatch_stops_everything() {
        let a = sample();
        let mut b = sample();
        set(&mut b, "r", 100);
        set(&mut b, "x1", 100);
        let all = all_divergences(&a, &b);
        assert_eq!(all.len(), 1, "nothing below a divergence is compared");
        assert_eq!(all[0].kind, DivergenceKind::Value);
        assert!(all[0].path.is_empty());
    }

    #[test]
    fn shallower_sibling_wins_over_deeper_cousin() {
        // x1 (depth 2) and y (depth 1) both change; breadth-first order reports y first.
        let a = sample();
        let mut b = sample();
        let x1 = set(&mut b, "x1", 30);
        let y = set(&mut b, "y", 20);
        let first = diff(&a, a.roots()[0], &b, b.roots()[0], eq).unwrap();
        assert_eq!(first.right, Some(y));
        assert_eq!(&first.path[..], &[1]);

        let all = all_divergences(&a, &b);
        let rights: Vec<_> = all.iter().map(|d| d.right).collect();
        assert_eq!(rights, [Some(y), Some(x1)]);
        assert_eq!(&all[1].path[..], &[0, 0]);
    }

    #[test]
    fn siblings_are_compared_left_to_right() {
        let a = sample();
        let mut b = sample();
        let x2 = set(&mut b, "x2", 40);
        let x1 = set(&mut b, "x1", 30);
        let all = all_divergences(&a, &b);
        let rights: Vec<_> = all.iter().map(|d| d.right).collect();
        assert_eq!(rights, [Some(x1), Some(x2)]);
    }

    #[test]
    fn divergence_hides_its_subtree_but_not_its_siblings() {
        let a = sample();
        let mut b = sample();
        let x = set(&mut b, "x", 10);
        set(&mut b, "x2", 40);
        let y1 = set(&mut b, "y1", 50);
        let all = all_divergences(&a, &b);
        let rights: Vec<_> = all.iter().map(|d| d.right).collect();
        assert_eq!(rights, [Some(x), Some(y1)], "x2 sits under x and is skipped");
    }

    #[test]
    fn child_count_mismatch() {
        let a = sample();
        let mut b = sample();
        let y = b.find("y").unwrap();
        b.insert(Some(y), "y2", 6);
        let d = diff(&a, a.roots()[0], &b, b.roots()[0], eq).unwrap();
        assert_eq!(d.kind, DivergenceKind::ChildCount { left: 1, right: 2 });
        assert_eq!(d.left, a.find("y"));
    }

    #[test]
    fn key_mismatch() {
        let a = sample();
        // Same shape as `sample`, but `y` is called `z`.
        let mut b = Tree::new();
        let r = b.insert(None, "r", 0);
        let x = b.insert(Some(r), "x", 1);
        let z = b.insert(Some(r), "z", 2);
        b.insert(Some(x), "x1", 3);
        b.insert(Some(x), "x2", 4);
        b.insert(Some(z), "y1", 5);
        let d = diff(&a, a.roots()[0], &b, r, eq).unwrap();
        assert_eq!(d.kind, DivergenceKind::Key);
        assert_eq!(d.right, b.find("z"));
    }

    #[test]
    fn leaf_modes() {
        let mut old = Tree::new();
        let r = old.insert(None, "r", 0);
        let c = old.insert(Some(r), "c", 1);
        old.declare_children(c);
        let mut new = old.clone();
        new.insert(Some(c), "g", 2);

        let strict = diff(&old, r, &new, r, eq).unwrap();
        assert_eq!(strict.kind, DivergenceKind::ChildCount { left: 0, right: 1 });

        let open = DiffOptions {
            leaves: LeafMode::Open,
        };
        assert_eq!(divergences(&old, r, &new, r, eq, open).next(), None);
        assert_eq!(find_top_level_diff(&old, &new), None);

        // Open only relaxes the left side.
        let reversed = divergences(&new, r, &old, r, eq, open).next().unwrap();
        assert_eq!(reversed.kind, DivergenceKind::ChildCount { left: 1, right: 0 });
    }

    #[test]
    fn root_list_mismatch() {
        let a = sample();
        let mut b = sample();
        b.insert(None, "extra", 9);
        let d = diff_forests(&a, &b, eq, DiffOptions::default()).unwrap();
        assert_eq!(d.left, None);
        assert_eq!(d.right, None);
        assert_eq!(d.kind, DivergenceKind::ChildCount { left: 1, right: 2 });
        let strict = DiffOptions::default();
        assert_eq!(forest_divergences(&a, &b, eq, strict).count(), 1);
    }

    #[test]
    fn empty_old_forest_against_populated_new() {
        let old: Tree<i32> = Tree::new();
        let new = sample();
        let d = find_top_level_diff(&old, &new).unwrap();
        assert_eq!(d.kind, DivergenceKind::ChildCount { left: 0, right: 1 });
        assert_eq!((d.left, d.right), (None, None));
        assert!(d.path.is_empty());

        let open = DiffOptions {
            leaves: LeafMode::Open,
        };
        assert_eq!(forest_divergences(&old, &new, eq, open).count(), 1);
        assert_eq!(find_top_level_diff(&old, &Tree::new()), None);
    }

    #[test]
    fn forest_paths_start_with_root_index() {
        let mut a = Tree::new();
        a.insert(None, "p", 1);
        let q = a.insert(None, "q", 2);
        a.insert(Some(q), "q1", 3);
        let mut b = a.clone();
        let q1 = set(&mut b, "q1", 30);
        let d = diff_forests(&a, &b, eq, DiffOptions::default()).unwrap();
        assert_eq!(d.right, Some(q1));
        assert_eq!(&d.path[..], &[1, 0]);
    }

    #[test]
    fn payload_types_may_differ() {
        let a = sample();
        let mut b: Tree<alloc::string::String> = Tree::new();
        let r = b.insert(None, "r", "0".into());
        let same = |x: &i32, y: &alloc::string::String| alloc::format!("{x}") == *y;
        let d = diff(&a, a.roots()[0], &b, r, same).unwrap();
        assert_eq!(d.kind, DivergenceKind::ChildCount { left: 2, right: 0 });
    }

    #[test]
    fn inputs_are_untouched() {
        let a = sample();
        let b = sample();
        let before = links(&a);
        let strict = DiffOptions::default();
        let _ = forest_divergences(&a, &b, eq, strict).count();
        assert_eq!(links(&a), before);
    }
}
