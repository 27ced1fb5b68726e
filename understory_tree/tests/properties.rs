// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over randomly shaped forests.

use proptest::prelude::*;
use proptest::sample::Index;
use understory_tree::diff::{DiffOptions, diff, diff_forests};
use understory_tree::traverse::{Bfs, Dfs, bfs, dfs};
use understory_tree::{NodeId, Tree};

/// Node `i` hangs under one of the nodes before it, or becomes a new root.
fn forest() -> impl Strategy<Value = Tree<u8>> {
    prop::collection::vec((prop::option::weighted(0.8, any::<Index>()), any::<u8>()), 1..48)
        .prop_map(|shape| {
            let mut tree = Tree::new();
            let mut ids: Vec<NodeId> = Vec::new();
            for (i, (parent, value)) in shape.into_iter().enumerate() {
                let parent = parent.filter(|_| i > 0).map(|ix| ids[ix.index(i)]);
                ids.push(tree.insert(parent, format!("n{i}"), value));
            }
            tree
        })
}

fn children(tree: &Tree<u8>) -> impl Fn(&NodeId) -> Option<Vec<NodeId>> + Copy + '_ {
    move |id| {
        let kids = tree.children_of(*id);
        (!kids.is_empty()).then(|| kids.to_vec())
    }
}

fn check_linked(tree: &Tree<u8>, level: &[NodeId]) -> Result<(), TestCaseError> {
    let (Some(&first), Some(&last)) = (level.first(), level.last()) else {
        return Ok(());
    };
    prop_assert_eq!(tree.left_of(first), None);
    prop_assert_eq!(tree.right_of(last), None);
    for pair in level.windows(2) {
        prop_assert_eq!(tree.left_of(pair[1]), Some(pair[0]));
        prop_assert_eq!(tree.right_of(pair[0]), Some(pair[1]));
    }
    Ok(())
}

proptest! {
    #[test]
    fn every_level_is_linked(tree in forest()) {
        check_linked(&tree, tree.roots())?;
        for id in tree.dfs(tree.roots()) {
            check_linked(&tree, tree.children_of(id))?;
            for &child in tree.children_of(id) {
                prop_assert_eq!(tree.parent_of(child), Some(id));
            }
        }
    }

    #[test]
    fn relinking_a_scrambled_level_restores_links(tree in forest()) {
        let mut tree = tree;
        let roots = tree.roots().to_vec();
        let mut scrambled = roots.clone();
        scrambled.reverse();
        tree.link_siblings(&scrambled);
        tree.relink_children(None);
        check_linked(&tree, &roots)?;
    }

    #[test]
    fn lazy_and_eager_agree(tree in forest()) {
        let roots = tree.roots().to_vec();
        let mut eager = Vec::new();
        bfs(roots.clone(), children(&tree), |n| eager.push(n));
        let lazy: Vec<NodeId> = Bfs::new(roots.clone(), children(&tree)).collect();
        prop_assert_eq!(lazy, eager.clone());

        eager.clear();
        dfs(roots.clone(), children(&tree), |n| eager.push(n));
        let lazy: Vec<NodeId> = Dfs::new(roots, children(&tree)).collect();
        prop_assert_eq!(lazy, eager);
    }

    #[test]
    fn traversals_visit_every_node_once(tree in forest()) {
        let mut seen: Vec<NodeId> = tree.bfs(tree.roots()).collect();
        prop_assert_eq!(seen.len(), tree.len());
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), tree.len());
    }

    #[test]
    fn bfs_depth_never_decreases(tree in forest()) {
        let depths: Vec<usize> = tree
            .bfs(tree.roots())
            .map(|id| tree.depth_of(id).unwrap())
            .collect();
        prop_assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn dfs_is_pre_order(tree in forest()) {
        let order: Vec<NodeId> = tree.dfs(tree.roots()).collect();
        let position = |id: NodeId| order.iter().position(|&o| o == id).unwrap();
        for &id in &order {
            let at = position(id);
            let kids = tree.children_of(id);
            // Parent before children, children left to right.
            for w in kids.windows(2) {
                prop_assert!(position(w[0]) < position(w[1]));
            }
            for &k in kids {
                prop_assert!(at < position(k));
            }
            // A node's subtree is contiguous: the next sibling comes after all of it.
            if let Some(right) = tree.right_of(id) {
                let subtree = tree.dfs(&[id]).count();
                prop_assert_eq!(position(right), at + subtree);
            }
        }
    }

    #[test]
    fn a_copy_never_diverges(tree in forest()) {
        let copy = tree.clone();
        let strict = DiffOptions::default();
        prop_assert_eq!(diff_forests(&tree, &copy, |a, b| a == b, strict), None);
        for &root in tree.roots() {
            prop_assert_eq!(diff(&tree, root, &copy, root, |a, b| a == b), None);
        }
    }

    #[test]
    fn a_single_edit_is_found_exactly(tree in forest(), pick in any::<Index>()) {
        let target = tree.dfs(tree.roots()).nth(pick.index(tree.len())).unwrap();
        let mut edited = tree.clone();
        let v = edited.value_mut(target).unwrap();
        *v = v.wrapping_add(1);
        let strict = DiffOptions::default();
        let d = diff_forests(&tree, &edited, |a, b| a == b, strict).unwrap();
        prop_assert_eq!(d.right, Some(target));
        prop_assert_eq!(d.path.len(), tree.depth_of(target).unwrap() + 1);
    }
}
