//! Shared helpers for building and checking trees

#![allow(dead_code)]

use arbor::tree::audit;
use arbor::tree::traversal::collect_values;
use arbor::{insert, AvlTree, TraversalKind, Tree};

/// Build a tree through the free-function API, inserting in order
pub fn build_root(values: &[i64]) -> Tree<i64> {
    values
        .iter()
        .fold(Tree::Leaf, |root, &value| insert(root, value))
}

/// Build a tree through the handle API
pub fn build_tree(values: &[i64]) -> AvlTree<i64> {
    values.iter().copied().collect()
}

/// In-order values of a root
pub fn in_order(root: &Tree<i64>) -> Vec<i64> {
    collect_values(TraversalKind::InOrder, root)
}

/// Panic with the violation if any invariant is broken; returns node count
pub fn assert_avl(root: &Tree<i64>) -> usize {
    match audit::validate(root) {
        Ok(count) => count,
        Err(violation) => panic!("invariant broken: {}", violation),
    }
}

/// Sorted, de-duplicated copy of `values`
pub fn sorted_unique(values: &[i64]) -> Vec<i64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}
