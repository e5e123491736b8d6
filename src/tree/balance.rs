//! Balance primitives: height bookkeeping and single rotations
//!
//! Rotations are O(1): two slot moves and two height recomputations.
//! Shared nodes are cloned shallowly (value + two `Arc` handles) before
//! being rewritten, so snapshots held elsewhere stay intact.

use std::sync::Arc;

use super::node::{Tree, TreeNode, GREATER, LESS};
use tracing::trace;

/// Height of a subtree (0 for an empty slot)
#[inline]
pub fn height<T>(tree: &Tree<T>) -> usize {
    tree.as_node().map_or(0, TreeNode::height)
}

/// Balance factor of a subtree (0 for an empty slot)
#[inline]
pub fn balance_factor<T>(tree: &Tree<T>) -> isize {
    tree.as_node().map_or(0, TreeNode::balance_factor)
}

/// Recompute height and balance factor from the direct children only
///
/// Children must already be correct.
#[inline]
pub fn update_height<T>(node: &mut TreeNode<T>) {
    node.update_height();
}

impl<T> TreeNode<T> {
    /// Recompute `height` and `balance_factor` from the direct children
    pub fn update_height(&mut self) {
        let left = height(&self.children[LESS]);
        let right = height(&self.children[GREATER]);
        self.height = 1 + left.max(right);
        self.balance_factor = left as isize - right as isize;
    }
}

/// Take ownership of a node, cloning it only if another root shares it
#[inline]
pub(crate) fn into_owned<T: Clone>(node: Arc<TreeNode<T>>) -> TreeNode<T> {
    Arc::unwrap_or_clone(node)
}

/// Single right rotation around `y`
///
/// ```text
///        y            x
///       / \          / \
///      x   T3  =>  T1   y
///     / \              / \
///   T1   T2          T2   T3
/// ```
///
/// Returns `x` as the new subtree root. Calling it on a `y` without a less
/// child panics in debug builds and returns `y` unchanged otherwise.
pub fn rotate_right<T: Clone>(y: Tree<T>) -> Tree<T> {
    let Tree::Node(y) = y else {
        return y;
    };
    debug_assert!(!y.left().is_leaf(), "rotate_right requires a less child");
    if y.left().is_leaf() {
        return Tree::Node(y);
    }

    let mut y = into_owned(y);
    let Tree::Node(x) = std::mem::take(&mut y.children[LESS]) else {
        unreachable!("less child checked above");
    };
    let mut x = into_owned(x);
    trace!(height = y.height, "rotate right");

    y.children[LESS] = std::mem::take(&mut x.children[GREATER]);
    y.update_height();

    x.children[GREATER] = Tree::node(y);
    x.update_height();

    Tree::node(x)
}

/// Single left rotation around `x` (mirror of [`rotate_right`])
///
/// Returns `y` (the former greater child) as the new subtree root.
pub fn rotate_left<T: Clone>(x: Tree<T>) -> Tree<T> {
    let Tree::Node(x) = x else {
        return x;
    };
    debug_assert!(!x.right().is_leaf(), "rotate_left requires a greater child");
    if x.right().is_leaf() {
        return Tree::Node(x);
    }

    let mut x = into_owned(x);
    let Tree::Node(y) = std::mem::take(&mut x.children[GREATER]) else {
        unreachable!("greater child checked above");
    };
    let mut y = into_owned(y);
    trace!(height = x.height, "rotate left");

    x.children[GREATER] = std::mem::take(&mut y.children[LESS]);
    x.update_height();

    y.children[LESS] = Tree::node(x);
    y.update_height();

    Tree::node(y)
}
