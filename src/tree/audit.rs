//! Whole-tree invariant checks
//!
//! Verifies BST order, AVL balance and height/balance bookkeeping in one
//! post-order pass. `AvlTree` asserts these in debug builds after every
//! mutation.

use std::fmt;

use super::balance::height;
use super::node::Tree;
use thiserror::Error;

/// A broken tree invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A value sits on the wrong side of an ancestor
    #[error("BST order violated at {value}: must lie in ({lower}, {upper})")]
    OrderViolation {
        /// Offending value
        value: String,
        /// Exclusive lower bound imposed by ancestors
        lower: String,
        /// Exclusive upper bound imposed by ancestors
        upper: String,
    },

    /// Balance factor outside {-1, 0, 1}
    #[error("node {value} unbalanced: balance factor {balance_factor}")]
    Unbalanced {
        /// Offending value
        value: String,
        /// Actual height(less) - height(greater)
        balance_factor: isize,
    },

    /// Stored height differs from the recomputed one
    #[error("node {value} has stale height: stored {stored}, actual {actual}")]
    StaleHeight {
        /// Offending value
        value: String,
        /// Height field
        stored: usize,
        /// Recomputed height
        actual: usize,
    },

    /// Stored balance factor differs from the recomputed one
    #[error("node {value} has stale balance factor: stored {stored}, actual {actual}")]
    StaleBalanceFactor {
        /// Offending value
        value: String,
        /// Balance factor field
        stored: isize,
        /// Recomputed balance factor
        actual: isize,
    },
}

/// Check every invariant; returns the node count on success
pub fn validate<T: Ord + fmt::Debug>(root: &Tree<T>) -> Result<usize, InvariantViolation> {
    check(root, None, None).map(|(count, _)| count)
}

/// Whether `root` satisfies every invariant
pub fn is_valid<T: Ord + fmt::Debug>(root: &Tree<T>) -> bool {
    validate(root).is_ok()
}

/// Returns (node count, recomputed height)
fn check<T: Ord + fmt::Debug>(
    tree: &Tree<T>,
    lower: Option<&T>,
    upper: Option<&T>,
) -> Result<(usize, usize), InvariantViolation> {
    let Some(node) = tree.as_node() else {
        return Ok((0, 0));
    };
    let value = node.value();

    let above_lower = lower.map_or(true, |bound| value > bound);
    let below_upper = upper.map_or(true, |bound| value < bound);
    if !(above_lower && below_upper) {
        return Err(InvariantViolation::OrderViolation {
            value: format!("{:?}", value),
            lower: lower.map_or_else(|| "-inf".to_string(), |b| format!("{:?}", b)),
            upper: upper.map_or_else(|| "+inf".to_string(), |b| format!("{:?}", b)),
        });
    }

    let (left_count, left_height) = check(node.left(), lower, Some(value))?;
    let (right_count, right_height) = check(node.right(), Some(value), upper)?;

    let actual = 1 + left_height.max(right_height);
    if node.height() != actual {
        return Err(InvariantViolation::StaleHeight {
            value: format!("{:?}", value),
            stored: node.height(),
            actual,
        });
    }

    let balance = left_height as isize - right_height as isize;
    if node.balance_factor() != balance {
        return Err(InvariantViolation::StaleBalanceFactor {
            value: format!("{:?}", value),
            stored: node.balance_factor(),
            actual: balance,
        });
    }
    if !(-1..=1).contains(&balance) {
        return Err(InvariantViolation::Unbalanced {
            value: format!("{:?}", value),
            balance_factor: balance,
        });
    }

    debug_assert_eq!(height(tree), actual);
    Ok((1 + left_count + right_count, actual))
}

/// Upper bound on AVL height for `n` nodes: 1.4405 * log2(n + 2)
pub fn height_bound(node_count: usize) -> f64 {
    1.4405 * ((node_count + 2) as f64).log2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::mutation::insert;
    use crate::tree::node::TreeNode;

    #[test]
    fn test_valid_tree_reports_count() {
        let tree = (1..=20).fold(Tree::Leaf, |tree, value| insert(tree, value));
        assert_eq!(validate(&tree), Ok(20));
        assert!(is_valid(&Tree::<i32>::Leaf));
    }

    #[test]
    fn test_detects_order_violation() {
        let bad = Tree::node(TreeNode::with_children(5, Tree::singleton(9), Tree::Leaf));
        assert!(matches!(
            validate(&bad),
            Err(InvariantViolation::OrderViolation { .. })
        ));
    }

    #[test]
    fn test_detects_unbalanced_chain() {
        let chain = Tree::node(TreeNode::with_children(
            3,
            Tree::node(TreeNode::with_children(2, Tree::singleton(1), Tree::Leaf)),
            Tree::Leaf,
        ));
        let err = validate(&chain).unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::Unbalanced {
                value: "3".to_string(),
                balance_factor: 2,
            }
        );
    }

    #[test]
    fn test_detects_stale_height() {
        let mut node = TreeNode::with_children(2, Tree::singleton(1), Tree::Leaf);
        node.height = 5;
        assert!(matches!(
            validate(&Tree::node(node)),
            Err(InvariantViolation::StaleHeight { stored: 5, actual: 2, .. })
        ));
    }

    #[test]
    fn test_height_bound_grows_logarithmically() {
        assert!(height_bound(0) >= 1.0);
        assert!(height_bound(1_000) < 15.0);
    }
}
