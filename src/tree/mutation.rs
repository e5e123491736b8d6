//! Mutation engine: insert, delete, update
//!
//! Every operation consumes a root and returns the new root. Callers must
//! replace their stored root with the result. Only nodes on the search
//! path are rewritten; untouched subtrees keep their `Arc` allocations.

use std::cmp::Ordering;

use super::balance::{balance_factor, into_owned, rotate_left, rotate_right};
use super::node::{Tree, TreeNode, GREATER, LESS};
use tracing::debug;

/// Insert `value`, rebalancing on the way back up
///
/// Inserting a value that is already present returns the tree unchanged.
pub fn insert<T: Ord + Clone>(root: Tree<T>, value: T) -> Tree<T> {
    insert_node(root, &value)
}

fn insert_node<T: Ord + Clone>(root: Tree<T>, value: &T) -> Tree<T> {
    let Tree::Node(shared) = root else {
        return Tree::singleton(value.clone());
    };

    let slot = match value.cmp(&shared.value) {
        Ordering::Less => LESS,
        Ordering::Greater => GREATER,
        Ordering::Equal => return Tree::Node(shared),
    };

    let mut node = into_owned(shared);
    let child = std::mem::take(&mut node.children[slot]);
    node.children[slot] = insert_node(child, value);
    node.update_height();

    rebalance_after_insert(node, value)
}

/// Four-case rebalance keyed by comparing the inserted value to the child
fn rebalance_after_insert<T: Ord + Clone>(mut node: TreeNode<T>, value: &T) -> Tree<T> {
    let balance = node.balance_factor;

    if balance > 1 {
        let Some(ordering) = node.left().value().map(|left| value.cmp(left)) else {
            return Tree::node(node);
        };
        match ordering {
            Ordering::Less => {
                debug!(case = "left-left", "rebalancing after insert");
                return rotate_right(Tree::node(node));
            }
            Ordering::Greater => {
                debug!(case = "left-right", "rebalancing after insert");
                let left = std::mem::take(&mut node.children[LESS]);
                node.children[LESS] = rotate_left(left);
                return rotate_right(Tree::node(node));
            }
            // A child rooted at the new value has height 1
            Ordering::Equal => unreachable!("fresh leaf cannot unbalance its parent"),
        }
    }

    if balance < -1 {
        let Some(ordering) = node.right().value().map(|right| value.cmp(right)) else {
            return Tree::node(node);
        };
        match ordering {
            Ordering::Greater => {
                debug!(case = "right-right", "rebalancing after insert");
                return rotate_left(Tree::node(node));
            }
            Ordering::Less => {
                debug!(case = "right-left", "rebalancing after insert");
                let right = std::mem::take(&mut node.children[GREATER]);
                node.children[GREATER] = rotate_right(right);
                return rotate_left(Tree::node(node));
            }
            Ordering::Equal => unreachable!("fresh leaf cannot unbalance its parent"),
        }
    }

    Tree::node(node)
}

/// Delete `value`; deleting an absent value is a silent no-op
pub fn delete_value<T: Ord + Clone>(root: Tree<T>, value: &T) -> Tree<T> {
    let Tree::Node(shared) = root else {
        return root;
    };

    let mut node = into_owned(shared);
    match value.cmp(&node.value) {
        Ordering::Less => {
            let child = std::mem::take(&mut node.children[LESS]);
            node.children[LESS] = delete_value(child, value);
        }
        Ordering::Greater => {
            let child = std::mem::take(&mut node.children[GREATER]);
            node.children[GREATER] = delete_value(child, value);
        }
        Ordering::Equal => {
            // Splice out when at most one child is present
            if node.left().is_leaf() {
                return std::mem::take(&mut node.children[GREATER]);
            }
            if node.right().is_leaf() {
                return std::mem::take(&mut node.children[LESS]);
            }

            // Two children: copy the in-order successor up, then remove it
            // from the greater subtree.
            let Some(successor) = min_value(node.right()).cloned() else {
                unreachable!("greater child checked above");
            };
            let child = std::mem::take(&mut node.children[GREATER]);
            node.children[GREATER] = delete_value(child, &successor);
            node.value = successor;
        }
    }

    node.update_height();
    rebalance_by_child(node)
}

/// Four-case rebalance keyed by the heavy child's balance factor
fn rebalance_by_child<T: Clone>(mut node: TreeNode<T>) -> Tree<T> {
    let balance = node.balance_factor;

    if balance > 1 {
        if balance_factor(node.left()) >= 0 {
            debug!(case = "left-left", "rebalancing after delete");
            return rotate_right(Tree::node(node));
        }
        debug!(case = "left-right", "rebalancing after delete");
        let left = std::mem::take(&mut node.children[LESS]);
        node.children[LESS] = rotate_left(left);
        return rotate_right(Tree::node(node));
    }

    if balance < -1 {
        if balance_factor(node.right()) <= 0 {
            debug!(case = "right-right", "rebalancing after delete");
            return rotate_left(Tree::node(node));
        }
        debug!(case = "right-left", "rebalancing after delete");
        let right = std::mem::take(&mut node.children[GREATER]);
        node.children[GREATER] = rotate_right(right);
        return rotate_left(Tree::node(node));
    }

    Tree::node(node)
}

/// Replace `old` with `new` as delete followed by insert
///
/// Always pays two full rebalancing passes, even when `new` would fit in
/// `old`'s position.
pub fn update_value<T: Ord + Clone>(root: Tree<T>, old: &T, new: T) -> Tree<T> {
    insert(delete_value(root, old), new)
}

/// Search for `value`
pub fn contains<T: Ord>(root: &Tree<T>, value: &T) -> bool {
    let mut current = root;
    while let Tree::Node(node) = current {
        match value.cmp(&node.value) {
            Ordering::Less => current = node.left(),
            Ordering::Greater => current = node.right(),
            Ordering::Equal => return true,
        }
    }
    false
}

/// Leftmost value of a subtree
pub fn min_value<T>(root: &Tree<T>) -> Option<&T> {
    let mut node = root.as_node()?;
    while let Some(next) = node.left().as_node() {
        node = next;
    }
    Some(node.value())
}

/// Rightmost value of a subtree
pub fn max_value<T>(root: &Tree<T>) -> Option<&T> {
    let mut node = root.as_node()?;
    while let Some(next) = node.right().as_node() {
        node = next;
    }
    Some(node.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::traversal::{collect_values, TraversalKind};

    fn build(values: &[i32]) -> Tree<i32> {
        values
            .iter()
            .fold(Tree::Leaf, |tree, &value| insert(tree, value))
    }

    fn root_of(tree: &Tree<i32>) -> &TreeNode<i32> {
        tree.as_node().expect("non-empty tree")
    }

    #[test]
    fn test_insert_into_empty() {
        let tree = insert(Tree::Leaf, 42);
        let root = root_of(&tree);
        assert_eq!(root.value(), &42);
        assert_eq!(root.height(), 1);
        assert_eq!(root.balance_factor(), 0);
    }

    #[test]
    fn test_right_right_case() {
        let tree = build(&[10, 20, 30]);
        let root = root_of(&tree);
        assert_eq!(root.value(), &20);
        assert_eq!(root.left().value(), Some(&10));
        assert_eq!(root.right().value(), Some(&30));
        assert_eq!(root.balance_factor(), 0);
        assert_eq!(balance_factor(root.left()), 0);
        assert_eq!(balance_factor(root.right()), 0);
    }

    #[test]
    fn test_left_right_case() {
        let tree = build(&[30, 10, 20]);
        let root = root_of(&tree);
        assert_eq!(root.value(), &20);
        assert_eq!(root.left().value(), Some(&10));
        assert_eq!(root.right().value(), Some(&30));
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let tree = build(&[5, 3, 8]);
        let again = insert(tree.clone(), 3);
        assert_eq!(tree, again);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let tree = build(&[5, 3, 8]);
        let after = delete_value(tree.clone(), &99);
        assert_eq!(tree, after);
        assert_eq!(delete_value(Tree::<i32>::Leaf, &1), Tree::Leaf);
    }

    #[test]
    fn test_delete_with_two_children_uses_successor() {
        let tree = build(&[20, 10, 30, 25, 35]);
        let tree = delete_value(tree, &20);
        assert_eq!(root_of(&tree).value(), &25);
        assert_eq!(collect_values(TraversalKind::InOrder, &tree), vec![10, 25, 30, 35]);
    }

    #[test]
    fn test_update_moves_value() {
        let tree = build(&[10, 5, 15]);
        let tree = update_value(tree, &5, 20);
        assert!(!contains(&tree, &5));
        assert!(contains(&tree, &20));
        assert_eq!(collect_values(TraversalKind::InOrder, &tree), vec![10, 15, 20]);
    }

    #[test]
    fn test_min_max() {
        let tree = build(&[8, 4, 12, 2, 6, 10, 14]);
        assert_eq!(min_value(&tree), Some(&2));
        assert_eq!(max_value(&tree), Some(&14));
        assert_eq!(min_value(&Tree::<i32>::Leaf), None);
    }

    #[test]
    fn test_mutation_preserves_shared_snapshot() {
        let tree = build(&[1, 2, 3, 4, 5]);
        let snapshot = tree.clone();
        let tree = insert(tree, 6);
        let tree = delete_value(tree, &2);

        assert_eq!(collect_values(TraversalKind::InOrder, &snapshot), vec![1, 2, 3, 4, 5]);
        assert_eq!(collect_values(TraversalKind::InOrder, &tree), vec![1, 3, 4, 5, 6]);
    }
}
