//! AVL tree node representation
//!
//! Tree = Leaf | Node { value, children: [less, greater], height, balance }
//! Empty child slots are the `Leaf` variant, never an allocation.
//! Nodes are shared through `Arc`; mutation path-copies shared nodes.

use std::fmt;
use std::sync::Arc;

/// Child slot holding values strictly less than the node's value
pub const LESS: usize = 0;

/// Child slot holding values strictly greater than the node's value
pub const GREATER: usize = 1;

/// A (sub)tree: either an empty leaf slot or a shared internal node
#[derive(Debug, PartialEq, Eq)]
pub enum Tree<T> {
    /// Empty slot (height 0)
    Leaf,

    /// Internal node
    Node(Arc<TreeNode<T>>),
}

// Cloning shares the node, so no `T: Clone` bound
impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        match self {
            Tree::Leaf => Tree::Leaf,
            Tree::Node(node) => Tree::Node(Arc::clone(node)),
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::Leaf
    }
}

/// Internal tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    /// Stored key
    pub(crate) value: T,

    /// `[less, greater]` subtrees
    pub(crate) children: [Tree<T>; 2],

    /// 1 + max(child heights)
    pub(crate) height: usize,

    /// height(less) - height(greater)
    pub(crate) balance_factor: isize,
}

impl<T> TreeNode<T> {
    /// Create a node with no children (height 1, balanced)
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            children: [Tree::Leaf, Tree::Leaf],
            height: 1,
            balance_factor: 0,
        }
    }

    /// Create a node over existing subtrees with heights computed from them
    pub fn with_children(value: T, less: Tree<T>, greater: Tree<T>) -> Self {
        let mut node = Self {
            value,
            children: [less, greater],
            height: 0,
            balance_factor: 0,
        };
        node.update_height();
        node
    }

    /// Stored value
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Both child slots, index 0 = less, index 1 = greater
    #[inline]
    pub fn children(&self) -> &[Tree<T>; 2] {
        &self.children
    }

    /// Less-than subtree
    #[inline]
    pub fn left(&self) -> &Tree<T> {
        &self.children[LESS]
    }

    /// Greater-than subtree
    #[inline]
    pub fn right(&self) -> &Tree<T> {
        &self.children[GREATER]
    }

    /// Stored height
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Stored balance factor
    #[inline]
    pub fn balance_factor(&self) -> isize {
        self.balance_factor
    }

    /// Whether both child slots are empty
    #[inline]
    pub fn is_leaf_node(&self) -> bool {
        self.children[LESS].is_leaf() && self.children[GREATER].is_leaf()
    }
}

impl<T> Tree<T> {
    /// Wrap a node into a tree
    pub fn node(node: TreeNode<T>) -> Self {
        Tree::Node(Arc::new(node))
    }

    /// Single-node tree
    pub fn singleton(value: T) -> Self {
        Tree::node(TreeNode::leaf(value))
    }

    /// Check if this slot is empty
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf)
    }

    /// Borrow the node, if any
    #[inline]
    pub fn as_node(&self) -> Option<&TreeNode<T>> {
        match self {
            Tree::Leaf => None,
            Tree::Node(node) => Some(node),
        }
    }

    /// Value at the root of this subtree
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.as_node().map(TreeNode::value)
    }

    /// Number of internal nodes (O(n))
    pub fn node_count(&self) -> usize {
        match self {
            Tree::Leaf => 0,
            Tree::Node(node) => 1 + node.left().node_count() + node.right().node_count(),
        }
    }

    /// Whether two trees share the same root allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tree::Leaf, Tree::Leaf) => true,
            (Tree::Node(a), Tree::Node(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: fmt::Display> fmt::Display for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (h={}, bf={})",
            self.value, self.height, self.balance_factor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_node_shape() {
        let node = TreeNode::leaf(7);
        assert_eq!(node.height(), 1);
        assert_eq!(node.balance_factor(), 0);
        assert!(node.is_leaf_node());
        assert!(node.left().is_leaf());
        assert!(node.right().is_leaf());
    }

    #[test]
    fn test_with_children_heights() {
        let less = Tree::singleton(1);
        let node = TreeNode::with_children(2, less, Tree::Leaf);
        assert_eq!(node.height(), 2);
        assert_eq!(node.balance_factor(), 1);
        assert_eq!(node.to_string(), "2 (h=2, bf=1)");
    }

    #[test]
    fn test_clone_shares_without_cloning_values() {
        // Not `Clone`: only the `Arc` is duplicated
        #[derive(Debug, PartialEq, Eq)]
        struct Opaque(u8);

        let tree = Tree::singleton(Opaque(1));
        let shared = tree.clone();
        assert!(tree.ptr_eq(&shared));
        assert_eq!(shared.value(), Some(&Opaque(1)));
    }

    #[test]
    fn test_ptr_eq_tracks_sharing() {
        let tree = Tree::singleton(3);
        let shared = tree.clone();
        let rebuilt = Tree::singleton(3);

        assert!(tree.ptr_eq(&shared));
        assert!(!tree.ptr_eq(&rebuilt));
        assert_eq!(tree, rebuilt);
        assert_eq!(tree.node_count(), 1);
    }
}
