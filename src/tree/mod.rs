//! Self-balancing AVL tree
//!
//! Persistent representation: every mutation returns a new root and
//! path-copies only nodes shared with another root. Cloning a tree is
//! O(1), which is how traversals take their snapshot.
//!
//! Free functions in [`mutation`] follow the "take a root, return a new
//! root" contract; [`AvlTree`] wraps a root with size tracking and debug
//! invariant checks.

pub mod audit;
pub mod balance;
pub mod mutation;
mod node;
pub mod render;
pub mod traversal;

pub use audit::InvariantViolation;
pub use mutation::{delete_value, insert, update_value};
pub use node::{Tree, TreeNode, GREATER, LESS};
pub use render::TreeSnapshot;
pub use traversal::{traverse, Step, TraversalKind, Walk};

use std::fmt;
use tracing::debug;

/// Owned AVL tree handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlTree<T> {
    /// Current root (replaced after every mutation)
    root: Tree<T>,

    /// Number of stored values
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self {
            root: Tree::Leaf,
            len: 0,
        }
    }
}

impl<T> AvlTree<T> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Current root
    pub fn root(&self) -> &Tree<T> {
        &self.root
    }

    /// Give up the handle and keep the root
    pub fn into_root(self) -> Tree<T> {
        self.root
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root (0 when empty)
    pub fn height(&self) -> usize {
        balance::height(&self.root)
    }

    /// Ascending iterator over stored values
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(&self.root);
        iter
    }

    /// Lazy walk over a snapshot of the current root
    pub fn walk(&self, kind: TraversalKind) -> Walk<T> {
        Walk::new(kind, &self.root)
    }
}

impl<T: Ord> AvlTree<T> {
    /// Search for `value`
    pub fn contains(&self, value: &T) -> bool {
        mutation::contains(&self.root, value)
    }

    /// Smallest stored value
    pub fn min(&self) -> Option<&T> {
        mutation::min_value(&self.root)
    }

    /// Largest stored value
    pub fn max(&self) -> Option<&T> {
        mutation::max_value(&self.root)
    }
}

impl<T: Ord + Clone + fmt::Debug> AvlTree<T> {
    /// Adopt an existing root, validating it first
    pub fn from_root(root: Tree<T>) -> Result<Self, InvariantViolation> {
        let len = audit::validate(&root)?;
        Ok(Self { root, len })
    }

    /// Insert `value`; returns `false` if it was already present
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            debug!(?value, "insert skipped: duplicate");
            return false;
        }
        debug!(?value, "insert");
        let root = std::mem::take(&mut self.root);
        self.root = mutation::insert(root, value);
        self.len += 1;
        self.debug_check();
        true
    }

    /// Remove `value`; returns `false` if it was absent
    pub fn remove(&mut self, value: &T) -> bool {
        if !self.contains(value) {
            debug!(?value, "remove skipped: absent");
            return false;
        }
        debug!(?value, "remove");
        let root = std::mem::take(&mut self.root);
        self.root = mutation::delete_value(root, value);
        self.len -= 1;
        self.debug_check();
        true
    }

    /// Replace `old` with `new` (delete, then insert)
    ///
    /// Both passes always run, even when `old == new`, so the shape matches
    /// [`update_value`]. Returns `true` if `old` was removed or `new` was
    /// inserted.
    pub fn update(&mut self, old: &T, new: T) -> bool {
        let removed = self.contains(old);
        let before = self.len;
        debug!(?old, ?new, "update");

        let root = std::mem::take(&mut self.root);
        let root = mutation::delete_value(root, old);
        let inserted = !mutation::contains(&root, &new);
        self.root = mutation::insert(root, new);

        self.len = before - usize::from(removed) + usize::from(inserted);
        self.debug_check();
        removed || inserted
    }

    /// Full invariant check
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        audit::validate(&self.root)
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(violation) = self.validate() {
                panic!("AVL invariant broken: {}", violation);
            }
            debug_assert_eq!(self.len, self.root.node_count());
        }
    }
}

impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::render_text(&self.root))
    }
}

impl<T: Ord + Clone + fmt::Debug> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Clone + fmt::Debug> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending borrowed iterator over an [`AvlTree`]
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a TreeNode<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left(&mut self, mut tree: &'a Tree<T>) {
        while let Some(node) = tree.as_node() {
            self.stack.push(node);
            tree = node.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right());
        Some(node.value())
    }
}
