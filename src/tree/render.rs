//! Rendering helpers for the drawing layer
//!
//! `render_text` draws the tree sideways with box-drawing connectors,
//! less child first. `TreeSnapshot` flattens the tree into pre-order
//! records that a renderer can lay out without touching `Arc`s.

use std::fmt::{self, Write};

use super::node::{Tree, TreeNode, GREATER, LESS};

/// Which slot of its parent a node occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Side {
    /// Tree root
    Root,
    /// `children[0]`
    Less,
    /// `children[1]`
    Greater,
}

/// One node as seen by a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeSnapshot<T> {
    /// Stored value
    pub value: T,
    /// Stored height
    pub height: usize,
    /// Stored balance factor
    pub balance_factor: isize,
    /// Distance from the root (root = 0)
    pub depth: usize,
    /// Index of the parent record in `TreeSnapshot::nodes`
    pub parent: Option<usize>,
    /// Slot under the parent
    pub side: Side,
}

/// Flattened pre-order view of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeSnapshot<T> {
    /// Node records in pre-order
    pub nodes: Vec<NodeSnapshot<T>>,
}

impl<T: Clone> TreeSnapshot<T> {
    /// Capture `root`
    pub fn capture(root: &Tree<T>) -> Self {
        let mut nodes = Vec::new();
        let mut stack = Vec::new();
        if let Some(node) = root.as_node() {
            stack.push((node, 0usize, None, Side::Root));
        }

        while let Some((node, depth, parent, side)) = stack.pop() {
            let index = nodes.len();
            nodes.push(NodeSnapshot {
                value: node.value().clone(),
                height: node.height(),
                balance_factor: node.balance_factor(),
                depth,
                parent,
                side,
            });
            if let Some(right) = node.children()[GREATER].as_node() {
                stack.push((right, depth + 1, Some(index), Side::Greater));
            }
            if let Some(left) = node.children()[LESS].as_node() {
                stack.push((left, depth + 1, Some(index), Side::Less));
            }
        }

        Self { nodes }
    }

    /// Deepest level + 1 (0 when empty)
    pub fn levels(&self) -> usize {
        self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0)
    }
}

/// Sideways text drawing of a tree
pub fn render_text<T: fmt::Display>(root: &Tree<T>) -> String {
    let mut out = String::new();
    match root.as_node() {
        None => out.push_str("(empty)\n"),
        Some(node) => {
            let _ = writeln!(out, "{}", node);
            render_children(&mut out, node, "");
        }
    }
    out
}

fn render_children<T: fmt::Display>(out: &mut String, node: &TreeNode<T>, prefix: &str) {
    if node.is_leaf_node() {
        return;
    }
    let slots = [(node.left(), false), (node.right(), true)];
    for (child, last) in slots {
        let connector = if last { "└── " } else { "├── " };
        match child.as_node() {
            None => {
                let _ = writeln!(out, "{}{}·", prefix, connector);
            }
            Some(child_node) => {
                let _ = writeln!(out, "{}{}{}", prefix, connector, child_node);
                let extension = if last { "    " } else { "│   " };
                render_children(out, child_node, &format!("{}{}", prefix, extension));
            }
        }
    }
}
