//! Step-observable traversal
//!
//! A walk is a lazy sequence of visits pulled one at a time. It owns an
//! `Arc` snapshot of the root, so the caller may keep mutating its own tree
//! while a walk is in flight.
//!
//! Depth-first orders share one frontier: `Expand(n)` pushes `n`'s visit
//! and children in reverse of the desired order, `Visit(n)` emits `n`.
//! Level order pops from the front and emits on expansion.

use std::collections::VecDeque;
use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;
use std::sync::Arc;

use super::node::{Tree, TreeNode};
use thiserror::Error;

/// Order in which a walk visits nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum TraversalKind {
    /// Less subtree, self, greater subtree (ascending)
    InOrder,

    /// Self, less subtree, greater subtree
    PreOrder,

    /// Less subtree, greater subtree, self
    PostOrder,

    /// Breadth-first, level by level
    LevelOrder,
}

impl TraversalKind {
    /// Every supported order
    pub const ALL: [TraversalKind; 4] = [
        TraversalKind::InOrder,
        TraversalKind::PreOrder,
        TraversalKind::PostOrder,
        TraversalKind::LevelOrder,
    ];

    /// Canonical kebab-case name
    pub fn name(self) -> &'static str {
        match self {
            TraversalKind::InOrder => "in-order",
            TraversalKind::PreOrder => "pre-order",
            TraversalKind::PostOrder => "post-order",
            TraversalKind::LevelOrder => "level-order",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised traversal name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown traversal order '{0}' (expected in-order, pre-order, post-order or level-order)")]
pub struct ParseTraversalKindError(pub String);

impl FromStr for TraversalKind {
    type Err = ParseTraversalKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "in-order" | "inorder" | "in" => Ok(TraversalKind::InOrder),
            "pre-order" | "preorder" | "pre" => Ok(TraversalKind::PreOrder),
            "post-order" | "postorder" | "post" => Ok(TraversalKind::PostOrder),
            "level-order" | "levelorder" | "level" | "bfs" => Ok(TraversalKind::LevelOrder),
            _ => Err(ParseTraversalKindError(s.to_string())),
        }
    }
}

/// A single visit emitted by a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<T> {
    /// 0-based position in walk order
    pub index: usize,

    /// Visited value
    pub value: T,

    /// Human-readable description of the visit
    pub label: String,
}

enum Frame<T> {
    Expand(Arc<TreeNode<T>>),
    Visit(Arc<TreeNode<T>>),
}

impl<T> fmt::Debug for Frame<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Expand(node) => write!(f, "Expand(h={})", node.height()),
            Frame::Visit(node) => write!(f, "Visit(h={})", node.height()),
        }
    }
}

/// Lazy traversal over a snapshot of a tree
///
/// Finite and not restartable: create a new walk to start over.
#[derive(Debug)]
pub struct Walk<T> {
    kind: TraversalKind,
    frontier: VecDeque<Frame<T>>,
    emitted: usize,
}

impl<T> Walk<T> {
    /// Start a walk at `root`
    pub fn new(kind: TraversalKind, root: &Tree<T>) -> Self {
        let mut frontier = VecDeque::new();
        if let Tree::Node(node) = root {
            frontier.push_back(Frame::Expand(Arc::clone(node)));
        }
        Self {
            kind,
            frontier,
            emitted: 0,
        }
    }

    /// Order of this walk
    pub fn kind(&self) -> TraversalKind {
        self.kind
    }

    /// Steps emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn push_child(&mut self, child: &Tree<T>) {
        if let Tree::Node(node) = child {
            self.frontier.push_back(Frame::Expand(Arc::clone(node)));
        }
    }

    /// Next node to visit, in walk order
    fn next_node(&mut self) -> Option<Arc<TreeNode<T>>> {
        if self.kind == TraversalKind::LevelOrder {
            let (Frame::Expand(node) | Frame::Visit(node)) = self.frontier.pop_front()?;
            self.push_child(node.left());
            self.push_child(node.right());
            return Some(node);
        }

        loop {
            let node = match self.frontier.pop_back()? {
                Frame::Visit(node) => return Some(node),
                Frame::Expand(node) => node,
            };

            // Stack order: pushed last is visited first
            match self.kind {
                TraversalKind::PreOrder => {
                    self.push_child(node.right());
                    self.push_child(node.left());
                    self.frontier.push_back(Frame::Visit(node));
                }
                TraversalKind::InOrder => {
                    self.push_child(node.right());
                    let left = node.left().clone();
                    self.frontier.push_back(Frame::Visit(node));
                    self.push_child(&left);
                }
                TraversalKind::PostOrder => {
                    let (left, right) = (node.left().clone(), node.right().clone());
                    self.frontier.push_back(Frame::Visit(node));
                    self.push_child(&right);
                    self.push_child(&left);
                }
                TraversalKind::LevelOrder => unreachable!("handled above"),
            }
        }
    }
}

impl<T: Clone + fmt::Display> Iterator for Walk<T> {
    type Item = Step<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next_node()?;
        let index = self.emitted;
        self.emitted += 1;
        Some(Step {
            index,
            value: node.value().clone(),
            label: step_label(self.kind, index, node.value()),
        })
    }
}

/// Describe a visit, e.g. `in-order step 3: visit 20`
pub fn step_label<T: fmt::Display>(kind: TraversalKind, index: usize, value: &T) -> String {
    format!("{} step {}: visit {}", kind, index + 1, value)
}

/// Walk `root` in `kind` order, handing every visit to `on_step`
///
/// The callback returns before the walk advances; returning
/// `ControlFlow::Break` stops the walk and is passed back to the caller.
pub fn traverse<T, F>(kind: TraversalKind, root: &Tree<T>, mut on_step: F) -> ControlFlow<()>
where
    T: Clone + fmt::Display,
    F: FnMut(&Step<T>) -> ControlFlow<()>,
{
    for step in Walk::new(kind, root) {
        on_step(&step)?;
    }
    ControlFlow::Continue(())
}

/// Values of `root` in `kind` order
pub fn collect_values<T: Clone>(kind: TraversalKind, root: &Tree<T>) -> Vec<T> {
    let mut walk = Walk::new(kind, root);
    std::iter::from_fn(|| walk.next_node())
        .map(|node| node.value().clone())
        .collect()
}
