//! # Step-observable AVL tree engine
//!
//! Self-balancing binary search tree with an interruptible traversal
//! protocol, built for animating classic data structures.
//!
//! ## Core Algorithm
//!
//! 1. **Persistent nodes**: children are `Leaf | Node(Arc<..>)`, so a root
//!    snapshot is O(1) and mutation path-copies only shared nodes
//! 2. **Rotation rebalancing**: insert/delete restore |balance| ≤ 1 with
//!    the four classic single/double rotation cases
//! 3. **Lazy walks**: in/pre/post/level-order as pull-based step sequences
//! 4. **Controller**: start/pause/resume/reset over one suspension point
//!    per visited node
//!
//! ## Usage Example
//!
//! ```
//! use arbor::{AnimationConfig, AvlTree, RecordingPacer, RunState, TraversalController, TraversalKind};
//! use arbor::controller::NullObserver;
//!
//! let tree: AvlTree<i64> = [10, 20, 30].into_iter().collect();
//! assert_eq!(tree.root().value(), Some(&20));
//!
//! let mut controller = TraversalController::with_pacer(AnimationConfig::default(), RecordingPacer::new());
//! controller.start(TraversalKind::InOrder, tree.root()).unwrap();
//! assert_eq!(controller.run(&mut NullObserver).unwrap(), RunState::Complete);
//! assert_eq!(controller.visited_sequence(), &[10, 20, 30]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod tree;       // Nodes, balance primitives, mutation, traversal
pub mod controller; // Traversal state machine
pub mod input;      // Text input boundary

// Re-exports for convenience
pub use controller::{
    ControllerError, Pacer, PauseHandle, RecordingPacer, RunState, SleepPacer, StepObserver,
    TraversalController, TraversalState,
};
pub use input::{parse_value, parse_values, InputError, ValueBounds};
pub use tree::{
    delete_value, insert, traverse, update_value, AvlTree, InvariantViolation, Step,
    TraversalKind, Tree, TreeNode, TreeSnapshot, Walk,
};

use std::time::Duration;

/// Default pause between traversal steps
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(500);

/// Animation settings for the traversal controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Suspension after each visited node
    pub step_delay: Duration,

    /// Log every step at info level instead of debug
    pub verbose: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            verbose: false,
        }
    }
}

impl AnimationConfig {
    /// Configuration with a step delay in milliseconds
    pub fn from_millis(step_delay_ms: u64) -> Self {
        Self::default().with_step_delay(Duration::from_millis(step_delay_ms))
    }

    /// Set the step delay
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Enable verbose step logging
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Total suspension time for a complete run over `node_count` nodes
    ///
    /// `None` if the total does not fit in a `Duration`.
    pub fn run_duration(&self, node_count: usize) -> Option<Duration> {
        let steps = u32::try_from(node_count).ok()?;
        self.step_delay.checked_mul(steps)
    }
}
