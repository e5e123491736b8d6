//! Traversal controller
//!
//! State machine driving a [`Walk`] one suspension point at a time:
//!
//! ```text
//! Idle ──start──▶ Running ──(walk exhausted)──▶ Complete ──start──▶ Running
//!                   │  ▲
//!             pause │  │ resume (restarts from the first node)
//!                   ▼  │
//!                  Paused
//! any state ──reset──▶ Idle
//! ```
//!
//! Pausing is cooperative: the flag is read after the suspension that
//! follows each visit, and the walk position is discarded. Resume starts a
//! fresh walk of the same order; already-visited values are not appended
//! twice.

mod pacer;

pub use pacer::{Pacer, RecordingPacer, SleepPacer};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::tree::{Step, TraversalKind, Tree, Walk};
use crate::AnimationConfig;
use thiserror::Error;
use tracing::{debug, info};

/// Lifecycle of a traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum RunState {
    /// No run in progress
    #[default]
    Idle,
    /// Steps are being pulled
    Running,
    /// Stopped at a suspension point on request
    Paused,
    /// Walk exhausted
    Complete,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Errors raised by the controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// Requested action is not allowed in the current state
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// Attempted action
        action: &'static str,
        /// State at the time of the attempt
        state: RunState,
    },
}

/// Observable animation state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TraversalState<T> {
    /// Most recently visited value
    pub current_value: Option<T>,
    /// Visited values in visit order, without duplicates
    pub visited_sequence: Vec<T>,
    /// Lifecycle state
    pub run_state: RunState,
}

impl<T> Default for TraversalState<T> {
    fn default() -> Self {
        Self {
            current_value: None,
            visited_sequence: Vec::new(),
            run_state: RunState::Idle,
        }
    }
}

impl<T> TraversalState<T> {
    fn clear(&mut self) {
        self.current_value = None;
        self.visited_sequence.clear();
    }
}

/// Receives every visit right after the state has been updated
pub trait StepObserver<T> {
    /// Called once per visit, before the suspension point
    fn on_step(&mut self, step: &Step<T>, state: &TraversalState<T>);
}

/// Observer that ignores every step
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl<T> StepObserver<T> for NullObserver {
    fn on_step(&mut self, _step: &Step<T>, _state: &TraversalState<T>) {}
}

impl<T, F> StepObserver<T> for F
where
    F: FnMut(&Step<T>, &TraversalState<T>),
{
    fn on_step(&mut self, step: &Step<T>, state: &TraversalState<T>) {
        self(step, state)
    }
}

/// Shared pause request flag
///
/// Clones share the flag, so an observer or another thread can ask a
/// running controller to stop at its next suspension point.
#[derive(Debug, Clone, Default)]
pub struct PauseHandle {
    requested: Arc<AtomicBool>,
}

impl PauseHandle {
    /// Ask the controller to pause at the next suspension point
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Whether a pause is pending
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.requested.store(false, Ordering::SeqCst);
    }

    fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }
}

/// Start/pause/resume/reset orchestration of a traversal run
#[derive(Debug)]
pub struct TraversalController<T, P = SleepPacer> {
    config: AnimationConfig,
    state: TraversalState<T>,
    /// Index over `state.visited_sequence` for the dedup check
    seen: BTreeSet<T>,
    kind: Option<TraversalKind>,
    walk: Option<Walk<T>>,
    pause: PauseHandle,
    pacer: P,
}

impl<T> TraversalController<T, SleepPacer> {
    /// Controller that sleeps for `config.step_delay` after each visit
    pub fn new(config: AnimationConfig) -> Self {
        Self::with_pacer(config, SleepPacer)
    }
}

impl<T, P: Pacer> TraversalController<T, P> {
    /// Controller with a custom suspension strategy
    pub fn with_pacer(config: AnimationConfig, pacer: P) -> Self {
        Self {
            config,
            state: TraversalState::default(),
            seen: BTreeSet::new(),
            kind: None,
            walk: None,
            pause: PauseHandle::default(),
            pacer,
        }
    }

    /// Observable state
    pub fn state(&self) -> &TraversalState<T> {
        &self.state
    }

    /// Most recently visited value
    pub fn current_value(&self) -> Option<&T> {
        self.state.current_value.as_ref()
    }

    /// Visited values in visit order
    pub fn visited_sequence(&self) -> &[T] {
        &self.state.visited_sequence
    }

    /// Lifecycle state
    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    /// Order of the current or last run
    pub fn kind(&self) -> Option<TraversalKind> {
        self.kind
    }

    /// Animation settings
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Suspension strategy
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Handle for requesting a pause from an observer or another thread
    pub fn pause_handle(&self) -> PauseHandle {
        self.pause.clone()
    }

    /// Request a pause; only valid while running
    ///
    /// Takes effect at the next suspension point.
    pub fn pause(&mut self) -> Result<(), ControllerError> {
        self.expect_state("pause", &[RunState::Running])?;
        self.pause.request();
        Ok(())
    }

    /// Drop any run and clear all state (valid from every state)
    pub fn reset(&mut self) {
        info!(from = %self.state.run_state, "traversal reset");
        self.walk = None;
        self.kind = None;
        self.pause.clear();
        self.state.clear();
        self.seen.clear();
        self.state.run_state = RunState::Idle;
    }

    fn expect_state(
        &self,
        action: &'static str,
        allowed: &[RunState],
    ) -> Result<(), ControllerError> {
        if allowed.contains(&self.state.run_state) {
            Ok(())
        } else {
            Err(ControllerError::InvalidTransition {
                action,
                state: self.state.run_state,
            })
        }
    }
}

impl<T, P> TraversalController<T, P>
where
    T: Ord + Clone + fmt::Display,
    P: Pacer,
{
    /// Begin a run over a snapshot of `root`
    ///
    /// Only valid from `Idle` or `Complete`; clears the previous run.
    pub fn start(&mut self, kind: TraversalKind, root: &Tree<T>) -> Result<(), ControllerError> {
        self.expect_state("start", &[RunState::Idle, RunState::Complete])?;
        info!(%kind, "traversal started");
        self.state.clear();
        self.seen.clear();
        self.begin(kind, root);
        Ok(())
    }

    /// Continue a paused run
    ///
    /// The walk restarts from the first node of `root`; the visited
    /// sequence is kept.
    pub fn resume(&mut self, root: &Tree<T>) -> Result<(), ControllerError> {
        self.expect_state("resume", &[RunState::Paused])?;
        let kind = self.kind.unwrap_or(TraversalKind::InOrder);
        info!(%kind, visited = self.state.visited_sequence.len(), "traversal resumed from the first node");
        self.begin(kind, root);
        Ok(())
    }

    fn begin(&mut self, kind: TraversalKind, root: &Tree<T>) {
        self.kind = Some(kind);
        self.walk = Some(Walk::new(kind, root));
        self.pause.clear();
        self.state.run_state = RunState::Running;
    }

    /// Pull one visit
    ///
    /// Updates the observable state, notifies `observer`, suspends, then
    /// honours a pending pause. Returns `None` once the walk is exhausted
    /// (the run is then `Complete`).
    pub fn step<O>(&mut self, observer: &mut O) -> Result<Option<Step<T>>, ControllerError>
    where
        O: StepObserver<T> + ?Sized,
    {
        self.expect_state("step", &[RunState::Running])?;

        let Some(step) = self.walk.as_mut().and_then(|walk| walk.next()) else {
            self.walk = None;
            self.state.run_state = RunState::Complete;
            info!(visited = self.state.visited_sequence.len(), "traversal complete");
            return Ok(None);
        };

        self.state.current_value = Some(step.value.clone());
        if self.seen.insert(step.value.clone()) {
            self.state.visited_sequence.push(step.value.clone());
        }
        if self.config.verbose {
            info!(index = step.index, label = %step.label, "step");
        } else {
            debug!(index = step.index, label = %step.label, "step");
        }
        observer.on_step(&step, &self.state);

        self.pacer.suspend(self.config.step_delay);

        if self.pause.take() {
            self.walk = None;
            self.state.run_state = RunState::Paused;
            info!(at = %step.value, "traversal paused");
        }
        Ok(Some(step))
    }

    /// Pull visits until the run pauses or completes
    pub fn run<O>(&mut self, observer: &mut O) -> Result<RunState, ControllerError>
    where
        O: StepObserver<T> + ?Sized,
    {
        self.expect_state("run", &[RunState::Running])?;
        while self.state.run_state == RunState::Running {
            self.step(observer)?;
        }
        Ok(self.state.run_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::traversal::collect_values;
    use crate::tree::AvlTree;
    use std::time::Duration;

    fn controller() -> TraversalController<i32, RecordingPacer> {
        TraversalController::with_pacer(AnimationConfig::default(), RecordingPacer::new())
    }

    fn sample() -> AvlTree<i32> {
        [4, 2, 6, 1, 3, 5, 7].into_iter().collect()
    }

    #[test]
    fn test_full_run_completes() {
        let tree = sample();
        let mut ctl = controller();
        ctl.start(TraversalKind::InOrder, tree.root()).unwrap();
        let state = ctl.run(&mut NullObserver).unwrap();

        assert_eq!(state, RunState::Complete);
        assert_eq!(ctl.visited_sequence(), &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(ctl.current_value(), Some(&7));
        assert_eq!(ctl.pacer().suspensions(), 7);
        assert_eq!(ctl.pacer().total_delay(), Duration::from_millis(3500));
    }

    #[test]
    fn test_start_rejected_while_running() {
        let tree = sample();
        let mut ctl = controller();
        ctl.start(TraversalKind::PreOrder, tree.root()).unwrap();
        let err = ctl.start(TraversalKind::InOrder, tree.root()).unwrap_err();
        assert_eq!(
            err,
            ControllerError::InvalidTransition {
                action: "start",
                state: RunState::Running,
            }
        );
        assert_eq!(err.to_string(), "cannot start while running");
    }

    #[test]
    fn test_pause_only_while_running() {
        let mut ctl = controller();
        assert!(ctl.pause().is_err());
        assert!(ctl.resume(&Tree::Leaf).is_err());
        assert!(ctl.step(&mut NullObserver).is_err());
    }

    #[test]
    fn test_pause_takes_effect_after_step() {
        let tree = sample();
        let mut ctl = controller();
        ctl.start(TraversalKind::LevelOrder, tree.root()).unwrap();

        ctl.step(&mut NullObserver).unwrap();
        ctl.pause().unwrap();
        assert_eq!(ctl.run_state(), RunState::Running);

        let step = ctl.step(&mut NullObserver).unwrap().unwrap();
        assert_eq!(step.value, 2);
        assert_eq!(ctl.run_state(), RunState::Paused);
        assert_eq!(ctl.visited_sequence(), &[4, 2]);
    }

    #[test]
    fn test_empty_tree_completes_immediately() {
        let mut ctl = controller();
        ctl.start(TraversalKind::InOrder, &Tree::Leaf).unwrap();
        assert_eq!(ctl.step(&mut NullObserver).unwrap(), None);
        assert_eq!(ctl.run_state(), RunState::Complete);
        assert_eq!(ctl.pacer().suspensions(), 0);
    }

    #[test]
    fn test_large_run_after_resume_keeps_sequence_unique() {
        let tree: AvlTree<i32> = (0..2_000).collect();
        let mut ctl = controller();
        ctl.start(TraversalKind::PostOrder, tree.root()).unwrap();
        for _ in 0..1_000 {
            ctl.step(&mut NullObserver).unwrap();
        }
        ctl.pause().unwrap();
        ctl.step(&mut NullObserver).unwrap();
        assert_eq!(ctl.run_state(), RunState::Paused);
        assert_eq!(ctl.visited_sequence().len(), 1_001);

        ctl.resume(tree.root()).unwrap();
        assert_eq!(ctl.run(&mut NullObserver).unwrap(), RunState::Complete);
        assert_eq!(ctl.visited_sequence().len(), 2_000);
        let expected = collect_values(TraversalKind::PostOrder, tree.root());
        assert_eq!(ctl.visited_sequence(), expected.as_slice());
    }

    #[test]
    fn test_reset_from_any_state() {
        let tree = sample();
        let mut ctl = controller();
        ctl.start(TraversalKind::InOrder, tree.root()).unwrap();
        ctl.step(&mut NullObserver).unwrap();
        ctl.reset();

        assert_eq!(ctl.run_state(), RunState::Idle);
        assert!(ctl.visited_sequence().is_empty());
        assert_eq!(ctl.current_value(), None);
        assert_eq!(ctl.kind(), None);
        ctl.reset();
        assert_eq!(ctl.run_state(), RunState::Idle);
    }
}
