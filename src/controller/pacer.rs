//! Suspension point between traversal steps

use std::thread;
use std::time::Duration;

/// Suspends the controller for the animation interval after each step
pub trait Pacer {
    /// Block for `delay` (or pretend to)
    fn suspend(&mut self, delay: Duration);
}

/// Sleeps the current thread for the full delay
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn suspend(&mut self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Records suspensions without sleeping
#[derive(Debug, Default, Clone)]
pub struct RecordingPacer {
    suspensions: usize,
    total: Duration,
}

impl RecordingPacer {
    /// Create a pacer with no recorded suspensions
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of suspension points reached
    pub fn suspensions(&self) -> usize {
        self.suspensions
    }

    /// Sum of requested delays
    pub fn total_delay(&self) -> Duration {
        self.total
    }
}

impl Pacer for RecordingPacer {
    fn suspend(&mut self, delay: Duration) {
        self.suspensions += 1;
        self.total += delay;
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn suspend(&mut self, delay: Duration) {
        (**self).suspend(delay);
    }
}
