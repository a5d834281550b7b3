//! Step clock for the race
//!
//! The race advances in discrete steps. In each step every unfinished racer
//! takes exactly one action. This module provides deterministic step
//! advancement and cutoff normalization.

use serde::{Deserialize, Serialize};

/// Counts simulation steps since the start of the race
///
/// # Example
/// ```
/// use race_simulator_core_rs::StepClock;
///
/// let mut clock = StepClock::new();
/// assert_eq!(clock.current_step(), 0);
///
/// clock.advance_step();
/// assert_eq!(clock.current_step(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepClock {
    /// Total steps elapsed since the race started
    current_step: u64,
}

impl StepClock {
    /// Create a clock at step 0
    pub fn new() -> Self {
        Self { current_step: 0 }
    }

    /// Create a clock resumed at a given step (used when restoring checkpoints)
    pub fn starting_at(step: u64) -> Self {
        Self { current_step: step }
    }

    /// Advance the clock by one step
    pub fn advance_step(&mut self) {
        self.current_step += 1;
    }

    /// Get the current step (total steps since start)
    ///
    /// # Example
    /// ```
    /// use race_simulator_core_rs::StepClock;
    ///
    /// let clock = StepClock::starting_at(12);
    /// assert_eq!(clock.current_step(), 12);
    /// ```
    pub fn current_step(&self) -> u64 {
        self.current_step
    }
}

/// Normalize a caller-supplied cutoff into a step budget
///
/// Negative cutoffs mean "take no steps", not an error.
///
/// # Example
/// ```
/// use race_simulator_core_rs::core::clock::normalize_cutoff;
///
/// assert_eq!(normalize_cutoff(-5), 0);
/// assert_eq!(normalize_cutoff(0), 0);
/// assert_eq!(normalize_cutoff(42), 42);
/// ```
pub fn normalize_cutoff(cutoff: i64) -> u64 {
    u64::try_from(cutoff).unwrap_or(0)
}
