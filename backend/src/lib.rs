//! Race Simulator Core - Rust Engine
//!
//! Turn-based race among four competitors whose movement strategies mirror
//! time-complexity classes: O(N), O(N^2), O(log N) and O(N log N).
//!
//! # Architecture
//!
//! - **core**: Step clock and cutoff handling
//! - **models**: Domain types (Track, Racer, history, events)
//! - **strategy**: The four movement policies and their dispatch
//! - **ranking**: Stable distance/actions ranking
//! - **orchestrator**: Main step loop and checkpoints
//!
//! # Critical Invariants
//!
//! 1. Each step gives every unfinished racer exactly one action
//! 2. Each action appends exactly one history snapshot
//! 3. The simulation is deterministic given roster, track length and cutoff

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod ranking;
pub mod strategy;

// Re-exports for convenience
pub use crate::core::clock::StepClock;
pub use models::{
    event::{Event, EventLog},
    history::{RacerHistory, RacerSnapshot},
    racer::{Racer, RacerError, RacerKind},
    track::{Track, TrackError},
};
pub use orchestrator::{Race, RaceConfig, RaceError, RaceSnapshot, RaceStatus, StepResult};
pub use ranking::{rank_by_progress, Progress, Standing, Standings};
pub use strategy::{apply_strategy, RaceAction, RacingStrategy};
