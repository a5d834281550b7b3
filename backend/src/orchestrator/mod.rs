//! Orchestrator - the race step loop
//!
//! Drives all racers one action per step until everyone finishes or the
//! cutoff is reached, then ranks them.
//!
//! See `engine.rs` for the loop and `checkpoint.rs` for save/load.

pub mod checkpoint;
pub mod engine;

// Re-export main types for convenience
pub use engine::{Race, RaceConfig, RaceError, RaceStatus, StepResult};

// Re-export checkpoint types
pub use checkpoint::{compute_config_hash, RaceSnapshot, RacerState};
