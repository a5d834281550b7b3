//! Domain models for the race simulator

pub mod event;
pub mod history;
pub mod racer;
pub mod track;

// Re-exports
pub use event::{Event, EventLog};
pub use history::{RacerHistory, RacerSnapshot};
pub use racer::{Racer, RacerError, RacerKind};
pub use track::{Track, TrackError};
