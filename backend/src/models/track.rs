//! Track model
//!
//! A track is a single lap of fixed length. Racers start at distance 0 and
//! finish once their distance equals the lap length. Track geometry (which
//! campus the lap loops around, how it is drawn) lives outside the core; only
//! the length matters to the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a track
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("Track length must be positive")]
    ZeroLength,
}

/// Immutable lap of a given length
///
/// # Example
/// ```
/// use race_simulator_core_rs::Track;
///
/// let track = Track::new(8).unwrap();
/// assert_eq!(track.length(), 8);
/// assert!(Track::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Track {
    length: u64,
}

impl Track {
    /// Create a track with the given lap length
    ///
    /// # Errors
    /// Returns `TrackError::ZeroLength` if `length` is 0.
    pub fn new(length: u64) -> Result<Self, TrackError> {
        if length == 0 {
            return Err(TrackError::ZeroLength);
        }
        Ok(Self { length })
    }

    /// Total lap length in steps
    pub fn length(&self) -> u64 {
        self.length
    }
}

impl TryFrom<u64> for Track {
    type Error = TrackError;

    fn try_from(length: u64) -> Result<Self, Self::Error> {
        Track::new(length)
    }
}

impl From<Track> for u64 {
    fn from(track: Track) -> Self {
        track.length
    }
}
