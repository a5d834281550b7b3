//! Racer (competitor) model
//!
//! Represents one competitor in the race. Each racer has:
//! - A kind, which fixes its movement strategy
//! - Distance traveled along the lap
//! - A battery gating teleports for charging strategies
//! - An action counter used for ranking and for jump sizes
//!
//! The racer is the single owner of its state. The only mutations are
//! [`Racer::charge`] and [`Racer::teleport`]; each counts exactly one action
//! and appends exactly one history snapshot.

use crate::models::history::{RacerHistory, RacerSnapshot};
use crate::models::track::Track;
use crate::strategy::RaceAction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during racer operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RacerError {
    #[error("Unknown racer: {0}")]
    UnknownRacer(String),

    #[error("{racer} has already finished the race")]
    Finished { racer: RacerKind },

    #[error("{racer} battery is already full ({capacity})")]
    BatteryFull { racer: RacerKind, capacity: u64 },

    #[error("{racer} cannot teleport zero steps")]
    ZeroTeleport { racer: RacerKind },

    #[error("{racer} cannot teleport {steps} steps with only {remaining} remaining")]
    Overshoot {
        racer: RacerKind,
        steps: u64,
        remaining: u64,
    },
}

/// The four competitors, one per complexity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RacerKind {
    /// O(N): one step per action, never charges
    ScarletKnight,
    /// O(N^2): charges N times between single-step teleports
    StarbucksTruck,
    /// O(log N): doubles its jump every action, never charges
    LogNExpress,
    /// O(N log N): charges N times between doubling jumps
    NLogNExpress,
}

impl RacerKind {
    /// Standard roster in starting order
    pub const ALL: [RacerKind; 4] = [
        RacerKind::ScarletKnight,
        RacerKind::StarbucksTruck,
        RacerKind::LogNExpress,
        RacerKind::NLogNExpress,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            RacerKind::ScarletKnight => "ScarletKnight",
            RacerKind::StarbucksTruck => "StarbucksTruck",
            RacerKind::LogNExpress => "LogNExpress",
            RacerKind::NLogNExpress => "NLogNExpress",
        }
    }

    /// Glyph used by playback layers
    pub fn symbol(&self) -> &'static str {
        match self {
            RacerKind::ScarletKnight => "⚔",
            RacerKind::StarbucksTruck => "🚚",
            RacerKind::LogNExpress => "🚎",
            RacerKind::NLogNExpress => "🚌",
        }
    }

    /// Complexity class this racer demonstrates
    pub fn complexity(&self) -> &'static str {
        match self {
            RacerKind::ScarletKnight => "O(N)",
            RacerKind::StarbucksTruck => "O(N^2)",
            RacerKind::LogNExpress => "O(log N)",
            RacerKind::NLogNExpress => "O(N log N)",
        }
    }

    /// Whether this racer must charge between teleports
    pub fn requires_charging(&self) -> bool {
        matches!(self, RacerKind::StarbucksTruck | RacerKind::NLogNExpress)
    }

    /// Charge capacity on a track of the given length
    pub fn charge_capacity(&self, track: &Track) -> u64 {
        if self.requires_charging() {
            track.length()
        } else {
            0
        }
    }
}

impl fmt::Display for RacerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RacerKind {
    type Err = RacerError;

    /// Parse a racer identity
    ///
    /// Accepts the display names and the lowercase strategy names
    /// (`linear`, `quadratic`, `logarithmic`, `linearithmic`).
    ///
    /// # Example
    /// ```
    /// use race_simulator_core_rs::RacerKind;
    ///
    /// assert_eq!("LogNExpress".parse::<RacerKind>().unwrap(), RacerKind::LogNExpress);
    /// assert_eq!("quadratic".parse::<RacerKind>().unwrap(), RacerKind::StarbucksTruck);
    /// assert!("Zamboni".parse::<RacerKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ScarletKnight" | "linear" => Ok(RacerKind::ScarletKnight),
            "StarbucksTruck" | "quadratic" => Ok(RacerKind::StarbucksTruck),
            "LogNExpress" | "logarithmic" => Ok(RacerKind::LogNExpress),
            "NLogNExpress" | "linearithmic" => Ok(RacerKind::NLogNExpress),
            other => Err(RacerError::UnknownRacer(other.to_string())),
        }
    }
}

/// A competitor and its mutable race state
///
/// # Example
/// ```
/// use race_simulator_core_rs::{Racer, RacerKind, Track};
///
/// let track = Track::new(8).unwrap();
/// let mut truck = Racer::new(RacerKind::StarbucksTruck, track);
/// assert_eq!(truck.battery(), 8); // starts full
///
/// truck.teleport(1).unwrap();
/// assert_eq!(truck.battery(), 0); // consumed by the teleport
/// assert_eq!(truck.distance(), 1);
///
/// truck.charge().unwrap();
/// assert_eq!(truck.battery(), 1);
/// assert_eq!(truck.actions_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Racer {
    kind: RacerKind,

    /// Lap this racer runs on (shared, read-only)
    track: Track,

    /// Distance covered, in [0, track.length]
    distance: u64,

    /// Accumulated charge, in [0, charge_capacity]
    battery: u64,

    /// Charges needed before a teleport; fixed at creation
    charge_capacity: u64,

    /// Actions taken so far (charges + teleports)
    actions_count: u64,

    history: RacerHistory,
}

impl Racer {
    /// Create a racer at the start line with a full battery
    pub fn new(kind: RacerKind, track: Track) -> Self {
        let charge_capacity = kind.charge_capacity(&track);
        Self {
            kind,
            track,
            distance: 0,
            battery: charge_capacity,
            charge_capacity,
            actions_count: 0,
            history: RacerHistory::new(),
        }
    }

    /// Rebuild a racer from checkpointed state
    ///
    /// Callers are expected to have validated the values already.
    pub(crate) fn from_snapshot(
        kind: RacerKind,
        track: Track,
        distance: u64,
        battery: u64,
        actions_count: u64,
        history: RacerHistory,
    ) -> Self {
        Self {
            kind,
            track,
            distance,
            battery,
            charge_capacity: kind.charge_capacity(&track),
            actions_count,
            history,
        }
    }

    pub fn kind(&self) -> RacerKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn distance(&self) -> u64 {
        self.distance
    }

    pub fn battery(&self) -> u64 {
        self.battery
    }

    pub fn charge_capacity(&self) -> u64 {
        self.charge_capacity
    }

    pub fn actions_count(&self) -> u64 {
        self.actions_count
    }

    pub fn history(&self) -> &RacerHistory {
        &self.history
    }

    /// Steps left before the finish line
    pub fn remaining(&self) -> u64 {
        self.track.length() - self.distance
    }

    /// True once the racer has covered the whole lap
    pub fn has_finished(&self) -> bool {
        self.distance == self.track.length()
    }

    /// True when the battery holds enough charge to teleport
    pub fn battery_full(&self) -> bool {
        self.battery == self.charge_capacity
    }

    /// Spend one action adding one unit of charge
    ///
    /// # Errors
    /// - `RacerError::Finished` if the racer already crossed the line
    /// - `RacerError::BatteryFull` if there is no room for more charge
    pub fn charge(&mut self) -> Result<(), RacerError> {
        if self.has_finished() {
            return Err(RacerError::Finished { racer: self.kind });
        }
        if self.battery_full() {
            return Err(RacerError::BatteryFull {
                racer: self.kind,
                capacity: self.charge_capacity,
            });
        }

        self.battery += 1;
        self.complete_action(RaceAction::Charge);
        Ok(())
    }

    /// Spend one action moving `steps` forward
    ///
    /// The battery is consumed: it drops to 0 regardless of strategy.
    ///
    /// # Errors
    /// - `RacerError::Finished` if the racer already crossed the line
    /// - `RacerError::ZeroTeleport` if `steps` is 0
    /// - `RacerError::Overshoot` if `steps` exceeds the remaining distance
    pub fn teleport(&mut self, steps: u64) -> Result<(), RacerError> {
        if self.has_finished() {
            return Err(RacerError::Finished { racer: self.kind });
        }
        if steps == 0 {
            return Err(RacerError::ZeroTeleport { racer: self.kind });
        }
        let remaining = self.remaining();
        if steps > remaining {
            return Err(RacerError::Overshoot {
                racer: self.kind,
                steps,
                remaining,
            });
        }

        self.distance += steps;
        self.battery = 0;
        self.complete_action(RaceAction::Teleport { steps });
        Ok(())
    }

    fn complete_action(&mut self, action: RaceAction) {
        self.actions_count += 1;
        self.history.record(RacerSnapshot {
            action_index: self.actions_count,
            action,
            distance: self.distance,
            battery: self.battery,
            actions_count: self.actions_count,
        });
        tracing::trace!(
            racer = self.kind.name(),
            ?action,
            distance = self.distance,
            battery = self.battery,
            actions = self.actions_count,
            "racer acted"
        );
    }
}
