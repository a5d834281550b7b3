//! Race Engine
//!
//! Main step loop driving all racers:
//!
//! ```text
//! Until every racer has finished or the cutoff is reached:
//!   1. Check whether everyone has finished (stop before acting if so)
//!   2. For each unfinished racer, in roster order:
//!        apply its strategy once (charge OR teleport)
//!        log the action, and log the finish if it just crossed the line
//!   3. Advance the step clock
//! Then rank the racers.
//! ```
//!
//! No racer acts out of turn or takes two actions in one step.
//!
//! # Example
//!
//! ```rust
//! use race_simulator_core_rs::orchestrator::{Race, RaceStatus};
//! use race_simulator_core_rs::Track;
//!
//! let mut race = Race::new(Track::new(8).unwrap());
//! let standings = race.simulate_to_finish().unwrap();
//!
//! assert_eq!(race.status(), RaceStatus::Finished);
//! assert_eq!(standings.leader().unwrap().name, "LogNExpress");
//! ```

use crate::core::clock::{normalize_cutoff, StepClock};
use crate::models::event::{Event, EventLog};
use crate::models::history::RacerHistory;
use crate::models::racer::{Racer, RacerError, RacerKind};
use crate::models::track::{Track, TrackError};
use crate::ranking::Standings;
use crate::strategy::{apply_strategy, RaceAction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete race configuration
///
/// # Fields
///
/// * `track_length` - Lap length; must be positive
/// * `roster` - Racers in starting order; no kind may appear twice
/// * `cutoff` - Step limit used by [`Race::run`]; `None` runs to the finish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub track_length: u64,
    pub roster: Vec<RacerKind>,
    pub cutoff: Option<i64>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            track_length: 8,
            roster: RacerKind::ALL.to_vec(),
            cutoff: None,
        }
    }
}

impl RaceConfig {
    /// Standard four-racer roster on a track of the given length
    pub fn standard(track_length: u64) -> Self {
        Self {
            track_length,
            ..Self::default()
        }
    }

    /// Parse a config from JSON; missing fields take their defaults
    ///
    /// # Example
    /// ```
    /// use race_simulator_core_rs::orchestrator::RaceConfig;
    /// use race_simulator_core_rs::RacerKind;
    ///
    /// let config = RaceConfig::from_json(r#"{"track_length": 16, "roster": ["LogNExpress"]}"#).unwrap();
    /// assert_eq!(config.track_length, 16);
    /// assert_eq!(config.roster, vec![RacerKind::LogNExpress]);
    /// assert_eq!(config.cutoff, None);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, RaceError> {
        serde_json::from_str(json).map_err(|e| {
            RaceError::DeserializationError(format!("Failed to parse race config: {}", e))
        })
    }

    fn validate(&self) -> Result<Track, RaceError> {
        let track = Track::new(self.track_length)?;

        if self.roster.is_empty() {
            return Err(RaceError::InvalidConfig(
                "Must have at least one racer".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for kind in &self.roster {
            if !seen.insert(kind) {
                return Err(RaceError::InvalidConfig(format!(
                    "Duplicate racer: {}",
                    kind
                )));
            }
        }

        Ok(track)
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Where the race stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceStatus {
    /// At least one racer still has distance to cover
    Running,
    /// Every racer crossed the finish line
    Finished,
    /// The last simulation stopped at its cutoff with racers still running
    CutoffReached,
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Step number (0-based)
    pub step: u64,

    /// Number of racers that charged this step
    pub charges: usize,

    /// Number of racers that teleported this step
    pub teleports: usize,

    /// Racers that crossed the finish line this step
    pub finished: Vec<RacerKind>,
}

impl StepResult {
    /// Total actions taken this step
    pub fn actions(&self) -> usize {
        self.charges + self.teleports
    }
}

/// Race error types
#[derive(Debug, Error, PartialEq)]
pub enum RaceError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Track(#[from] TrackError),

    #[error(transparent)]
    Racer(#[from] RacerError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Config mismatch: checkpoint was taken with config {expected}, got {actual}")]
    ConfigMismatch { expected: String, actual: String },

    #[error("State validation error: {0}")]
    StateValidationError(String),
}

// ============================================================================
// Race
// ============================================================================

/// Turn-based race among the configured racers
#[derive(Debug, Clone)]
pub struct Race {
    config: RaceConfig,
    track: Track,
    racers: Vec<Racer>,
    clock: StepClock,
    status: RaceStatus,
    event_log: EventLog,
}

impl Race {
    /// Create a race with the standard roster on the given track
    pub fn new(track: Track) -> Self {
        let config = RaceConfig::standard(track.length());
        let racers = config
            .roster
            .iter()
            .map(|kind| Racer::new(*kind, track))
            .collect();

        Self {
            config,
            track,
            racers,
            clock: StepClock::new(),
            status: RaceStatus::Running,
            event_log: EventLog::new(),
        }
    }

    /// Create a race from configuration
    ///
    /// # Errors
    ///
    /// - `RaceError::Track` if the track length is 0
    /// - `RaceError::InvalidConfig` if the roster is empty or repeats a racer
    pub fn from_config(config: RaceConfig) -> Result<Self, RaceError> {
        let track = config.validate()?;
        let racers = config
            .roster
            .iter()
            .map(|kind| Racer::new(*kind, track))
            .collect();

        Ok(Self {
            config,
            track,
            racers,
            clock: StepClock::new(),
            status: RaceStatus::Running,
            event_log: EventLog::new(),
        })
    }

    /// Reassemble a race from validated checkpoint parts
    pub(crate) fn from_parts(
        config: RaceConfig,
        track: Track,
        racers: Vec<Racer>,
        current_step: u64,
        status: RaceStatus,
    ) -> Self {
        Self {
            config,
            track,
            racers,
            clock: StepClock::starting_at(current_step),
            status,
            event_log: EventLog::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// All racers in roster order, finished or not
    pub fn racers(&self) -> &[Racer] {
        &self.racers
    }

    /// Look up a racer by kind
    pub fn racer(&self, kind: RacerKind) -> Option<&Racer> {
        self.racers.iter().find(|r| r.kind() == kind)
    }

    /// Steps taken since the race started
    pub fn current_step(&self) -> u64 {
        self.clock.current_step()
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Per-racer action histories in roster order
    pub fn racer_histories(&self) -> Vec<(RacerKind, &RacerHistory)> {
        self.racers
            .iter()
            .map(|r| (r.kind(), r.history()))
            .collect()
    }

    pub fn all_finished(&self) -> bool {
        self.racers.iter().all(Racer::has_finished)
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Rank the current state without simulating further
    pub fn rank_racers(&self) -> Standings {
        Standings::from_racers(&self.racers)
    }

    /// Execute one step: every unfinished racer takes exactly one action
    ///
    /// Once every racer has finished this is a no-op: nothing acts, the step
    /// clock stays put and the returned result reports zero actions.
    pub fn step(&mut self) -> Result<StepResult, RaceError> {
        let step = self.clock.current_step();
        let mut result = StepResult {
            step,
            charges: 0,
            teleports: 0,
            finished: Vec::new(),
        };

        if self.all_finished() {
            self.status = RaceStatus::Finished;
            return Ok(result);
        }

        for racer in self.racers.iter_mut() {
            if racer.has_finished() {
                continue;
            }

            let Some(action) = apply_strategy(racer)? else {
                continue;
            };

            match action {
                RaceAction::Charge => {
                    result.charges += 1;
                    self.event_log.log(Event::Charge {
                        step,
                        racer: racer.kind(),
                        battery: racer.battery(),
                    });
                }
                RaceAction::Teleport { steps } => {
                    result.teleports += 1;
                    self.event_log.log(Event::Teleport {
                        step,
                        racer: racer.kind(),
                        steps,
                        distance: racer.distance(),
                    });
                }
            }

            if racer.has_finished() {
                tracing::debug!(
                    step,
                    racer = racer.name(),
                    actions = racer.actions_count(),
                    "racer finished"
                );
                result.finished.push(racer.kind());
                self.event_log.log(Event::RacerFinished {
                    step,
                    racer: racer.kind(),
                    actions_count: racer.actions_count(),
                });
            }
        }

        self.clock.advance_step();
        self.status = if self.all_finished() {
            RaceStatus::Finished
        } else {
            RaceStatus::Running
        };

        tracing::debug!(
            step,
            charges = result.charges,
            teleports = result.teleports,
            "step complete"
        );

        Ok(result)
    }

    /// Simulate up to `cutoff` steps and return the standings
    ///
    /// The loop stops early once every racer has finished (checked before
    /// each step). A negative cutoff is treated as 0: nothing moves and the
    /// current state is ranked. Calling again continues from where the
    /// previous call stopped.
    pub fn simulate(&mut self, cutoff: i64) -> Result<Standings, RaceError> {
        let budget = normalize_cutoff(cutoff);
        let mut steps_taken: u64 = 0;

        while steps_taken < budget && !self.all_finished() {
            self.step()?;
            steps_taken += 1;
        }

        self.status = if self.all_finished() {
            RaceStatus::Finished
        } else {
            RaceStatus::CutoffReached
        };

        let step = self.clock.current_step();
        self.event_log.log(Event::RaceEnded {
            step,
            status: self.status,
        });
        tracing::info!(
            step,
            steps_taken,
            status = ?self.status,
            "simulation stopped"
        );

        Ok(self.rank_racers())
    }

    /// Simulate with no practical step limit
    pub fn simulate_to_finish(&mut self) -> Result<Standings, RaceError> {
        self.simulate(i64::MAX)
    }

    /// Simulate using the cutoff from the race config
    pub fn run(&mut self) -> Result<Standings, RaceError> {
        self.simulate(self.config.cutoff.unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_empty_roster() {
        let config = RaceConfig {
            roster: vec![],
            ..RaceConfig::default()
        };
        assert!(matches!(
            Race::from_config(config),
            Err(RaceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_rejects_duplicate_racer() {
        let config = RaceConfig {
            roster: vec![RacerKind::LogNExpress, RacerKind::LogNExpress],
            ..RaceConfig::default()
        };
        let err = Race::from_config(config).unwrap_err();
        assert_eq!(
            err,
            RaceError::InvalidConfig("Duplicate racer: LogNExpress".to_string())
        );
    }

    #[test]
    fn test_config_rejects_zero_track() {
        let err = Race::from_config(RaceConfig::standard(0)).unwrap_err();
        assert_eq!(err, RaceError::Track(TrackError::ZeroLength));
    }

    #[test]
    fn test_step_result_counts_actions() {
        let mut race = Race::new(Track::new(4).unwrap());

        // Step 0: everyone teleports (charging racers start full)
        let first = race.step().unwrap();
        assert_eq!(first.step, 0);
        assert_eq!(first.teleports, 4);
        assert_eq!(first.charges, 0);

        // Step 1: knight and express teleport, truck and bus charge
        let second = race.step().unwrap();
        assert_eq!(second.teleports, 2);
        assert_eq!(second.charges, 2);
        assert_eq!(second.actions(), 4);
        assert_eq!(race.current_step(), 2);
    }
}
