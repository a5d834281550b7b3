//! Checkpoint - Save/Load Race State
//!
//! Serializes the race at an arbitrary step so it can be resumed later or
//! handed to an external viewer.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored race finishes exactly like an uninterrupted one
//! - **Racer bounds**: distance within the lap, battery within capacity
//! - **History integrity**: one snapshot per action taken
//! - **Config matching**: state can only be loaded with the config it was saved with
//!
//! The event log is not part of a checkpoint; a restored race starts a fresh log.

use crate::models::history::RacerHistory;
use crate::models::racer::{Racer, RacerKind};
use crate::models::track::Track;
use crate::orchestrator::engine::{Race, RaceConfig, RaceError, RaceStatus};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete race state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    /// Steps taken when the snapshot was captured
    pub current_step: u64,

    pub track_length: u64,

    pub status: RaceStatus,

    /// Racer states in roster order
    pub racers: Vec<RacerState>,

    /// SHA256 hash of the race config (for validation)
    pub config_hash: String,
}

/// Racer state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacerState {
    pub kind: RacerKind,
    pub distance: u64,
    pub battery: u64,
    pub charge_capacity: u64,
    pub actions_count: u64,
    pub history: RacerHistory,
}

impl From<&Racer> for RacerState {
    fn from(racer: &Racer) -> Self {
        RacerState {
            kind: racer.kind(),
            distance: racer.distance(),
            battery: racer.battery(),
            charge_capacity: racer.charge_capacity(),
            actions_count: racer.actions_count(),
            history: racer.history().clone(),
        }
    }
}

impl RacerState {
    fn into_racer(self, track: Track) -> Racer {
        Racer::from_snapshot(
            self.kind,
            track,
            self.distance,
            self.battery,
            self.actions_count,
            self.history,
        )
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of a config
///
/// Object keys are sorted before hashing so the result does not depend on
/// field or map ordering.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, RaceError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        RaceError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        RaceError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Validate snapshot integrity against the config it claims to belong to
pub fn validate_snapshot(snapshot: &RaceSnapshot, config: &RaceConfig) -> Result<(), RaceError> {
    if snapshot.track_length != config.track_length {
        return Err(RaceError::StateValidationError(format!(
            "Track length {} does not match config length {}",
            snapshot.track_length, config.track_length
        )));
    }

    let roster: Vec<RacerKind> = snapshot.racers.iter().map(|r| r.kind).collect();
    if roster != config.roster {
        return Err(RaceError::StateValidationError(format!(
            "Roster {:?} does not match config roster {:?}",
            roster, config.roster
        )));
    }

    let track = Track::new(snapshot.track_length)?;
    for racer in &snapshot.racers {
        validate_racer(racer, &track)?;

        // A racer acts at most once per step
        if racer.actions_count > snapshot.current_step {
            return Err(RaceError::StateValidationError(format!(
                "{}: {} actions in {} steps",
                racer.kind, racer.actions_count, snapshot.current_step
            )));
        }
    }

    let all_finished = snapshot
        .racers
        .iter()
        .all(|r| r.distance == snapshot.track_length);
    if all_finished != (snapshot.status == RaceStatus::Finished) {
        return Err(RaceError::StateValidationError(format!(
            "Status {:?} is inconsistent with racer progress",
            snapshot.status
        )));
    }

    Ok(())
}

fn validate_racer(racer: &RacerState, track: &Track) -> Result<(), RaceError> {
    let invalid = |msg: String| RaceError::StateValidationError(format!("{}: {}", racer.kind, msg));

    if racer.distance > track.length() {
        return Err(invalid(format!(
            "distance {} exceeds track length {}",
            racer.distance,
            track.length()
        )));
    }

    let expected_capacity = racer.kind.charge_capacity(track);
    if racer.charge_capacity != expected_capacity {
        return Err(invalid(format!(
            "charge capacity {} should be {}",
            racer.charge_capacity, expected_capacity
        )));
    }

    if racer.battery > racer.charge_capacity {
        return Err(invalid(format!(
            "battery {} exceeds capacity {}",
            racer.battery, racer.charge_capacity
        )));
    }

    if racer.history.len() as u64 != racer.actions_count {
        return Err(invalid(format!(
            "history has {} snapshots for {} actions",
            racer.history.len(),
            racer.actions_count
        )));
    }

    for (expected, snap) in (1u64..).zip(racer.history.snapshots()) {
        if snap.action_index != expected || snap.actions_count != expected {
            return Err(invalid(format!(
                "history snapshot {} is labelled action {}",
                expected, snap.action_index
            )));
        }
    }

    match racer.history.last() {
        Some(last) if last.distance != racer.distance || last.battery != racer.battery => {
            Err(invalid("latest history snapshot disagrees with state".to_string()))
        }
        None if racer.distance != 0 || racer.battery != racer.charge_capacity => {
            Err(invalid("racer moved without recording history".to_string()))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Save / Load
// ============================================================================

impl Race {
    /// Capture the current state as a snapshot
    pub fn snapshot(&self) -> Result<RaceSnapshot, RaceError> {
        Ok(RaceSnapshot {
            current_step: self.current_step(),
            track_length: self.track().length(),
            status: self.status(),
            racers: self.racers().iter().map(RacerState::from).collect(),
            config_hash: compute_config_hash(self.config())?,
        })
    }

    /// Save race state as JSON
    pub fn save_state(&self) -> Result<String, RaceError> {
        let snapshot = self.snapshot()?;
        validate_snapshot(&snapshot, self.config())?;

        serde_json::to_string(&snapshot).map_err(|e| {
            RaceError::SerializationError(format!("Failed to serialize state: {}", e))
        })
    }

    /// Load race state from JSON saved with the same config
    ///
    /// # Errors
    ///
    /// - `RaceError::DeserializationError` if the JSON is malformed
    /// - `RaceError::ConfigMismatch` if the state was saved under another config
    /// - `RaceError::StateValidationError` if racer invariants are violated
    pub fn load_state(config: RaceConfig, state_json: &str) -> Result<Self, RaceError> {
        let snapshot: RaceSnapshot = serde_json::from_str(state_json).map_err(|e| {
            RaceError::DeserializationError(format!("Failed to parse state JSON: {}", e))
        })?;

        let config_hash = compute_config_hash(&config)?;
        if snapshot.config_hash != config_hash {
            tracing::warn!(
                expected = %snapshot.config_hash,
                actual = %config_hash,
                "rejected checkpoint from a different config"
            );
            return Err(RaceError::ConfigMismatch {
                expected: snapshot.config_hash,
                actual: config_hash,
            });
        }

        if let Err(e) = validate_snapshot(&snapshot, &config) {
            tracing::warn!(error = %e, "rejected invalid checkpoint");
            return Err(e);
        }

        let track = Track::new(snapshot.track_length)?;
        let racers = snapshot
            .racers
            .into_iter()
            .map(|r| r.into_racer(track))
            .collect();

        tracing::debug!(step = snapshot.current_step, "restored race from checkpoint");

        Ok(Race::from_parts(
            config,
            track,
            racers,
            snapshot.current_step,
            snapshot.status,
        ))
    }
}
