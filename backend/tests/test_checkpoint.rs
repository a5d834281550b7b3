//! Checkpoint Tests - Save/Load Race State
//!
//! Critical invariants tested:
//! - Determinism: a restored race finishes exactly like an uninterrupted one
//! - Racer bounds: corrupted distances and batteries are rejected
//! - History integrity: one snapshot per action survives the round trip
//! - Config matching: state from a different config is rejected

use race_simulator_core_rs::orchestrator::checkpoint::RaceSnapshot;
use race_simulator_core_rs::{Race, RaceConfig, RaceError, RaceStatus, RacerHistory, RacerKind};

// ============================================================================
// Test Helpers
// ============================================================================

fn config() -> RaceConfig {
    RaceConfig::standard(8)
}

fn race_after(steps: i64) -> Race {
    let mut race = Race::from_config(config()).unwrap();
    race.simulate(steps).unwrap();
    race
}

fn tamper(json: &str, edit: impl FnOnce(&mut RaceSnapshot)) -> String {
    let mut snapshot: RaceSnapshot = serde_json::from_str(json).unwrap();
    edit(&mut snapshot);
    serde_json::to_string(&snapshot).unwrap()
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_save_and_load_preserves_state() {
    let race = race_after(12);
    let json = race.save_state().unwrap();

    let restored = Race::load_state(config(), &json).unwrap();

    assert_eq!(restored.current_step(), 12);
    assert_eq!(restored.status(), RaceStatus::CutoffReached);
    assert_eq!(restored.racers(), race.racers());
    assert_eq!(restored.rank_racers(), race.rank_racers());
}

#[test]
fn test_restored_race_finishes_identically() {
    let mut original = race_after(20);
    let json = original.save_state().unwrap();
    let mut restored = Race::load_state(config(), &json).unwrap();

    let expected = original.simulate_to_finish().unwrap();
    let actual = restored.simulate_to_finish().unwrap();

    assert_eq!(actual, expected);
    assert_eq!(restored.current_step(), original.current_step());
    assert_eq!(restored.racers(), original.racers());
}

#[test]
fn test_restored_race_starts_fresh_event_log() {
    let race = race_after(5);
    let restored = Race::load_state(config(), &race.save_state().unwrap()).unwrap();

    assert!(!race.event_log().is_empty());
    assert!(restored.event_log().is_empty());
}

#[test]
fn test_save_is_deterministic() {
    assert_eq!(
        race_after(9).save_state().unwrap(),
        race_after(9).save_state().unwrap()
    );
}

#[test]
fn test_checkpoint_of_finished_race() {
    let race = race_after(i64::MAX);
    let restored = Race::load_state(config(), &race.save_state().unwrap()).unwrap();

    assert_eq!(restored.status(), RaceStatus::Finished);
    assert!(restored.all_finished());
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_load_rejects_different_config() {
    let json = race_after(3).save_state().unwrap();

    let err = Race::load_state(RaceConfig::standard(9), &json).unwrap_err();
    assert!(matches!(err, RaceError::ConfigMismatch { .. }));
}

#[test]
fn test_load_rejects_malformed_json() {
    let err = Race::load_state(config(), "{not json").unwrap_err();
    assert!(matches!(err, RaceError::DeserializationError(_)));
}

#[test]
fn test_load_rejects_distance_past_finish() {
    let json = tamper(&race_after(3).save_state().unwrap(), |s| {
        s.racers[0].distance = 9;
    });

    let err = Race::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, RaceError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_history_gap() {
    let json = tamper(&race_after(3).save_state().unwrap(), |s| {
        s.racers[1].actions_count += 1;
    });

    let err = Race::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, RaceError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_reordered_history() {
    let json = tamper(&race_after(3).save_state().unwrap(), |s| {
        let mut snapshots = s.racers[0].history.snapshots().to_vec();
        snapshots.swap(0, 1);
        s.racers[0].history = RacerHistory::from(snapshots);
    });

    let err = Race::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, RaceError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_more_actions_than_steps() {
    let json = tamper(&race_after(3).save_state().unwrap(), |s| {
        s.current_step = 2;
    });

    let err = Race::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, RaceError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_wrong_capacity() {
    let json = tamper(&race_after(3).save_state().unwrap(), |s| {
        s.racers[3].charge_capacity = 2;
    });

    let err = Race::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, RaceError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_reordered_roster() {
    let json = tamper(&race_after(3).save_state().unwrap(), |s| {
        s.racers.swap(0, 2);
    });

    let err = Race::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, RaceError::StateValidationError(_)));
}

#[test]
fn test_snapshot_lists_roster_in_order() {
    let snapshot = race_after(1).snapshot().unwrap();
    let kinds: Vec<RacerKind> = snapshot.racers.iter().map(|r| r.kind).collect();

    assert_eq!(kinds, RacerKind::ALL.to_vec());
    assert_eq!(snapshot.current_step, 1);
    assert_eq!(snapshot.track_length, 8);
}
