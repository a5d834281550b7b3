//! Strategy engine tests
//!
//! Each strategy is run alone on a track until it finishes, and its action
//! counts are checked against the complexity class it demonstrates.

use proptest::prelude::*;
use race_simulator_core_rs::strategy::{
    apply_strategy, strategy_for, LinearStrategy, LinearithmicStrategy, LogarithmicStrategy,
    QuadraticStrategy, RacingStrategy,
};
use race_simulator_core_rs::{RaceAction, Racer, RacerKind, Track};

// ============================================================================
// Test Helpers
// ============================================================================

/// Apply the racer's strategy until it finishes, returning every action taken
fn run_solo(kind: RacerKind, length: u64) -> (Racer, Vec<RaceAction>) {
    let mut racer = Racer::new(kind, Track::new(length).unwrap());
    let mut actions = Vec::new();

    while let Some(action) = apply_strategy(&mut racer).unwrap() {
        actions.push(action);
    }

    (racer, actions)
}

/// Teleport distances in order
fn jumps(actions: &[RaceAction]) -> Vec<u64> {
    actions
        .iter()
        .filter_map(|a| match a {
            RaceAction::Teleport { steps } => Some(*steps),
            RaceAction::Charge => None,
        })
        .collect()
}

/// Lengths of the charge runs between consecutive teleports
fn charges_between_teleports(actions: &[RaceAction]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0;
    for action in actions {
        match action {
            RaceAction::Charge => current += 1,
            RaceAction::Teleport { .. } => {
                runs.push(current);
                current = 0;
            }
        }
    }
    runs
}

/// ceil(log2(n + 1)), i.e. the bit length of n
fn bit_length(n: u64) -> u64 {
    u64::from(u64::BITS - n.leading_zeros())
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_dispatch_matches_kind() {
    let track = Track::new(16).unwrap();
    for kind in RacerKind::ALL {
        let racer = Racer::new(kind, track);
        let dispatched = strategy_for(kind).decide(&racer);
        let direct = match kind {
            RacerKind::ScarletKnight => LinearStrategy.decide(&racer),
            RacerKind::StarbucksTruck => QuadraticStrategy.decide(&racer),
            RacerKind::LogNExpress => LogarithmicStrategy.decide(&racer),
            RacerKind::NLogNExpress => LinearithmicStrategy.decide(&racer),
        };
        assert_eq!(dispatched, direct);
    }
}

#[test]
fn test_every_strategy_opens_with_one_step() {
    for kind in RacerKind::ALL {
        let mut racer = Racer::new(kind, Track::new(16).unwrap());
        assert_eq!(
            apply_strategy(&mut racer).unwrap(),
            Some(RaceAction::Teleport { steps: 1 }),
            "{kind} should open with a single step"
        );
    }
}

#[test]
fn test_one_action_per_invocation() {
    let track = Track::new(6).unwrap();
    for kind in RacerKind::ALL {
        let mut racer = Racer::new(kind, track);
        while !racer.has_finished() {
            let before = racer.actions_count();
            apply_strategy(&mut racer).unwrap();
            assert_eq!(racer.actions_count(), before + 1);
            assert_eq!(racer.history().len() as u64, racer.actions_count());
        }
    }
}

// ============================================================================
// Linear
// ============================================================================

#[test]
fn test_linear_small_tracks() {
    for n in 1..=32 {
        let (racer, actions) = run_solo(RacerKind::ScarletKnight, n);
        assert_eq!(racer.actions_count(), n);
        assert_eq!(racer.distance(), n);
        assert!(actions.iter().all(|a| *a == RaceAction::Teleport { steps: 1 }));
    }
}

// ============================================================================
// Quadratic
// ============================================================================

#[test]
fn test_quadratic_track_of_eight() {
    let (racer, actions) = run_solo(RacerKind::StarbucksTruck, 8);

    assert_eq!(racer.actions_count(), 64);
    assert_eq!(jumps(&actions), vec![1; 8]);

    let runs = charges_between_teleports(&actions);
    assert_eq!(runs[0], 0, "first action is a teleport");
    assert!(runs[1..].iter().all(|&r| r == 8));

    // Teleport k (1-based) lands at action 1 + (k - 1) * 9
    let teleport_actions: Vec<u64> = racer
        .history()
        .teleports()
        .map(|s| s.action_index)
        .collect();
    assert_eq!(teleport_actions, vec![1, 10, 19, 28, 37, 46, 55, 64]);
}

// ============================================================================
// Logarithmic
// ============================================================================

#[test]
fn test_logarithmic_track_of_eight() {
    let (racer, actions) = run_solo(RacerKind::LogNExpress, 8);

    assert_eq!(jumps(&actions), vec![1, 2, 4, 1]);
    assert_eq!(racer.actions_count(), 4);
    assert_eq!(racer.distance(), 8);
}

#[test]
fn test_logarithmic_exact_powers() {
    // 2^k - 1 is reached exactly in k actions with no clamping
    for k in 1..=20u32 {
        let n = (1u64 << k) - 1;
        let (racer, actions) = run_solo(RacerKind::LogNExpress, n);
        assert_eq!(racer.actions_count(), u64::from(k));
        assert_eq!(*jumps(&actions).last().unwrap(), 1u64 << (k - 1));
    }
}

#[test]
fn test_logarithmic_longest_possible_track() {
    // 1 + 2 + ... + 2^63 = u64::MAX
    let (racer, _) = run_solo(RacerKind::LogNExpress, u64::MAX);
    assert_eq!(racer.actions_count(), 64);
    assert!(racer.has_finished());
}

// ============================================================================
// Linearithmic
// ============================================================================

#[test]
fn test_linearithmic_track_of_eight() {
    let (racer, actions) = run_solo(RacerKind::NLogNExpress, 8);

    assert_eq!(jumps(&actions), vec![1, 2, 4, 1]);
    assert_eq!(charges_between_teleports(&actions), vec![0, 8, 8, 8]);
    assert_eq!(racer.actions_count(), 4 + 3 * 8);
}

#[test]
fn test_linearithmic_track_of_five() {
    let (racer, actions) = run_solo(RacerKind::NLogNExpress, 5);

    // 1 + 2 = 3, then the 4-step jump is clamped to 2
    assert_eq!(jumps(&actions), vec![1, 2, 2]);
    assert_eq!(racer.actions_count(), 3 + 2 * 5);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_linear_takes_n_actions(n in 1u64..2_000) {
        let (racer, _) = run_solo(RacerKind::ScarletKnight, n);
        prop_assert_eq!(racer.actions_count(), n);
        prop_assert!(racer.has_finished());
    }

    #[test]
    fn prop_quadratic_takes_n_squared_actions(n in 1u64..48) {
        let (racer, actions) = run_solo(RacerKind::StarbucksTruck, n);
        prop_assert_eq!(racer.actions_count(), n * n);
        prop_assert_eq!(jumps(&actions).len() as u64, n);

        let runs = charges_between_teleports(&actions);
        prop_assert_eq!(runs[0], 0);
        prop_assert!(runs[1..].iter().all(|&r| r as u64 == n));
    }

    #[test]
    fn prop_logarithmic_takes_ceil_log2_actions(n in 1u64..u64::MAX) {
        let (racer, _) = run_solo(RacerKind::LogNExpress, n);
        prop_assert_eq!(racer.actions_count(), bit_length(n));
        prop_assert_eq!(racer.distance(), n);
    }

    #[test]
    fn prop_linearithmic_doubles_between_full_charges(n in 1u64..300) {
        let (racer, actions) = run_solo(RacerKind::NLogNExpress, n);
        let teleports = bit_length(n);

        prop_assert_eq!(racer.actions_count(), teleports + (teleports - 1) * n);

        let distances = jumps(&actions);
        prop_assert_eq!(distances.len() as u64, teleports);
        for (k, jump) in distances.iter().enumerate().take(distances.len() - 1) {
            prop_assert_eq!(*jump, 1u64 << k);
        }
        prop_assert_eq!(distances.iter().sum::<u64>(), n);

        let runs = charges_between_teleports(&actions);
        prop_assert_eq!(runs[0], 0);
        prop_assert!(runs[1..].iter().all(|&r| r as u64 == n));
    }

    #[test]
    fn prop_moves_never_overshoot(n in 1u64..200, kind_idx in 0usize..4) {
        let kind = RacerKind::ALL[kind_idx];
        let mut racer = Racer::new(kind, Track::new(n).unwrap());
        while let Some(_) = apply_strategy(&mut racer).unwrap() {
            prop_assert!(racer.distance() <= n);
            prop_assert!(racer.battery() <= racer.charge_capacity());
        }
        prop_assert_eq!(racer.distance(), n);
    }
}
