//! Per-racer action history for playback
//!
//! Every action a racer takes appends exactly one snapshot. The history is
//! write-only from the simulation's point of view: strategies, the step loop
//! and the ranker never read it. Visualization layers replay it.

use crate::strategy::RaceAction;
use serde::{Deserialize, Serialize};

/// Racer state captured immediately after one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacerSnapshot {
    /// 1-based index of the action that produced this snapshot
    pub action_index: u64,

    /// The action that was taken
    pub action: RaceAction,

    /// Distance traveled after the action
    pub distance: u64,

    /// Battery level after the action
    pub battery: u64,

    /// Total actions taken so far (equals `action_index`)
    pub actions_count: u64,
}

/// Ordered sequence of snapshots, one per action
///
/// # Example
/// ```
/// use race_simulator_core_rs::{Racer, RacerKind, Track};
///
/// let track = Track::new(4).unwrap();
/// let mut racer = Racer::new(RacerKind::ScarletKnight, track);
/// racer.teleport(1).unwrap();
/// racer.teleport(1).unwrap();
///
/// let history = racer.history();
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.last().unwrap().distance, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacerHistory {
    snapshots: Vec<RacerSnapshot>,
}

impl RacerHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Append a snapshot
    pub fn record(&mut self, snapshot: RacerSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in action order
    pub fn snapshots(&self) -> &[RacerSnapshot] {
        &self.snapshots
    }

    /// Most recent snapshot
    pub fn last(&self) -> Option<&RacerSnapshot> {
        self.snapshots.last()
    }

    /// Snapshot recorded by the given 1-based action index
    pub fn at_action(&self, action_index: u64) -> Option<&RacerSnapshot> {
        let idx = usize::try_from(action_index.checked_sub(1)?).ok()?;
        self.snapshots.get(idx)
    }

    /// Iterator over teleport snapshots only
    pub fn teleports(&self) -> impl Iterator<Item = &RacerSnapshot> {
        self.snapshots
            .iter()
            .filter(|s| matches!(s.action, RaceAction::Teleport { .. }))
    }
}

impl From<Vec<RacerSnapshot>> for RacerHistory {
    fn from(snapshots: Vec<RacerSnapshot>) -> Self {
        Self { snapshots }
    }
}
