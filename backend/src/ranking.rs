//! Ranker
//!
//! Orders competitors by progress and efficiency:
//!
//! 1. Greater distance ranks higher
//! 2. On equal distance, fewer actions ranks higher
//! 3. On a full tie, input order is kept
//!
//! Rule 3 requires a stable sort. `slice::sort_by` is stable, so ties come
//! out in exactly the order they went in.

use crate::models::racer::Racer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Anything that can be ranked by distance and action count
pub trait Progress {
    fn distance(&self) -> u64;
    fn actions_count(&self) -> u64;
}

impl Progress for Racer {
    fn distance(&self) -> u64 {
        Racer::distance(self)
    }

    fn actions_count(&self) -> u64 {
        Racer::actions_count(self)
    }
}

/// Compare two entries; `Ordering::Less` means `a` ranks above `b`
pub fn compare_progress<T: Progress + ?Sized>(a: &T, b: &T) -> Ordering {
    b.distance()
        .cmp(&a.distance())
        .then_with(|| a.actions_count().cmp(&b.actions_count()))
}

/// Stable ranking, best first
///
/// An empty slice ranks to an empty vector.
///
/// # Example
/// ```
/// use race_simulator_core_rs::ranking::rank_by_progress;
/// use race_simulator_core_rs::{Racer, RacerKind, Track};
///
/// let track = Track::new(4).unwrap();
/// let mut knight = Racer::new(RacerKind::ScarletKnight, track);
/// let express = Racer::new(RacerKind::LogNExpress, track);
/// knight.teleport(1).unwrap();
///
/// let racers = vec![express, knight];
/// let ranked = rank_by_progress(&racers);
/// assert_eq!(ranked[0].kind(), RacerKind::ScarletKnight);
/// ```
pub fn rank_by_progress<T: Progress>(items: &[T]) -> Vec<&T> {
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| compare_progress(*a, *b));
    ranked
}

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based ordinal position
    pub rank: usize,
    pub name: String,
    pub symbol: String,
    pub complexity: String,
    pub distance: u64,
    pub actions_count: u64,
    pub finished: bool,
}

/// Owned, ranked snapshot of the race, best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    entries: Vec<Standing>,
}

impl Standings {
    /// Rank the given racers and capture their current state
    pub fn from_racers(racers: &[Racer]) -> Self {
        let entries = rank_by_progress(racers)
            .into_iter()
            .enumerate()
            .map(|(idx, racer)| Standing {
                rank: idx + 1,
                name: racer.name().to_string(),
                symbol: racer.kind().symbol().to_string(),
                complexity: racer.kind().complexity().to_string(),
                distance: racer.distance(),
                actions_count: racer.actions_count(),
                finished: racer.has_finished(),
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[Standing] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leader of the race, if anyone is racing
    pub fn leader(&self) -> Option<&Standing> {
        self.entries.first()
    }

    /// Racer names in ranked order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|s| s.name.as_str()).collect()
    }

    /// Standing for a racer by name
    pub fn get(&self, name: &str) -> Option<&Standing> {
        self.entries.iter().find(|s| s.name == name)
    }
}
