//! Linearithmic strategy (NLogNExpress, O(N log N))
//!
//! Combines the truck's charging with the express's doubling. The battery
//! takes N charges to fill; each teleport jumps to the next power of two past
//! the distance already covered:
//!
//! ```text
//! distance 0        -> jump 1
//! distance d > 0    -> jump 2^(floor(log2(d)) + 1)
//! ```
//!
//! so jumps go 1, 2, 4, 8, ... and the final one is clamped. With
//! T = ceil(log2(N + 1)) teleports the lap costs T + (T - 1) * N actions.

use super::{clamp_jump, saturating_pow2, RaceAction, RacingStrategy};
use crate::Racer;

/// Charge to full, then jump to the next power of two
pub struct LinearithmicStrategy;

impl LinearithmicStrategy {
    /// Jump size for a teleport taken at `distance`
    pub fn jump_from(distance: u64) -> u64 {
        if distance == 0 {
            1
        } else {
            saturating_pow2(u64::from(distance.ilog2()) + 1)
        }
    }
}

impl RacingStrategy for LinearithmicStrategy {
    fn decide(&self, racer: &Racer) -> Option<RaceAction> {
        if racer.has_finished() {
            return None;
        }

        if !racer.battery_full() {
            return Some(RaceAction::Charge);
        }

        let jump = Self::jump_from(racer.distance());
        Some(RaceAction::Teleport {
            steps: clamp_jump(jump, racer.remaining()),
        })
    }
}
