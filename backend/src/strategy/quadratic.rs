//! Quadratic strategy (StarbucksTruck, O(N^2))
//!
//! The truck carries a battery that takes N charges to fill, yet each
//! teleport only moves one step. The battery starts full, so the first action
//! is a teleport; afterwards every teleport is preceded by exactly N charges.
//!
//! For a lap of length N: N teleports + (N - 1) * N charges = N^2 actions.

use super::{clamp_jump, RaceAction, RacingStrategy};
use crate::Racer;

/// Charge to full, then move one step
pub struct QuadraticStrategy;

impl RacingStrategy for QuadraticStrategy {
    fn decide(&self, racer: &Racer) -> Option<RaceAction> {
        if racer.has_finished() {
            return None;
        }

        if racer.battery_full() {
            Some(RaceAction::Teleport {
                steps: clamp_jump(1, racer.remaining()),
            })
        } else {
            Some(RaceAction::Charge)
        }
    }
}
