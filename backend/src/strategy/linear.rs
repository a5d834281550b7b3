//! Linear strategy (ScarletKnight, O(N))
//!
//! No battery to charge: every action teleports exactly one step, so a lap of
//! length N takes exactly N actions.

use super::{clamp_jump, RaceAction, RacingStrategy};
use crate::Racer;

/// One step per action
pub struct LinearStrategy;

impl RacingStrategy for LinearStrategy {
    fn decide(&self, racer: &Racer) -> Option<RaceAction> {
        if racer.has_finished() {
            return None;
        }

        Some(RaceAction::Teleport {
            steps: clamp_jump(1, racer.remaining()),
        })
    }
}
