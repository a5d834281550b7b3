//! Logarithmic strategy (LogNExpress, O(log N))
//!
//! No charging. The jump doubles with every action: 1, 2, 4, 8, ... where the
//! exponent is the number of actions already taken. After k actions the
//! express has covered 2^k - 1 steps, so a lap of length N takes exactly
//! ceil(log2(N + 1)) actions (the last jump is clamped to the finish line).

use super::{clamp_jump, saturating_pow2, RaceAction, RacingStrategy};
use crate::Racer;

/// Jump 2^k on the k-th action
pub struct LogarithmicStrategy;

impl RacingStrategy for LogarithmicStrategy {
    fn decide(&self, racer: &Racer) -> Option<RaceAction> {
        if racer.has_finished() {
            return None;
        }

        let jump = saturating_pow2(racer.actions_count());
        Some(RaceAction::Teleport {
            steps: clamp_jump(jump, racer.remaining()),
        })
    }
}
