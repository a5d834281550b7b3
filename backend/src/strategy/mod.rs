//! Strategy Engine
//!
//! Each racer kind moves according to one stateless strategy. In every step a
//! strategy looks at the racer's current state and picks **one** action:
//! charge the battery or teleport forward. Never both.
//!
//! # Strategies
//!
//! 1. **Linear** (ScarletKnight): teleport 1 step every action
//! 2. **Quadratic** (StarbucksTruck): charge N times, then teleport 1 step
//! 3. **Logarithmic** (LogNExpress): teleport 2^k steps on the k-th action
//! 4. **Linearithmic** (NLogNExpress): charge N times, then teleport a
//!    doubling distance
//!
//! All strategies clamp jumps to the remaining distance, and a finished racer
//! gets no action at all.
//!
//! # Strategy Interface
//!
//! ```rust
//! use race_simulator_core_rs::strategy::{RaceAction, RacingStrategy};
//! use race_simulator_core_rs::Racer;
//!
//! struct StandStill;
//!
//! impl RacingStrategy for StandStill {
//!     fn decide(&self, _racer: &Racer) -> Option<RaceAction> {
//!         None
//!     }
//! }
//! ```
//!
//! Dispatch goes through [`strategy_for`], an exhaustive match on
//! [`RacerKind`]. Identities that are not one of the four kinds are rejected
//! when parsed, so dispatch has no "unknown racer" case.

use crate::models::racer::{Racer, RacerError, RacerKind};
use serde::{Deserialize, Serialize};

pub mod linear;
pub mod linearithmic;
pub mod logarithmic;
pub mod quadratic;

pub use linear::LinearStrategy;
pub use linearithmic::LinearithmicStrategy;
pub use logarithmic::LogarithmicStrategy;
pub use quadratic::QuadraticStrategy;

/// The single action a racer takes in one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RaceAction {
    /// Add one unit of charge to the battery
    Charge,

    /// Move forward; consumes the battery
    Teleport { steps: u64 },
}

/// Movement policy for one racer kind
pub trait RacingStrategy {
    /// Decide this racer's action for the current step
    ///
    /// Returns `None` when the racer has finished (nothing to do).
    fn decide(&self, racer: &Racer) -> Option<RaceAction>;
}

/// Resolve the strategy bound to a racer kind
pub fn strategy_for(kind: RacerKind) -> &'static dyn RacingStrategy {
    match kind {
        RacerKind::ScarletKnight => &LinearStrategy,
        RacerKind::StarbucksTruck => &QuadraticStrategy,
        RacerKind::LogNExpress => &LogarithmicStrategy,
        RacerKind::NLogNExpress => &LinearithmicStrategy,
    }
}

/// Run one action of the racer's own strategy
///
/// Returns the action taken, or `None` if the racer had already finished.
///
/// # Example
///
/// ```
/// use race_simulator_core_rs::strategy::{apply_strategy, RaceAction};
/// use race_simulator_core_rs::{Racer, RacerKind, Track};
///
/// let track = Track::new(8).unwrap();
/// let mut bus = Racer::new(RacerKind::NLogNExpress, track);
///
/// // Battery starts full, so the first action is a teleport
/// assert_eq!(apply_strategy(&mut bus).unwrap(), Some(RaceAction::Teleport { steps: 1 }));
/// assert_eq!(apply_strategy(&mut bus).unwrap(), Some(RaceAction::Charge));
/// ```
pub fn apply_strategy(racer: &mut Racer) -> Result<Option<RaceAction>, RacerError> {
    let Some(action) = strategy_for(racer.kind()).decide(racer) else {
        return Ok(None);
    };

    match action {
        RaceAction::Charge => racer.charge()?,
        RaceAction::Teleport { steps } => racer.teleport(steps)?,
    }

    Ok(Some(action))
}

/// Clamp a desired jump to the remaining distance, moving at least one step
///
/// Only meaningful while `remaining > 0`.
fn clamp_jump(jump: u64, remaining: u64) -> u64 {
    jump.min(remaining).max(1)
}

/// 2^exponent, saturating at `u64::MAX`
fn saturating_pow2(exponent: u64) -> u64 {
    u32::try_from(exponent)
        .ok()
        .and_then(|e| 1u64.checked_shl(e))
        .unwrap_or(u64::MAX)
}
