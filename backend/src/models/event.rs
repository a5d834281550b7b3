//! Event logging for race playback and auditing.
//!
//! Every state change the race orchestrator makes is recorded as an [`Event`]
//! tagged with the step in which it happened. Events enable:
//! - Step-by-step playback by external viewers
//! - Debugging (which racer did what, and when)
//! - Verifying the one-action-per-step rule after the fact
//!
//! # Example
//!
//! ```rust
//! use race_simulator_core_rs::models::Event;
//! use race_simulator_core_rs::RacerKind;
//!
//! let event = Event::Teleport {
//!     step: 3,
//!     racer: RacerKind::LogNExpress,
//!     steps: 8,
//!     distance: 15,
//! };
//!
//! assert_eq!(event.step(), 3);
//! assert_eq!(event.event_type(), "teleport");
//! ```

use crate::models::racer::RacerKind;
use crate::orchestrator::RaceStatus;
use serde::{Deserialize, Serialize};

/// Race event capturing a state change.
///
/// Events are logged in the order they occur within a step, which is roster
/// order for racer actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Racer spent its action charging
    Charge {
        step: u64,
        racer: RacerKind,
        battery: u64,
    },

    /// Racer spent its action teleporting
    Teleport {
        step: u64,
        racer: RacerKind,
        steps: u64,
        distance: u64,
    },

    /// Racer reached the end of the lap
    RacerFinished {
        step: u64,
        racer: RacerKind,
        actions_count: u64,
    },

    /// Simulation stopped (everyone finished, or the cutoff was hit)
    RaceEnded { step: u64, status: RaceStatus },
}

impl Event {
    /// Step in which the event happened
    pub fn step(&self) -> u64 {
        match self {
            Event::Charge { step, .. } => *step,
            Event::Teleport { step, .. } => *step,
            Event::RacerFinished { step, .. } => *step,
            Event::RaceEnded { step, .. } => *step,
        }
    }

    /// Short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Charge { .. } => "charge",
            Event::Teleport { .. } => "teleport",
            Event::RacerFinished { .. } => "racer_finished",
            Event::RaceEnded { .. } => "race_ended",
        }
    }

    /// Racer the event concerns, if any
    pub fn racer(&self) -> Option<RacerKind> {
        match self {
            Event::Charge { racer, .. }
            | Event::Teleport { racer, .. }
            | Event::RacerFinished { racer, .. } => Some(*racer),
            Event::RaceEnded { .. } => None,
        }
    }

    /// True for events that consumed a racer action
    pub fn is_action(&self) -> bool {
        matches!(self, Event::Charge { .. } | Event::Teleport { .. })
    }
}

/// Append-only log of race events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific step
    pub fn events_at_step(&self, step: u64) -> Vec<&Event> {
        self.events.iter().filter(|e| e.step() == step).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific racer
    pub fn events_for_racer(&self, racer: RacerKind) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.racer() == Some(racer))
            .collect()
    }

    /// Serialize the log as JSON for external playback
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.events)
    }
}
