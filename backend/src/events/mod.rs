//! Event logging for engine activity
//!
//! Every state change of a [`crate::DiceEngine`] is recorded as an
//! [`EngineEvent`]. Events enable:
//! - Debugging (which dice were set up, how long the table took)
//! - Replay (rolls are recorded with their faces)
//! - Auditing (checkpoint restores are visible)
//!
//! Events carry a sequence number assigned in logging order.
//!
//! # Example
//!
//! ```rust
//! use dice_odds_core_rs::events::{EngineEvent, EventLog};
//!
//! let mut log = EventLog::new();
//! let seq = log.next_seq();
//! log.log(EngineEvent::DiceRolled { seq, faces: vec![3, 5], sum: Some(8) });
//! assert_eq!(log.events_of_type("DiceRolled").len(), 1);
//! ```

use serde::Serialize;

use crate::dice::DieSpec;

/// Engine event capturing a state change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type")]
pub enum EngineEvent {
    /// Generator created from a seed string
    Seeded {
        seq: u64,
        seed_len: usize,
        from_time: bool,
    },

    DieAdded {
        seq: u64,
        index: usize,
        die: DieSpec,
    },

    DieRemoved {
        seq: u64,
        index: usize,
        die: DieSpec,
    },

    /// Multiset replaced wholesale
    DiceReplaced { seq: u64, dice_count: usize },

    /// Distribution table rebuilt for the current multiset
    TableRebuilt {
        seq: u64,
        dice_count: usize,
        distinct_sums: usize,
        /// Decimal string; counts exceed every fixed-width integer
        total_combinations: String,
        elapsed_us: u64,
    },

    /// All dice rolled once
    DiceRolled {
        seq: u64,
        faces: Vec<u64>,
        sum: Option<u64>,
    },

    /// Engine state restored from a checkpoint
    Restored { seq: u64, dice_count: usize },
}

impl EngineEvent {
    pub fn seq(&self) -> u64 {
        match self {
            EngineEvent::Seeded { seq, .. } => *seq,
            EngineEvent::DieAdded { seq, .. } => *seq,
            EngineEvent::DieRemoved { seq, .. } => *seq,
            EngineEvent::DiceReplaced { seq, .. } => *seq,
            EngineEvent::TableRebuilt { seq, .. } => *seq,
            EngineEvent::DiceRolled { seq, .. } => *seq,
            EngineEvent::Restored { seq, .. } => *seq,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::Seeded { .. } => "Seeded",
            EngineEvent::DieAdded { .. } => "DieAdded",
            EngineEvent::DieRemoved { .. } => "DieRemoved",
            EngineEvent::DiceReplaced { .. } => "DiceReplaced",
            EngineEvent::TableRebuilt { .. } => "TableRebuilt",
            EngineEvent::DiceRolled { .. } => "DiceRolled",
            EngineEvent::Restored { .. } => "Restored",
        }
    }
}

/// Append-only log of engine events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<EngineEvent>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the sequence number for the next event
    pub fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn log(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&EngineEvent> {
        self.events.last()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&EngineEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Clear all events; sequence numbers keep increasing
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_increase_across_clear() {
        let mut log = EventLog::new();
        let first = log.next_seq();
        log.log(EngineEvent::DiceReplaced {
            seq: first,
            dice_count: 0,
        });
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.next_seq(), first + 1);
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = EngineEvent::Restored {
            seq: 4,
            dice_count: 2,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "Restored");
        assert_eq!(json["dice_count"], 2);
    }
}
