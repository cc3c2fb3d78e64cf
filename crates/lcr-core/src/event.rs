//! # Events and Identifiers
//!
//! An [`Event`] reports that a process reached a lifecycle state at a
//! caller-assigned sequence number. Events are immutable value records.
//!
//! Two events for the same process with the same [`SeqNo`] are the same
//! logical event for deduplication, whatever their states say. Sequence
//! numbers are not assumed to be contiguous or to arrive in order.

use serde::{Deserialize, Serialize};

use crate::state::State;

/// Identity grouping events into one logical lifecycle instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub i64);

/// Caller-assigned sequence number, used for deduplication and tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeqNo(pub i32);

impl ProcessId {
    /// Access the inner value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl SeqNo {
    /// Access the inner value.
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl From<i64> for ProcessId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i32> for SeqNo {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "process:{}", self.0)
    }
}

impl std::fmt::Display for SeqNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// The process this event belongs to.
    pub process_id: ProcessId,
    /// Sequence number within the process.
    pub seq_no: SeqNo,
    /// The state the process reported.
    pub state: State,
}

impl Event {
    /// Create an event.
    pub fn new(process_id: ProcessId, seq_no: SeqNo, state: State) -> Self {
        Self {
            process_id,
            seq_no,
            state,
        }
    }
}

/// Renders as `STATE(seq)`, e.g. `MID1(3)`.
impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.state, self.seq_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = Event::new(ProcessId(7), SeqNo(3), State::Mid1);
        assert_eq!(event.to_string(), "MID1(3)");
        assert_eq!(event.process_id.to_string(), "process:7");
    }

    #[test]
    fn test_event_serializes_flat() {
        let event = Event::new(ProcessId(9), SeqNo(2), State::Final2);
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"process_id": 9, "seq_no": 2, "state": "FINAL2"})
        );
        let parsed: Event = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_identifier_conversions() {
        assert_eq!(ProcessId::from(42_i64).get(), 42);
        assert_eq!(SeqNo::from(-1_i32).get(), -1);
        assert!(SeqNo(1) < SeqNo(2));
    }
}
