//! # Lifecycle State
//!
//! The fixed six-state lifecycle every process moves through.
//!
//! ## States
//!
//! ```text
//! START1 ─┐                 ┌─▶ FINAL1 (terminal)
//!         ├─▶ MID1 ◀──▶ MID2 ┤
//! START2 ─┘                 └─▶ FINAL2 (terminal)
//! ```
//!
//! Starts may also jump straight to a final state; see
//! [`crate::transition`] for the exact tables.
//!
//! ## Priority
//!
//! Reordering sorts by priority `START1 < START2 < MID1 = MID2 < FINAL1 < FINAL2`.
//! `MID1` and `MID2` tie, so `State` deliberately does not implement `Ord`:
//! two distinct states comparing equal would break the `Eq`/`Ord` contract.
//! Use [`State::cmp_priority`] instead.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseStateError;

/// A lifecycle state reported by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    /// First entry point.
    Start1,
    /// Second entry point.
    Start2,
    /// Mid-lifecycle state, interleavable with `MID2`.
    Mid1,
    /// Mid-lifecycle state, interleavable with `MID1`.
    Mid2,
    /// Terminal state. Takes precedence over `FINAL2` in the final-state registry.
    Final1,
    /// Terminal state.
    Final2,
}

impl State {
    /// All states in declaration order.
    pub const ALL: [State; 6] = [
        Self::Start1,
        Self::Start2,
        Self::Mid1,
        Self::Mid2,
        Self::Final1,
        Self::Final2,
    ];

    /// Whether this state is a recognized entry point.
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start1 | Self::Start2)
    }

    /// Whether this state is terminal (no further transitions).
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final1 | Self::Final2)
    }

    /// Sort rank. `MID1` and `MID2` share a rank.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Start1 => 0,
            Self::Start2 => 1,
            Self::Mid1 | Self::Mid2 => 2,
            Self::Final1 => 3,
            Self::Final2 => 4,
        }
    }

    /// Compare two states by sort priority.
    pub fn cmp_priority(&self, other: &State) -> Ordering {
        self.priority().cmp(&other.priority())
    }

    /// The canonical string name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start1 => "START1",
            Self::Start2 => "START2",
            Self::Mid1 => "MID1",
            Self::Mid2 => "MID2",
            Self::Final1 => "FINAL1",
            Self::Final2 => "FINAL2",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = ParseStateError;

    /// Parse a canonical state name. Matching ignores ASCII case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseStateError::new(s))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
