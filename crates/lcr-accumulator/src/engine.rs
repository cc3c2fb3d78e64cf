//! # Reconciling Accumulator
//!
//! The single-threaded engine. Owns:
//!
//! - **Buffers**: process id → every event accepted since the last eviction.
//! - **Final-state registry**: process id → the latest terminal state seen.
//! - **`generation`**: full reconciliations ever performed, engine-wide.
//!   Only used as a gate: eviction is disabled until it is non-zero.
//! - **`pending`**: events accepted engine-wide since the last full
//!   reconciliation. Bounds how many trailing entries a drain returns.
//!
//! ## Ingestion
//!
//! ```text
//! accept(e)
//!   ├─ registry has FINAL2 and e is FINAL1 → registry := FINAL1,
//!   │                                        first buffered FINAL2 := e
//!   ├─ registry has any final and generation > 0 → drop buffer
//!   ├─ append e
//!   ├─ e is final → registry := e.state
//!   └─ pending += 1
//! ```
//!
//! The FINAL2 → FINAL1 upgrade runs before the eviction gate is checked.
//! While `generation == 0` nothing is evicted, so the replaced entry stays
//! visible in the buffer; afterwards the replacement is discarded together
//! with the rest of the buffer.
//!
//! ## Drain
//!
//! Drains never clear buffers. A drain that falls back to final-only output
//! leaves every counter untouched; a full reconciliation bumps `generation`
//! and resets `pending`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lcr_core::{Event, ProcessId, State};

use crate::reconcile;
use crate::Accumulator;

// ─── Drain Outcome ───────────────────────────────────────────────────

/// How a drain produced its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrainOutcome {
    /// Nothing buffered for the process.
    Empty,
    /// Screening found no forward progress; only terminal events returned.
    FinalOnly,
    /// Full reconciliation ran.
    Reconciled {
        /// Length of the valid run before trimming.
        built: usize,
        /// Leading entries dropped by the `pending` window.
        trimmed: usize,
    },
}

impl DrainOutcome {
    /// Whether this drain ran a full reconciliation.
    pub fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled { .. })
    }
}

impl std::fmt::Display for DrainOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::FinalOnly => f.write_str("final-only"),
            Self::Reconciled { built, trimmed } => {
                write!(f, "reconciled built={built} trimmed={trimmed}")
            }
        }
    }
}

// ─── Engine ──────────────────────────────────────────────────────────

/// Buffers lifecycle events per process and reconciles them on demand.
///
/// Not thread-safe on its own; wrap it in a
/// [`SharedAccumulator`](crate::SharedAccumulator) to share across threads.
#[derive(Debug, Default, Clone)]
pub struct ReconcilingAccumulator {
    buffers: HashMap<ProcessId, Vec<Event>>,
    final_states: HashMap<ProcessId, State>,
    generation: u64,
    pending: usize,
}

impl ReconcilingAccumulator {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain a process and report how the result was produced.
    pub fn drain_with_outcome(&mut self, process_id: ProcessId) -> (Vec<Event>, DrainOutcome) {
        let buffered = match self.buffers.get(&process_id) {
            Some(events) if !events.is_empty() => events,
            _ => {
                tracing::debug!(process = %process_id, "drain of empty buffer");
                return (Vec::new(), DrainOutcome::Empty);
            }
        };

        if buffered.len() > 1 && !reconcile::has_forward_progress(buffered) {
            let finals = reconcile::final_only(buffered);
            tracing::debug!(
                process = %process_id,
                buffered = buffered.len(),
                finals = finals.len(),
                "no forward progress; returning terminal events only"
            );
            return (finals, DrainOutcome::FinalOnly);
        }

        let mut ordered = reconcile::dedup_by_seq_no(buffered);
        reconcile::sort_by_priority(&mut ordered);
        reconcile::correct_adjacency(&mut ordered);

        self.generation += 1;

        let run = reconcile::build_valid_run(&ordered);
        let built = run.len();
        let drained = reconcile::trim_to_recent(run, self.pending);
        let trimmed = built - drained.len();

        tracing::debug!(
            process = %process_id,
            candidates = ordered.len(),
            built,
            trimmed,
            window = self.pending,
            generation = self.generation,
            "reconciled buffer"
        );

        self.pending = 0;
        (drained, DrainOutcome::Reconciled { built, trimmed })
    }

    /// Events currently buffered for a process, in arrival order.
    pub fn buffered(&self, process_id: ProcessId) -> &[Event] {
        self.buffers
            .get(&process_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The terminal state last recorded for a process, if any.
    pub fn final_state(&self, process_id: ProcessId) -> Option<State> {
        self.final_states.get(&process_id).copied()
    }

    /// Full reconciliations performed so far, across all processes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Events accepted since the last full reconciliation, across all processes.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Number of processes with a live buffer.
    pub fn process_count(&self) -> usize {
        self.buffers.len()
    }

    /// Apply the FINAL2 → FINAL1 upgrade if it applies, then report
    /// whether the process's buffer must be evicted before appending.
    fn prepare_for(&mut self, incoming: &Event) -> bool {
        let Some(recorded) = self.final_states.get(&incoming.process_id).copied() else {
            return false;
        };
        if recorded == State::Final2 && incoming.state == State::Final1 {
            self.upgrade_to_final1(incoming);
        }
        self.generation > 0
    }

    /// Record FINAL1 and overwrite the first buffered FINAL2 with `incoming`.
    fn upgrade_to_final1(&mut self, incoming: &Event) {
        self.final_states.insert(incoming.process_id, State::Final1);
        let replaced = self
            .buffers
            .get_mut(&incoming.process_id)
            .and_then(|events| events.iter_mut().find(|e| e.state == State::Final2))
            .map(|slot| *slot = *incoming)
            .is_some();
        tracing::debug!(
            process = %incoming.process_id,
            seq_no = %incoming.seq_no,
            replaced,
            "upgraded final state FINAL2 -> FINAL1"
        );
    }
}

impl Accumulator for ReconcilingAccumulator {
    fn accept(&mut self, event: Event) {
        let process_id = event.process_id;

        if self.prepare_for(&event) {
            if let Some(discarded) = self.buffers.remove(&process_id) {
                tracing::debug!(
                    process = %process_id,
                    discarded = discarded.len(),
                    "evicted buffer after terminal state"
                );
            }
        }

        self.buffers.entry(process_id).or_default().push(event);

        if event.state.is_final() {
            self.final_states.insert(process_id, event.state);
        }

        self.pending += 1;

        tracing::debug!(
            process = %process_id,
            seq_no = %event.seq_no,
            state = %event.state,
            pending = self.pending,
            "accepted event"
        );
    }

    fn drain(&mut self, process_id: ProcessId) -> Vec<Event> {
        self.drain_with_outcome(process_id).0
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
