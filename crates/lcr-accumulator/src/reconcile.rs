//! # Reconciliation Pipeline
//!
//! The pure steps a drain runs over one process's buffered events. None of
//! these functions touch engine state; the engine decides which to run and
//! owns the counters.
//!
//! ```text
//! buffer ──screen──▶ (no progress, >1 event) ──▶ final_only
//!    │
//!    └─▶ dedup_by_seq_no ─▶ sort_by_priority ─▶ correct_adjacency
//!                                                   │
//!                        trim_to_recent ◀── build_valid_run
//! ```

use std::collections::HashSet;

use lcr_core::{is_legal, screening_successors, Event, State};

/// Whether any present state has one of its screening successors present.
pub fn has_forward_progress(events: &[Event]) -> bool {
    let present: HashSet<State> = events.iter().map(|e| e.state).collect();
    present.iter().any(|state| {
        screening_successors(*state)
            .iter()
            .any(|next| present.contains(next))
    })
}

/// The terminal events of a buffer, in buffer order.
pub fn final_only(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.state.is_final())
        .copied()
        .collect()
}

/// Keep the first event seen for each sequence number, preserving order.
pub fn dedup_by_seq_no(events: &[Event]) -> Vec<Event> {
    let mut seen = HashSet::with_capacity(events.len());
    events
        .iter()
        .filter(|e| seen.insert(e.seq_no))
        .copied()
        .collect()
}

/// Sort by state priority, then ascending sequence number.
pub fn sort_by_priority(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.state
            .cmp_priority(&b.state)
            .then_with(|| a.seq_no.cmp(&b.seq_no))
    });
}

/// Single left-to-right pass: wherever a start state is followed by
/// `MID2, MID1`, swap the pair so `MID1` comes first. Swapped entries are
/// not re-examined.
pub fn correct_adjacency(events: &mut [Event]) {
    for i in 1..events.len().saturating_sub(1) {
        if events[i - 1].state.is_start()
            && events[i].state == State::Mid2
            && events[i + 1].state == State::Mid1
        {
            events.swap(i, i + 1);
        }
    }
}

/// Greedily build the valid run from an ordered sequence.
///
/// Entries before the first start state are skipped. After that, an entry
/// is kept only if the step from the current tail is legal; illegal entries
/// are dropped and the tail stays put. Scanning stops after the first
/// terminal entry is kept.
pub fn build_valid_run(ordered: &[Event]) -> Vec<Event> {
    let mut run = Vec::with_capacity(ordered.len());
    let mut tail: Option<State> = None;

    for event in ordered {
        match tail {
            None => {
                if event.state.is_start() {
                    run.push(*event);
                    tail = Some(event.state);
                }
            }
            Some(from) if is_legal(from, event.state) => {
                run.push(*event);
                tail = Some(event.state);
                if event.state.is_final() {
                    break;
                }
            }
            Some(from) => {
                tracing::trace!(
                    process = %event.process_id,
                    seq_no = %event.seq_no,
                    from = %from,
                    to = %event.state,
                    "skipping illegal transition"
                );
            }
        }
    }

    run
}

/// Keep only the trailing `window` entries of a run.
pub fn trim_to_recent(mut run: Vec<Event>, window: usize) -> Vec<Event> {
    let skip = run.len().saturating_sub(window);
    run.split_off(skip)
}

// ─── Tests ───────────────────────────────────────────────────────────
