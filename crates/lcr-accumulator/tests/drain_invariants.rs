//! # Drain Invariant Properties
//!
//! Property tests over arbitrary interleavings of events for a handful of
//! processes. Whatever arrives, a drained sequence must:
//!
//! - after a full reconciliation, contain each sequence number at most
//!   once, chain only legal transitions, stop at the first terminal state,
//!   and fit inside the engine-wide `pending` window;
//! - after a screening fallback, contain only terminal events. The fallback
//!   returns buffered finals as-is, so redelivered finals may repeat there.

use std::collections::HashSet;

use proptest::prelude::*;

use lcr_accumulator::{Accumulator, DrainOutcome, ReconcilingAccumulator};
use lcr_core::{is_legal, Event, ProcessId, SeqNo, State};

fn any_state() -> impl Strategy<Value = State> {
    proptest::sample::select(State::ALL.to_vec())
}

fn any_event() -> impl Strategy<Value = Event> {
    (0_i64..3, 0_i32..12, any_state())
        .prop_map(|(process, seq, state)| Event::new(ProcessId(process), SeqNo(seq), state))
}

/// An operation against the engine: accept an event or drain a process.
#[derive(Debug, Clone)]
enum Op {
    Accept(Event),
    Drain(ProcessId),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any_event().prop_map(Op::Accept),
        1 => (0_i64..3).prop_map(|p| Op::Drain(ProcessId(p))),
    ]
}

fn check_drained(drained: &[Event], outcome: DrainOutcome, window: usize) -> Result<(), TestCaseError> {
    match outcome {
        DrainOutcome::Empty => {
            prop_assert!(drained.is_empty());
        }
        DrainOutcome::FinalOnly => {
            prop_assert!(drained.iter().all(|e| e.state.is_final()));
        }
        DrainOutcome::Reconciled { built, trimmed } => {
            let mut seen = HashSet::new();
            for event in drained {
                prop_assert!(seen.insert(event.seq_no), "duplicate seq_no {} in {:?}", event.seq_no, drained);
            }
            prop_assert!(drained.len() <= window);
            prop_assert_eq!(built - trimmed, drained.len());
            for pair in drained.windows(2) {
                prop_assert!(
                    is_legal(pair[0].state, pair[1].state),
                    "illegal step {} -> {}",
                    pair[0],
                    pair[1]
                );
            }
            if let Some((_, rest)) = drained.split_last() {
                prop_assert!(rest.iter().all(|e| !e.state.is_final()));
            }
        }
    }
    Ok(())
}

proptest! {
    /// Invariants hold for every drain in an arbitrary accept/drain script.
    #[test]
    fn drains_respect_invariants(ops in prop::collection::vec(any_op(), 0..60)) {
        let mut acc = ReconcilingAccumulator::new();
        for op in ops {
            match op {
                Op::Accept(event) => acc.accept(event),
                Op::Drain(process_id) => {
                    let window = acc.pending();
                    let (drained, outcome) = acc.drain_with_outcome(process_id);
                    check_drained(&drained, outcome, window)?;
                    prop_assert!(drained.iter().all(|e| e.process_id == process_id));
                }
            }
        }
    }

    /// An untrimmed, non-empty run always begins at a start state.
    #[test]
    fn untrimmed_run_starts_at_start_state(events in prop::collection::vec(any_event(), 1..30)) {
        let mut acc = ReconcilingAccumulator::new();
        acc.accept_all(events);
        let (drained, outcome) = acc.drain_with_outcome(ProcessId(0));
        if let DrainOutcome::Reconciled { trimmed: 0, .. } = outcome {
            if let Some(first) = drained.first() {
                prop_assert!(first.state.is_start());
            }
        }
    }

    /// Buffers only ever hold events of their own process.
    #[test]
    fn buffers_hold_only_own_process(ops in prop::collection::vec(any_op(), 0..60)) {
        let mut acc = ReconcilingAccumulator::new();
        for op in ops {
            match op {
                Op::Accept(event) => acc.accept(event),
                Op::Drain(process_id) => {
                    acc.drain(process_id);
                }
            }
        }
        for process in 0..3 {
            let id = ProcessId(process);
            prop_assert!(acc.buffered(id).iter().all(|e| e.process_id == id));
        }
    }

    /// Draining is read-only for buffers and for the final-state registry.
    #[test]
    fn drain_never_mutates_buffers(events in prop::collection::vec(any_event(), 0..30)) {
        let mut acc = ReconcilingAccumulator::new();
        acc.accept_all(events);
        let before: Vec<Vec<Event>> = (0..3).map(|p| acc.buffered(ProcessId(p)).to_vec()).collect();
        let finals_before: Vec<Option<State>> = (0..3).map(|p| acc.final_state(ProcessId(p))).collect();
        for p in 0..3 {
            acc.drain(ProcessId(p));
        }
        for p in 0..3_i64 {
            prop_assert_eq!(acc.buffered(ProcessId(p)), before[p as usize].as_slice());
            prop_assert_eq!(acc.final_state(ProcessId(p)), finals_before[p as usize]);
        }
    }
}
