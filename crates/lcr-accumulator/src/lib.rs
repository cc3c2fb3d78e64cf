//! # lcr-accumulator — Lifecycle Event Reconciliation Engine
//!
//! Buffers lifecycle events that arrive out of order, duplicated, or
//! interleaved across processes, and on demand reconciles one process's
//! buffer into the longest causally valid run.
//!
//! ## Components
//!
//! - **Engine** (`engine.rs`): [`ReconcilingAccumulator`] owns the
//!   per-process buffers, the final-state registry, and the two
//!   engine-wide counters. Implements ingestion and drain.
//!
//! - **Pipeline** (`reconcile.rs`): the pure steps of a drain. Screening,
//!   final-only fallback, dedup, priority sort, adjacency correction,
//!   valid-run construction, and trimming.
//!
//! - **Shared handle** (`shared.rs`): [`SharedAccumulator`] puts one engine
//!   behind a single mutex so it can be used from several threads.
//!
//! ## Cross-Process Coupling
//!
//! The counters are engine-wide, not per process. A full reconciliation of
//! any process enables terminal-state eviction for every process, and the
//! number of entries a drain returns is bounded by how many events were
//! accepted engine-wide since the previous full reconciliation. Sharding
//! the engine per process changes observable output.

pub mod engine;
pub mod reconcile;
pub mod shared;

use lcr_core::{Event, ProcessId};

pub use engine::{DrainOutcome, ReconcilingAccumulator};
pub use shared::SharedAccumulator;

/// The call interface between event producers, the engine, and consumers.
///
/// Producers push events with [`accept`](Accumulator::accept) or
/// [`accept_all`](Accumulator::accept_all) in any order. Consumers pull a
/// reconciled sequence with [`drain`](Accumulator::drain) whenever they
/// judge enough events have arrived.
pub trait Accumulator {
    /// Accept one event. Never fails for well-formed input.
    fn accept(&mut self, event: Event);

    /// Accept each event in order. Not atomic: each element is applied as
    /// an independent [`accept`](Accumulator::accept).
    fn accept_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = Event>,
        Self: Sized,
    {
        for event in events {
            self.accept(event);
        }
    }

    /// Produce the reconciled sequence for a process. Unknown processes
    /// yield an empty sequence.
    fn drain(&mut self, process_id: ProcessId) -> Vec<Event>;
}
