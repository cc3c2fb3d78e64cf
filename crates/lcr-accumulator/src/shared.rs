//! # Shared Accumulator
//!
//! Thread-safe handle over one [`ReconcilingAccumulator`].
//!
//! The engine's counters couple every process together: eviction
//! eligibility and the drain window depend on engine-wide state. A
//! per-process lock would let a drain of one process race the counters
//! another process relies on, so every operation goes through one
//! `parking_lot::Mutex`. The lock is never held across caller code.

use std::sync::Arc;

use parking_lot::Mutex;

use lcr_core::{Event, ProcessId, State};

use crate::engine::{DrainOutcome, ReconcilingAccumulator};
use crate::Accumulator;

/// Cloneable, thread-safe handle to a single engine.
#[derive(Debug, Clone, Default)]
pub struct SharedAccumulator {
    inner: Arc<Mutex<ReconcilingAccumulator>>,
}

impl SharedAccumulator {
    /// Create a handle around a fresh engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing engine.
    pub fn from_engine(engine: ReconcilingAccumulator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Accept one event.
    pub fn accept(&self, event: Event) {
        self.inner.lock().accept(event);
    }

    /// Accept each event in order.
    ///
    /// The lock is taken per event, so a concurrent drain may observe any
    /// prefix of the batch.
    pub fn accept_all<I>(&self, events: I)
    where
        I: IntoIterator<Item = Event>,
    {
        for event in events {
            self.accept(event);
        }
    }

    /// Drain a process.
    pub fn drain(&self, process_id: ProcessId) -> Vec<Event> {
        self.inner.lock().drain(process_id)
    }

    /// Drain a process and report how the result was produced.
    pub fn drain_with_outcome(&self, process_id: ProcessId) -> (Vec<Event>, DrainOutcome) {
        self.inner.lock().drain_with_outcome(process_id)
    }

    /// Snapshot of the events buffered for a process.
    pub fn buffered(&self, process_id: ProcessId) -> Vec<Event> {
        self.inner.lock().buffered(process_id).to_vec()
    }

    /// The terminal state last recorded for a process, if any.
    pub fn final_state(&self, process_id: ProcessId) -> Option<State> {
        self.inner.lock().final_state(process_id)
    }

    /// Full reconciliations performed so far.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation()
    }

    /// Events accepted since the last full reconciliation.
    pub fn pending(&self) -> usize {
        self.inner.lock().pending()
    }
}

impl Accumulator for SharedAccumulator {
    fn accept(&mut self, event: Event) {
        SharedAccumulator::accept(self, event);
    }

    fn drain(&mut self, process_id: ProcessId) -> Vec<Event> {
        SharedAccumulator::drain(self, process_id)
    }
}
