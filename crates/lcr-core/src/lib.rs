//! # lcr-core — Foundational Types for the Lifecycle Reconciler
//!
//! Defines the vocabulary shared by every crate in the workspace: the
//! fixed six-state lifecycle, the events that report state changes, and
//! the two transition tables the reconciler consults. This crate depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ProcessId` and `SeqNo` are
//!    distinct types. A sequence number cannot be passed where a process
//!    id is expected.
//!
//! 2. **Single `State` enum.** Six variants, exhaustive `match` everywhere.
//!    There is no representation for a state outside the lifecycle.
//!
//! 3. **Two transition tables, never merged.** [`transition::screening_successors`]
//!    answers "could this buffer make forward progress at all", while
//!    [`transition::is_legal`] answers "may this exact step follow that one".
//!    They disagree on purpose (e.g. `START1 → FINAL2` is legal but is not
//!    a screening successor).
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod event;
pub mod state;
pub mod transition;

// Re-export primary types for ergonomic imports.
pub use error::ParseStateError;
pub use event::{Event, ProcessId, SeqNo};
pub use state::State;
pub use transition::{is_legal, legal_successors, screening_successors};
