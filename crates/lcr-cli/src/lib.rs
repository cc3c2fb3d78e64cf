//! # lcr-cli — Command-Line Driver for the Lifecycle Reconciler
//!
//! Provides the `lcr` binary. The engine has no I/O of its own; this crate
//! feeds it from scenario files and prints what each drain returns.
//!
//! ## Subcommands
//!
//! - `lcr replay <scenario>`: Run every step through one engine and print
//!   one record per drain step.
//! - `lcr check <scenario>`: Parse a scenario and summarize it without
//!   running it.
//!
//! ```bash
//! lcr replay crates/lcr-cli/scenarios/interleaved.yaml --format json
//! lcr -vv --config lcr.yaml replay scenario.json
//! ```

pub mod config;
pub mod replay;
pub mod scenario;

pub use config::{ConfigError, LcrConfig, LogFormat, OutputFormat};
pub use replay::{replay, render, DrainRecord};
pub use scenario::{Scenario, ScenarioError, ScenarioSummary, Step};
