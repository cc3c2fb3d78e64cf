//! # Replay and Check Subcommands
//!
//! `replay` runs a scenario through one [`SharedAccumulator`] and prints a
//! [`DrainRecord`] per drain step. `check` only parses and summarizes.

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

use lcr_accumulator::{DrainOutcome, SharedAccumulator};
use lcr_core::{Event, ProcessId};

use crate::config::{LcrConfig, OutputFormat};
use crate::scenario::{Scenario, Step};

/// Arguments for `lcr replay`.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Scenario file (YAML, or JSON with a `.json` extension).
    pub scenario: PathBuf,

    /// Output format. Overrides the config file.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `lcr check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Scenario file (YAML, or JSON with a `.json` extension).
    pub scenario: PathBuf,
}

/// What one drain step returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainRecord {
    /// Zero-based index of the drain step in the scenario.
    pub step: usize,
    /// The drained process.
    pub process_id: ProcessId,
    /// How the engine produced the result.
    pub outcome: DrainOutcome,
    /// The drained events, in order.
    pub events: Vec<Event>,
}

/// Run every step of a scenario against `accumulator`.
pub fn replay(scenario: &Scenario, accumulator: &SharedAccumulator) -> Vec<DrainRecord> {
    let mut records = Vec::new();
    for (step, call) in scenario.steps.iter().enumerate() {
        match call {
            Step::Accept(event) => accumulator.accept(*event),
            Step::AcceptAll(events) => accumulator.accept_all(events.iter().copied()),
            Step::Drain(process_id) => {
                let (events, outcome) = accumulator.drain_with_outcome(*process_id);
                tracing::info!(
                    step,
                    process = %process_id,
                    %outcome,
                    drained = events.len(),
                    "drain step"
                );
                records.push(DrainRecord {
                    step,
                    process_id: *process_id,
                    outcome,
                    events,
                });
            }
        }
    }
    records
}

/// Render drain records for stdout.
pub fn render(records: &[DrainRecord], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records),
        OutputFormat::Text => Ok(records
            .iter()
            .map(render_line)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn render_line(record: &DrainRecord) -> String {
    let events = if record.events.is_empty() {
        "-".to_string()
    } else {
        record
            .events
            .iter()
            .map(Event::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!("{} [{}]: {}", record.process_id, record.outcome, events)
}

/// Execute `lcr replay`.
pub fn run_replay(args: &ReplayArgs, config: &LcrConfig) -> anyhow::Result<u8> {
    let scenario = Scenario::load(&args.scenario)?;
    let accumulator = SharedAccumulator::new();
    let records = replay(&scenario, &accumulator);

    let format = args.format.unwrap_or(config.output);
    let rendered = render(&records, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    tracing::info!(
        drains = records.len(),
        generation = accumulator.generation(),
        pending = accumulator.pending(),
        "replay complete"
    );
    Ok(0)
}

/// Execute `lcr check`.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<u8> {
    let scenario = Scenario::load(&args.scenario)?;
    let summary = scenario.summary();
    let label = scenario.name.as_deref().unwrap_or("unnamed");
    println!(
        "{label}: {} steps, {} events, {} drains, {} processes",
        summary.steps, summary.events, summary.drains, summary.processes
    );
    Ok(0)
}
