//! # Scenario Files
//!
//! A scenario is an ordered script of engine calls. YAML by default; a
//! `.json` extension selects JSON.
//!
//! ```yaml
//! name: interleaved delivery
//! steps:
//!   - accept: { process_id: 7, seq_no: 3, state: FINAL1 }
//!   - accept_all:
//!       - { process_id: 7, seq_no: 1, state: START1 }
//!       - { process_id: 7, seq_no: 2, state: MID1 }
//!   - drain: 7
//! ```
//!
//! Each step names exactly one of `accept`, `accept_all`, or `drain`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lcr_core::{Event, ProcessId};

/// Errors loading a scenario file.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML document did not describe a scenario.
    #[error("invalid YAML scenario {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The JSON document did not describe a scenario.
    #[error("invalid JSON scenario {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The scenario has no steps.
    #[error("scenario {path} has no steps")]
    Empty { path: PathBuf },
}

/// One engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStep", into = "RawStep")]
pub enum Step {
    /// Accept a single event.
    Accept(Event),
    /// Accept a batch, in order.
    AcceptAll(Vec<Event>),
    /// Drain one process.
    Drain(ProcessId),
}

/// On-disk shape of a step: a map with exactly one known key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accept: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accept_all: Option<Vec<Event>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    drain: Option<ProcessId>,
}

impl TryFrom<RawStep> for Step {
    type Error = String;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        match (raw.accept, raw.accept_all, raw.drain) {
            (Some(event), None, None) => Ok(Step::Accept(event)),
            (None, Some(events), None) => Ok(Step::AcceptAll(events)),
            (None, None, Some(process_id)) => Ok(Step::Drain(process_id)),
            _ => Err("a step must set exactly one of `accept`, `accept_all`, `drain`".to_string()),
        }
    }
}

impl From<Step> for RawStep {
    fn from(step: Step) -> Self {
        match step {
            Step::Accept(event) => RawStep {
                accept: Some(event),
                ..RawStep::default()
            },
            Step::AcceptAll(events) => RawStep {
                accept_all: Some(events),
                ..RawStep::default()
            },
            Step::Drain(process_id) => RawStep {
                drain: Some(process_id),
                ..RawStep::default()
            },
        }
    }
}

/// An ordered script of engine calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Optional human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Steps, run in order.
    pub steps: Vec<Step>,
}

/// Static counts over a scenario, reported by `lcr check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioSummary {
    /// Number of steps.
    pub steps: usize,
    /// Events accepted across `accept` and `accept_all` steps.
    pub events: usize,
    /// Number of `drain` steps.
    pub drains: usize,
    /// Distinct process ids mentioned anywhere in the scenario.
    pub processes: usize,
}

impl Scenario {
    /// Load a scenario from disk. `.json` files are parsed as JSON,
    /// anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let scenario: Scenario = if is_json {
            serde_json::from_str(&content).map_err(|source| ScenarioError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|source| ScenarioError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        };

        if scenario.steps.is_empty() {
            return Err(ScenarioError::Empty {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(
            path = %path.display(),
            steps = scenario.steps.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    /// Count steps, events, drains, and distinct processes.
    pub fn summary(&self) -> ScenarioSummary {
        let mut processes = BTreeSet::new();
        let mut events = 0;
        let mut drains = 0;

        for step in &self.steps {
            match step {
                Step::Accept(event) => {
                    events += 1;
                    processes.insert(event.process_id);
                }
                Step::AcceptAll(batch) => {
                    events += batch.len();
                    processes.extend(batch.iter().map(|e| e.process_id));
                }
                Step::Drain(process_id) => {
                    drains += 1;
                    processes.insert(*process_id);
                }
            }
        }

        ScenarioSummary {
            steps: self.steps.len(),
            events,
            drains,
            processes: processes.len(),
        }
    }
}
