//! Run lifecycle events
//!
//! Events are explicit and typed.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Setup
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Dataset ingested and hashed
    DatasetLoaded,

    // Pipeline
    RunStart,
    SignalsDetected,
    HypothesesGenerated,
    HypothesesValidated,
    GraphEvaluated,
    ComparisonComplete,
    RunComplete,
    /// A fatal engine error ended the run (FATAL)
    RunAborted,

    // History
    /// Signature appended to the run store
    RunPersisted,
    /// Persistence skipped on request
    PersistSkipped,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::RunStart => "RUN_START",
            Event::SignalsDetected => "SIGNALS_DETECTED",
            Event::HypothesesGenerated => "HYPOTHESES_GENERATED",
            Event::HypothesesValidated => "HYPOTHESES_VALIDATED",
            Event::GraphEvaluated => "GRAPH_EVALUATED",
            Event::ComparisonComplete => "COMPARISON_COMPLETE",
            Event::RunComplete => "RUN_COMPLETE",
            Event::RunAborted => "RUN_ABORTED",
            Event::RunPersisted => "RUN_PERSISTED",
            Event::PersistSkipped => "PERSIST_SKIPPED",
        }
    }

    /// Fatal events are logged at FATAL severity
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RunAborted)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
