//! Structured run result handed to narrative, formatting and persistence
//!
//! Field order and collection order are stable: signals and hypotheses are
//! sorted by id, nodes are in evaluation order. Two runs over the same bytes
//! serialize identically.

use serde::{Deserialize, Serialize};

use crate::history::{ComparisonResult, ReasoningSignature, Regression};
use crate::hypothesis::Hypothesis;
use crate::observation::Signal;
use crate::reasoning::{OutcomeSummary, ReasoningNode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub dataset_hash: String,
    pub signals: Vec<Signal>,
    pub hypotheses: Vec<Hypothesis>,
    pub nodes: Vec<ReasoningNode>,
    pub summary: OutcomeSummary,
    pub signature: ReasoningSignature,
    pub comparison_result: ComparisonResult,
    pub regressions: Vec<Regression>,
}

impl RunResult {
    pub fn hypothesis(&self, id: &str) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.id == id)
    }

    pub fn signal(&self, id: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.id == id)
    }

    /// Canonical JSON form, identical for identical inputs
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
