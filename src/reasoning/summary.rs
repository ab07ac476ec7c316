use serde::{Deserialize, Serialize};

use super::node::{Outcome, ReasoningNode};

/// Outcome counts over a run's nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub supported: u64,
    pub weak_support: u64,
    pub unsupported: u64,
}

impl OutcomeSummary {
    pub fn from_nodes(nodes: &[ReasoningNode]) -> Self {
        let mut summary = Self::default();
        for outcome in nodes.iter().filter_map(ReasoningNode::outcome) {
            match outcome {
                Outcome::Supported => summary.supported += 1,
                Outcome::WeakSupport => summary.weak_support += 1,
                Outcome::Unsupported => summary.unsupported += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> u64 {
        self.supported + self.weak_support + self.unsupported
    }
}
