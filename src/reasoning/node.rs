//! Reasoning nodes and the expectation-score test

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fingerprint::fingerprint;
use crate::hypothesis::Hypothesis;

/// The only test applied in this version
pub const EXPECTATION_SCORE_TEST: &str = "expectation_score_test";

/// Scores at or above this are supported
pub const SUPPORT_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Supported,
    WeakSupport,
    Unsupported,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Supported => "supported",
            Outcome::WeakSupport => "weak_support",
            Outcome::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Applies the expectation-score test.
///
/// ```text
/// score >= 1.0      -> supported
/// 0 < score < 1.0   -> weak_support
/// score <= 0        -> unsupported
/// ```
///
/// NaN compares false everywhere and lands on unsupported.
pub fn evaluate_score(score: f64) -> Outcome {
    if score >= SUPPORT_THRESHOLD {
        Outcome::Supported
    } else if score > 0.0 {
        Outcome::WeakSupport
    } else {
        Outcome::Unsupported
    }
}

/// Node lifecycle: `pending -> evaluated{outcome}`. Evaluated is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "outcome", rename_all = "snake_case")]
pub enum NodeState {
    Pending,
    Evaluated(Outcome),
}

/// Evaluation of one hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningNode {
    pub id: String,
    pub hypothesis_id: String,
    pub test: String,
    #[serde(flatten)]
    pub state: NodeState,
    pub score: f64,
    /// Node ids that are evaluated before this one, sorted
    pub depends_on: Vec<String>,
}

impl ReasoningNode {
    pub fn derive_id(hypothesis_id: &str) -> String {
        fingerprint(&[hypothesis_id, EXPECTATION_SCORE_TEST])
    }

    /// Creates a pending node for a hypothesis.
    pub fn pending(hypothesis: &Hypothesis) -> Self {
        let mut depends_on: Vec<String> = hypothesis
            .depends_on
            .iter()
            .map(|h| Self::derive_id(h))
            .collect();
        depends_on.sort();
        depends_on.dedup();
        Self {
            id: Self::derive_id(&hypothesis.id),
            hypothesis_id: hypothesis.id.clone(),
            test: EXPECTATION_SCORE_TEST.to_string(),
            state: NodeState::Pending,
            score: hypothesis.expected_score,
            depends_on,
        }
    }

    /// Moves the node to its terminal state. Evaluating twice is a no-op
    /// since the outcome is a pure function of the score.
    pub fn evaluate(&mut self) -> Outcome {
        match self.state {
            NodeState::Evaluated(outcome) => outcome,
            NodeState::Pending => {
                let outcome = evaluate_score(self.score);
                self.state = NodeState::Evaluated(outcome);
                outcome
            }
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            NodeState::Evaluated(outcome) => Some(outcome),
            NodeState::Pending => None,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.outcome().is_some()
    }
}
