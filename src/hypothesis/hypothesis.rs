//! Hypothesis: a candidate explanation for one signal

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fingerprint::fingerprint;

/// Template slot a hypothesis was instantiated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Fingerprint of signal id and variant
    pub id: String,
    pub signal_id: String,
    pub variant: Variant,
    /// Short tag for the proposed mechanism
    pub mechanism: String,
    pub assumption: String,
    /// Fixed template constant, never derived from signal severity
    pub expected_score: f64,
    /// Hypothesis ids whose evaluation must precede this one, sorted
    pub depends_on: Vec<String>,
}

impl Hypothesis {
    /// Derives the identifier for a signal's template slot.
    pub fn derive_id(signal_id: &str, variant: Variant) -> String {
        fingerprint(&[signal_id, variant.as_str()])
    }

    /// Deterministic textual form used to choose between identical ids.
    pub fn canonical_form(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{:?}|{}",
            self.id,
            self.signal_id,
            self.variant,
            self.mechanism,
            self.assumption,
            self.expected_score,
            self.depends_on.join(",")
        )
    }
}
