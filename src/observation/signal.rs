//! Signals: observations worth reasoning about

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fingerprint::{fingerprint, rounded};

/// Detected anomaly kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    VarianceSpike,
    MonotonicBreak,
    DistributionShift,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::VarianceSpike => "variance_spike",
            SignalKind::MonotonicBreak => "monotonic_break",
            SignalKind::DistributionShift => "distribution_shift",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detected anomaly in one column. Never mutated after detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Fingerprint of kind, column and rounded statistic
    pub id: String,
    pub kind: SignalKind,
    pub column: String,
    /// The statistic the detector computed
    pub statistic: f64,
    /// The threshold that was crossed
    pub threshold: f64,
    pub severity: f64,
}

impl Signal {
    pub fn new(kind: SignalKind, column: impl Into<String>, statistic: f64, threshold: f64, severity: f64) -> Self {
        let column = column.into();
        let id = fingerprint(&[kind.as_str(), &column, &rounded(statistic)]);
        Self {
            id,
            kind,
            column,
            statistic,
            threshold,
            severity,
        }
    }
}
