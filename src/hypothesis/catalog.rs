//! Fixed hypothesis catalog
//!
//! Exactly two templates per signal kind. Expected scores are constants:
//!
//! | kind               | A (mechanism, score)        | B (mechanism, score)   |
//! |--------------------|-----------------------------|------------------------|
//! | variance_spike     | pricing, 2.0                | external_shock, 1.5    |
//! | monotonic_break    | degradation, 1.5            | regime_shift, 1.6      |
//! | distribution_shift | measurement_artifact, 0.8   | real_change, 1.2       |
//!
//! Variant B of every signal is evaluated after variant A of the same signal.

use crate::observation::SignalKind;

use super::hypothesis::Variant;

/// One template slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    pub variant: Variant,
    pub mechanism: &'static str,
    /// `{column}` and `{statistic}` are substituted at instantiation
    pub assumption: &'static str,
    pub expected_score: f64,
    /// Slot of the same signal this template must be evaluated after
    pub after: Option<Variant>,
}

const VARIANCE_SPIKE: [Template; 2] = [
    Template {
        variant: Variant::A,
        mechanism: "pricing",
        assumption: "Variance spike in {column} (variance ratio {statistic}) is explained by pricing or discount changes",
        expected_score: 2.0,
        after: None,
    },
    Template {
        variant: Variant::B,
        mechanism: "external_shock",
        assumption: "Variance spike in {column} (variance ratio {statistic}) is caused by an external demand or supply shock",
        expected_score: 1.5,
        after: Some(Variant::A),
    },
];

const MONOTONIC_BREAK: [Template; 2] = [
    Template {
        variant: Variant::A,
        mechanism: "degradation",
        assumption: "Trend break in {column} ({statistic} direction reversals) reflects gradual process degradation",
        expected_score: 1.5,
        after: None,
    },
    Template {
        variant: Variant::B,
        mechanism: "regime_shift",
        assumption: "Trend break in {column} ({statistic} direction reversals) indicates a sudden operational regime shift",
        expected_score: 1.6,
        after: Some(Variant::A),
    },
];

const DISTRIBUTION_SHIFT: [Template; 2] = [
    Template {
        variant: Variant::A,
        mechanism: "measurement_artifact",
        assumption: "Distribution shift in {column} (entropy {statistic} bits) is due to a change in measurement or collection method",
        expected_score: 0.8,
        after: None,
    },
    Template {
        variant: Variant::B,
        mechanism: "real_change",
        assumption: "Distribution shift in {column} (entropy {statistic} bits) reflects a real change in the underlying process",
        expected_score: 1.2,
        after: Some(Variant::A),
    },
];

/// Returns the template pair for a signal kind.
pub fn templates_for(kind: SignalKind) -> &'static [Template; 2] {
    match kind {
        SignalKind::VarianceSpike => &VARIANCE_SPIKE,
        SignalKind::MonotonicBreak => &MONOTONIC_BREAK,
        SignalKind::DistributionShift => &DISTRIBUTION_SHIFT,
    }
}

impl Template {
    /// Fills in the column name and the formatted statistic.
    pub fn render(&self, column: &str, statistic: &str) -> String {
        self.assumption
            .replace("{column}", column)
            .replace("{statistic}", statistic)
    }
}
