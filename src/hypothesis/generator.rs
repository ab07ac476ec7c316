//! Hypothesis factory
//!
//! Every signal yields exactly two competing hypotheses from the catalog.
//! Generation reads the signal's identity, column and statistic; severity
//! never influences text or score.

use crate::observation::Signal;

use super::catalog::templates_for;
use super::hypothesis::Hypothesis;

/// Precision of the statistic quoted in assumption text
const STATISTIC_PRECISION: usize = 4;

/// Instantiates both templates for one signal.
pub fn hypotheses_for(signal: &Signal) -> [Hypothesis; 2] {
    let statistic = format!("{:.*}", STATISTIC_PRECISION, signal.statistic);
    templates_for(signal.kind).map(|template| {
        let depends_on = template
            .after
            .map(|slot| vec![Hypothesis::derive_id(&signal.id, slot)])
            .unwrap_or_default();
        Hypothesis {
            id: Hypothesis::derive_id(&signal.id, template.variant),
            signal_id: signal.id.clone(),
            variant: template.variant,
            mechanism: template.mechanism.to_string(),
            assumption: template.render(&signal.column, &statistic),
            expected_score: template.expected_score,
            depends_on,
        }
    })
}

/// Generates `2 × signals.len()` hypotheses, sorted by id.
pub fn generate_hypotheses(signals: &[Signal]) -> Vec<Hypothesis> {
    let mut hypotheses: Vec<Hypothesis> = signals.iter().flat_map(hypotheses_for).collect();
    hypotheses.sort_by(|a, b| a.id.cmp(&b.id));
    hypotheses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypothesis::Variant;
    use crate::observation::SignalKind;

    fn spike(column: &str, statistic: f64) -> Signal {
        Signal::new(SignalKind::VarianceSpike, column, statistic, 4.0, statistic)
    }

    #[test]
    fn test_two_per_signal_unique_ids() {
        let signals = vec![
            spike("price", 16.7),
            spike("qty", 9.1),
            Signal::new(SignalKind::MonotonicBreak, "price", 3.0, 1.0, 3.0),
        ];
        let hypotheses = generate_hypotheses(&signals);
        assert_eq!(hypotheses.len(), 6);
        let mut ids: Vec<_> = hypotheses.iter().map(|h| h.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_variant_b_depends_on_variant_a() {
        let [a, b] = hypotheses_for(&spike("price", 16.7));
        assert_eq!(a.variant, Variant::A);
        assert!(a.depends_on.is_empty());
        assert_eq!(b.depends_on, vec![a.id.clone()]);
        assert_eq!(a.signal_id, b.signal_id);
    }

    #[test]
    fn test_severity_does_not_influence_hypotheses() {
        let base = spike("price", 16.7);
        let mut louder = base.clone();
        louder.severity = 1_000.0;
        assert_eq!(hypotheses_for(&base), hypotheses_for(&louder));
    }

    #[test]
    fn test_assumption_mentions_column_and_statistic() {
        let [a, _] = hypotheses_for(&spike("price", 16.74783));
        assert!(a.assumption.contains("price"));
        assert!(a.assumption.contains("16.7478"));
        assert_eq!(a.expected_score, 2.0);
    }

    #[test]
    fn test_no_signals_no_hypotheses() {
        assert!(generate_hypotheses(&[]).is_empty());
    }
}
