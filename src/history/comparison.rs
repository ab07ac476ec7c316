//! Classification of the current signature against the latest prior one

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reasoning::{Outcome, ReasoningNode};

use super::signature::ReasoningSignature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonResult {
    ExactMatch,
    DominantChanged,
    PartialReinforcement,
    ReasoningDiverged,
    DifferentDataset,
    NoPriorRuns,
}

impl ComparisonResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonResult::ExactMatch => "exact_match",
            ComparisonResult::DominantChanged => "dominant_changed",
            ComparisonResult::PartialReinforcement => "partial_reinforcement",
            ComparisonResult::ReasoningDiverged => "reasoning_diverged",
            ComparisonResult::DifferentDataset => "different_dataset",
            ComparisonResult::NoPriorRuns => "no_prior_runs",
        }
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies in this order:
///
/// 1. no prior record -> `no_prior_runs`
/// 2. dataset hash differs -> `different_dataset`
/// 3. same supported set and dominant -> `exact_match`
/// 4. sets intersect, dominant differs -> `dominant_changed`
/// 5. sets intersect, dominant matches -> `partial_reinforcement`
/// 6. sets disjoint -> `reasoning_diverged`
pub fn classify(current: &ReasoningSignature, prior: Option<&ReasoningSignature>) -> ComparisonResult {
    let Some(prior) = prior else {
        return ComparisonResult::NoPriorRuns;
    };
    if prior.dataset_hash != current.dataset_hash {
        return ComparisonResult::DifferentDataset;
    }
    if prior.supported == current.supported && prior.dominant == current.dominant {
        return ComparisonResult::ExactMatch;
    }
    if current.intersects(prior) {
        if prior.dominant != current.dominant {
            ComparisonResult::DominantChanged
        } else {
            ComparisonResult::PartialReinforcement
        }
    } else {
        ComparisonResult::ReasoningDiverged
    }
}

/// A hypothesis the prior run supported that this run no longer supports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regression {
    pub hypothesis_id: String,
    pub current: Outcome,
}

/// Lists regressions against a prior run over the same dataset.
///
/// Hypotheses absent from this run are not regressions. Sorted by id.
pub fn find_regressions(
    current: &ReasoningSignature,
    nodes: &[ReasoningNode],
    prior: Option<&ReasoningSignature>,
) -> Vec<Regression> {
    let Some(prior) = prior.filter(|p| p.dataset_hash == current.dataset_hash) else {
        return Vec::new();
    };
    let mut regressions: Vec<Regression> = nodes
        .iter()
        .filter(|n| prior.supports(&n.hypothesis_id))
        .filter_map(|n| match n.outcome() {
            Some(outcome @ (Outcome::WeakSupport | Outcome::Unsupported)) => Some(Regression {
                hypothesis_id: n.hypothesis_id.clone(),
                current: outcome,
            }),
            _ => None,
        })
        .collect();
    regressions.sort_by(|a, b| a.hypothesis_id.cmp(&b.hypothesis_id));
    regressions.dedup();
    regressions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::NodeState;

    fn sig(hash: &str, supported: &[&str], dominant: Option<&str>) -> ReasoningSignature {
        ReasoningSignature::new(hash, supported.iter().copied(), dominant.map(str::to_string))
    }

    #[test]
    fn test_no_prior() {
        assert_eq!(classify(&sig("d", &["h1"], Some("h1")), None), ComparisonResult::NoPriorRuns);
    }

    #[test]
    fn test_different_dataset_short_circuits() {
        let prior = sig("d", &["h1"], Some("h1"));
        let current = sig("d2", &["h1"], Some("h1"));
        assert_eq!(classify(&current, Some(&prior)), ComparisonResult::DifferentDataset);
    }

    #[test]
    fn test_dominant_changed() {
        let prior = sig("d", &["h1", "h2"], Some("h1"));
        let current = sig("d", &["h1", "h2", "h7"], Some("h7"));
        assert_eq!(classify(&current, Some(&prior)), ComparisonResult::DominantChanged);
    }

    #[test]
    fn test_both_empty_is_exact() {
        let prior = sig("d", &[], None);
        assert_eq!(classify(&sig("d", &[], None), Some(&prior)), ComparisonResult::ExactMatch);
    }

    #[test]
    fn test_one_side_empty_diverged() {
        let prior = sig("d", &["h1"], Some("h1"));
        assert_eq!(classify(&sig("d", &[], None), Some(&prior)), ComparisonResult::ReasoningDiverged);
    }

    #[test]
    fn test_regressions() {
        let prior = sig("d", &["h1", "h2", "h3"], Some("h1"));
        let current = sig("d", &["h1"], Some("h1"));
        let node = |id: &str, outcome| ReasoningNode {
            id: format!("n-{}", id),
            hypothesis_id: id.into(),
            test: "expectation_score_test".into(),
            state: NodeState::Evaluated(outcome),
            score: 0.0,
            depends_on: vec![],
        };
        let nodes = vec![
            node("h3", Outcome::Unsupported),
            node("h1", Outcome::Supported),
            node("h2", Outcome::WeakSupport),
            node("h9", Outcome::Unsupported),
        ];
        let regressions = find_regressions(&current, &nodes, Some(&prior));
        assert_eq!(
            regressions,
            vec![
                Regression { hypothesis_id: "h2".into(), current: Outcome::WeakSupport },
                Regression { hypothesis_id: "h3".into(), current: Outcome::Unsupported },
            ]
        );

        let elsewhere = sig("other", &["h2"], Some("h2"));
        assert!(find_regressions(&current, &nodes, Some(&elsewhere)).is_empty());
    }
}
