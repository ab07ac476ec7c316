//! Reasoning signature: the per-run fingerprint compared across runs

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::reasoning::{Outcome, ReasoningNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningSignature {
    pub dataset_hash: String,
    /// Hypothesis ids evaluated `supported`, sorted and unique
    pub supported: Vec<String>,
    /// Highest-scoring supported hypothesis, smallest id on ties
    pub dominant: Option<String>,
}

impl ReasoningSignature {
    pub fn new<I, S>(dataset_hash: impl Into<String>, supported: I, dominant: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let supported: BTreeSet<String> = supported.into_iter().map(Into::into).collect();
        Self {
            dataset_hash: dataset_hash.into(),
            supported: supported.into_iter().collect(),
            dominant,
        }
    }

    /// Computes the signature from evaluated nodes.
    pub fn from_nodes(dataset_hash: impl Into<String>, nodes: &[ReasoningNode]) -> Self {
        let mut supported: Vec<(&str, f64)> = nodes
            .iter()
            .filter(|n| n.outcome() == Some(Outcome::Supported))
            .map(|n| (n.hypothesis_id.as_str(), n.score))
            .collect();
        supported.sort_by(|a, b| a.0.cmp(b.0));
        supported.dedup_by(|a, b| a.0 == b.0);

        let dominant = dominant_of(&supported).map(str::to_string);
        Self::new(dataset_hash, supported.iter().map(|(id, _)| *id), dominant)
    }

    pub fn supports(&self, hypothesis_id: &str) -> bool {
        self.supported.binary_search_by(|id| id.as_str().cmp(hypothesis_id)).is_ok()
    }

    /// True when the two supported sets share at least one id
    pub fn intersects(&self, other: &ReasoningSignature) -> bool {
        self.supported.iter().any(|id| other.supports(id))
    }
}

/// Picks the max score; among equal scores the smallest id wins.
pub fn dominant_of<'a>(candidates: &[(&'a str, f64)]) -> Option<&'a str> {
    let mut best: Option<(&'a str, f64)> = None;
    for &(id, score) in candidates {
        best = match best {
            None => Some((id, score)),
            Some((best_id, best_score)) => match score.total_cmp(&best_score) {
                Ordering::Greater => Some((id, score)),
                Ordering::Equal if id < best_id => Some((id, score)),
                _ => Some((best_id, best_score)),
            },
        };
    }
    best.map(|(id, _)| id)
}
