//! Hypothesis validation
//!
//! Both checks fail closed:
//! 1. Identical identifiers collapse to one hypothesis, the one with the
//!    lexicographically smaller canonical form.
//! 2. Dependencies must resolve inside the set and must not form a cycle.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::dag::DependencyGraph;
use crate::engine::errors::{EngineError, EngineResult};
use crate::observability::Logger;

use super::hypothesis::Hypothesis;

/// Collapses hypotheses sharing an identifier. Output is sorted by id.
pub fn deduplicate(hypotheses: Vec<Hypothesis>) -> Vec<Hypothesis> {
    let mut unique: BTreeMap<String, Hypothesis> = BTreeMap::new();
    for hypothesis in hypotheses {
        match unique.entry(hypothesis.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(hypothesis);
            }
            Entry::Occupied(mut slot) => {
                Logger::warn("HYPOTHESIS_DUPLICATE", &[("hypothesis_id", hypothesis.id.as_str())]);
                if hypothesis.canonical_form() < slot.get().canonical_form() {
                    slot.insert(hypothesis);
                }
            }
        }
    }
    unique.into_values().collect()
}

/// Builds the dependency relation declared among hypotheses.
///
/// # Errors
///
/// `DTE_DANGLING_DEPENDENCY` if a dependency names an unknown hypothesis.
pub fn dependency_graph(hypotheses: &[Hypothesis]) -> EngineResult<DependencyGraph> {
    let known: BTreeMap<&str, &Hypothesis> =
        hypotheses.iter().map(|h| (h.id.as_str(), h)).collect();
    let mut graph = DependencyGraph::new();
    for hypothesis in hypotheses {
        graph.add_node(hypothesis.id.as_str());
        for dependency in &hypothesis.depends_on {
            if !known.contains_key(dependency.as_str()) {
                return Err(EngineError::dangling_dependency(&hypothesis.id, dependency));
            }
            graph.add_dependency(hypothesis.id.as_str(), dependency.as_str());
        }
    }
    Ok(graph)
}

/// Returns the valid hypothesis set, sorted by id.
///
/// # Errors
///
/// - `DTE_DANGLING_DEPENDENCY` for an unresolved dependency
/// - `DTE_CIRCULAR_REASONING` naming the hypotheses on a cycle
pub fn validate_hypotheses(hypotheses: Vec<Hypothesis>) -> EngineResult<Vec<Hypothesis>> {
    let unique = deduplicate(hypotheses);
    dependency_graph(&unique)?.topological_order()?;
    Ok(unique)
}
