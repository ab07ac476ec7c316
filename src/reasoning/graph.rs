//! Reasoning graph
//!
//! One node per validated hypothesis. The evaluation order is the
//! topological order of the hypothesis dependencies with the smallest
//! hypothesis id first among ready nodes. Building fails closed on a cycle.

use std::collections::BTreeMap;

use crate::engine::errors::{EngineError, EngineResult};
use crate::hypothesis::{dependency_graph, Hypothesis};
use crate::observability::Logger;

use super::node::ReasoningNode;

#[derive(Debug, Clone)]
pub struct ReasoningGraph {
    /// hypothesis id -> node
    nodes: BTreeMap<String, ReasoningNode>,
    /// hypothesis ids in evaluation order
    order: Vec<String>,
}

impl ReasoningGraph {
    /// Builds the graph over a validated hypothesis set.
    ///
    /// # Errors
    ///
    /// - `DTE_DANGLING_DEPENDENCY` for a dependency outside the set
    /// - `DTE_CIRCULAR_REASONING` if the dependencies cannot be ordered
    pub fn build(hypotheses: &[Hypothesis]) -> EngineResult<Self> {
        let order = dependency_graph(hypotheses)?.topological_order()?;
        let nodes = hypotheses
            .iter()
            .map(|h| (h.id.clone(), ReasoningNode::pending(h)))
            .collect();
        Ok(Self { nodes, order })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hypothesis ids in the fixed evaluation order
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn node(&self, hypothesis_id: &str) -> Option<&ReasoningNode> {
        self.nodes.get(hypothesis_id)
    }

    /// Evaluates every node in order and returns them in that order.
    ///
    /// A node whose dependency is not yet evaluated means the order is
    /// broken; that is reported as circular reasoning.
    pub fn evaluate(mut self) -> EngineResult<Vec<ReasoningNode>> {
        let node_to_hypothesis: BTreeMap<String, String> = self
            .nodes
            .iter()
            .map(|(hypothesis_id, node)| (node.id.clone(), hypothesis_id.clone()))
            .collect();

        let mut evaluated = Vec::with_capacity(self.order.len());
        for hypothesis_id in &self.order {
            let node = self
                .nodes
                .get(hypothesis_id)
                .ok_or_else(|| EngineError::circular_reasoning(vec![hypothesis_id.clone()]))?;

            for dependency in &node.depends_on {
                let ready = node_to_hypothesis
                    .get(dependency)
                    .and_then(|h| self.nodes.get(h))
                    .map(ReasoningNode::is_evaluated)
                    .unwrap_or(false);
                if !ready {
                    return Err(EngineError::circular_reasoning(vec![
                        hypothesis_id.clone(),
                        node_to_hypothesis.get(dependency).cloned().unwrap_or_else(|| dependency.clone()),
                    ]));
                }
            }

            let Some(node) = self.nodes.get_mut(hypothesis_id) else {
                continue;
            };
            let outcome = node.evaluate();
            Logger::trace(
                "NODE_EVALUATED",
                &[
                    ("hypothesis_id", hypothesis_id.as_str()),
                    ("node_id", node.id.as_str()),
                    ("outcome", outcome.as_str()),
                ],
            );
            evaluated.push(node.clone());
        }
        Ok(evaluated)
    }
}
