//! Dependency graph with deterministic topological ordering
//!
//! Shared by the hypothesis validator and the reasoning graph. Ordering is
//! Kahn's algorithm with a sorted ready set, so ties are always broken by the
//! lexicographically smallest identifier regardless of insertion order.
//! A cycle aborts the sort and reports the identifiers that sit on it.

use std::collections::{BTreeMap, BTreeSet};

use crate::engine::errors::{EngineError, EngineResult};

/// Directed graph where an edge means "node waits for dependency".
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// node -> the nodes it depends on
    dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with no dependencies (no-op if present).
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.dependencies.entry(id.into()).or_default();
    }

    /// Declares that `node` must be ordered after `dependency`.
    ///
    /// Both endpoints are added if missing.
    pub fn add_dependency(&mut self, node: impl Into<String>, dependency: impl Into<String>) {
        let dependency = dependency.into();
        self.add_node(dependency.clone());
        self.dependencies.entry(node.into()).or_default().insert(dependency);
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Returns the declared dependencies of `id`.
    pub fn dependencies_of(&self, id: &str) -> impl Iterator<Item = &str> {
        self.dependencies
            .get(id)
            .into_iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }

    /// Returns one total order in which every node follows its dependencies.
    ///
    /// # Errors
    ///
    /// `DTE_CIRCULAR_REASONING` naming the cycle members if no such order exists.
    pub fn topological_order(&self) -> EngineResult<Vec<String>> {
        let mut pending: BTreeMap<&str, usize> = BTreeMap::new();
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for (node, deps) in &self.dependencies {
            pending.insert(node.as_str(), deps.len());
            for dep in deps {
                dependents.entry(dep.as_str()).or_default().push(node.as_str());
            }
        }

        let mut ready: BTreeSet<&str> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(node, _)| *node)
            .collect();

        let mut order = Vec::with_capacity(self.dependencies.len());
        while let Some(node) = ready.pop_first() {
            order.push(node.to_string());
            pending.remove(node);
            for dependent in dependents.get(node).map(Vec::as_slice).unwrap_or(&[]) {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(*dependent);
                    }
                }
            }
        }

        if pending.is_empty() {
            return Ok(order);
        }

        let residual: BTreeSet<&str> = pending.keys().copied().collect();
        Err(EngineError::circular_reasoning(self.cycle_members(residual)))
    }

    /// Narrows the unsortable residue down to nodes that lie on a cycle.
    ///
    /// Every residual node still waits on another residual node. Nodes that
    /// nothing in the residue waits on are merely downstream of a cycle and are
    /// peeled off until only cycle members remain.
    fn cycle_members(&self, mut residual: BTreeSet<&str>) -> Vec<String> {
        loop {
            let waited_on: BTreeSet<&str> = residual
                .iter()
                .flat_map(|node| self.dependencies_of(node))
                .filter(|dep| residual.contains(dep))
                .collect();
            let before = residual.len();
            residual.retain(|node| waited_on.contains(node));
            if residual.len() == before {
                break;
            }
        }
        residual.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::errors::EngineErrorCode;

    #[test]
    fn test_ties_broken_lexicographically() {
        let mut graph = DependencyGraph::new();
        graph.add_node("c");
        graph.add_node("a");
        graph.add_node("b");
        assert_eq!(graph.topological_order().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dependencies_come_first() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "z");
        graph.add_dependency("b", "a");
        assert_eq!(graph.topological_order().unwrap(), vec!["z", "a", "b"]);
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let mut g1 = DependencyGraph::new();
        g1.add_dependency("b", "a");
        g1.add_node("c");
        let mut g2 = DependencyGraph::new();
        g2.add_node("c");
        g2.add_node("b");
        g2.add_dependency("b", "a");
        assert_eq!(g1.topological_order().unwrap(), g2.topological_order().unwrap());
    }

    #[test]
    fn test_two_cycle_rejected() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "a");
        let err = graph.topological_order().unwrap_err();
        assert_eq!(err.code(), EngineErrorCode::CircularReasoning);
        assert_eq!(err.participants(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "a");
        let err = graph.topological_order().unwrap_err();
        assert_eq!(err.participants(), &["a".to_string()]);
    }

    #[test]
    fn test_downstream_nodes_not_reported() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "c");
        graph.add_dependency("c", "a");
        // d waits on the cycle but is not part of it
        graph.add_dependency("d", "a");
        graph.add_node("e");
        let err = graph.topological_order().unwrap_err();
        assert_eq!(
            err.participants(),
            &["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
