//! Reasoning graph and evaluator
//!
//! Nodes move `pending -> evaluated`. Evaluation is a pure function of the
//! hypothesis expected score, run in one fixed topological order.

mod graph;
mod node;
mod summary;

pub use graph::ReasoningGraph;
pub use node::{evaluate_score, NodeState, Outcome, ReasoningNode, EXPECTATION_SCORE_TEST, SUPPORT_THRESHOLD};
pub use summary::OutcomeSummary;
