//! Hypotheses: competing explanations for signals
//!
//! Signals -> catalog templates -> candidate hypotheses -> validated set.

pub mod catalog;
mod generator;
mod hypothesis;
mod validator;

pub use generator::{generate_hypotheses, hypotheses_for};
pub use hypothesis::{Hypothesis, Variant};
pub use validator::{deduplicate, dependency_graph, validate_hypotheses};
