//! Deterministic prose rendering of a run result

use crate::engine::RunResult;
use crate::history::ComparisonResult;
use crate::reasoning::{Outcome, ReasoningNode};

pub const NO_PATTERNS: &str = "No notable patterns detected.";

fn outcome_phrase(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Supported) => "is supported",
        Some(Outcome::WeakSupport) => "has only weak support",
        Some(Outcome::Unsupported) => "is not supported",
        None => "was not evaluated",
    }
}

fn node_sentence(result: &RunResult, node: &ReasoningNode) -> String {
    let claim = result
        .hypothesis(&node.hypothesis_id)
        .map(|h| format!("\"{}\"", h.assumption))
        .unwrap_or_else(|| format!("hypothesis {}", node.hypothesis_id));
    format!(
        "{} {} by the {} (score {:.2}).",
        claim,
        outcome_phrase(node.outcome()),
        node.test.replace('_', " "),
        node.score
    )
}

fn comparison_sentence(comparison: ComparisonResult) -> &'static str {
    match comparison {
        ComparisonResult::NoPriorRuns => "This is the first recorded run for this dataset.",
        ComparisonResult::ExactMatch => "The conclusions match the previous run exactly.",
        ComparisonResult::DominantChanged => {
            "The previous run shares some conclusions but favoured a different explanation."
        }
        ComparisonResult::PartialReinforcement => {
            "The previous run partially agrees and favoured the same explanation."
        }
        ComparisonResult::ReasoningDiverged => "The conclusions share nothing with the previous run.",
        ComparisonResult::DifferentDataset => "The previous run analysed different data.",
    }
}

/// One sentence per node in evaluation order, then summary and history.
pub fn build_narrative(result: &RunResult) -> String {
    if result.nodes.is_empty() {
        return NO_PATTERNS.to_string();
    }
    let mut sentences: Vec<String> = result
        .nodes
        .iter()
        .map(|node| node_sentence(result, node))
        .collect();
    sentences.push(format!(
        "Summary: {} supported; {} weak support; {} unsupported.",
        result.summary.supported, result.summary.weak_support, result.summary.unsupported
    ));
    sentences.push(comparison_sentence(result.comparison_result).to_string());
    if !result.regressions.is_empty() {
        let ids: Vec<&str> = result.regressions.iter().map(|r| r.hypothesis_id.as_str()).collect();
        sentences.push(format!("No longer supported: {}.", ids.join(", ")));
    }
    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{run, RunContext};
    use crate::ingest::{Column, Dataset};

    #[test]
    fn test_empty_result() {
        let dataset = Dataset::from_raw(vec![Column::real("flat", &[1.0, 2.0, 3.0])], b"flat");
        let result = run(&RunContext::new(&dataset), None).unwrap();
        assert_eq!(build_narrative(&result), NO_PATTERNS);
    }

    #[test]
    fn test_narrative_mentions_every_node() {
        let mut values = vec![100.0; 29];
        values.push(10_000.0);
        let dataset = Dataset::from_raw(vec![Column::real("price", &values)], b"price");
        let result = run(&RunContext::new(&dataset), None).unwrap();

        let text = build_narrative(&result);
        assert_eq!(text.matches("is supported by the expectation score test").count(), 2);
        assert!(text.contains("Summary: 2 supported; 0 weak support; 0 unsupported."));
        assert!(text.ends_with("This is the first recorded run for this dataset."));
        assert_eq!(text, build_narrative(&result));
    }
}
