//! Plain-text layout for terminal output

use crate::engine::RunResult;

/// Narrative, then a signal table and the result summary.
pub fn format_text(narrative: &str, result: &RunResult) -> String {
    let mut out = String::new();
    out.push_str(narrative);
    out.push_str("\n\n");
    out.push_str(&format!("Dataset: {}\n", result.dataset_hash));

    if !result.signals.is_empty() {
        out.push_str("Signals:\n");
        for signal in &result.signals {
            out.push_str(&format!(
                "- {} on '{}': statistic {:.4} (threshold {})\n",
                signal.kind, signal.column, signal.statistic, signal.threshold
            ));
        }
    }

    out.push_str("Results summary:\n");
    out.push_str(&format!("- supported: {}\n", result.summary.supported));
    out.push_str(&format!("- weak support: {}\n", result.summary.weak_support));
    out.push_str(&format!("- unsupported: {}\n", result.summary.unsupported));
    out.push_str(&format!("- comparison: {}\n", result.comparison_result));
    if let Some(dominant) = &result.signature.dominant {
        out.push_str(&format!("- dominant: {}\n", dominant));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{run, RunContext};
    use crate::explanation::build_narrative;
    use crate::ingest::{Column, Dataset};

    #[test]
    fn test_layout() {
        let dataset = Dataset::from_raw(vec![Column::text("region", &["north"; 8])], b"region");
        let result = run(&RunContext::new(&dataset), None).unwrap();
        let text = format_text(&build_narrative(&result), &result);

        assert!(text.contains("Signals:\n- distribution_shift on 'region'"));
        assert!(text.contains("- weak support: 1"));
        assert!(text.contains("- comparison: no_prior_runs"));
        assert!(text.starts_with(&format!("{}\n\nDataset: ", build_narrative(&result))));
        assert!(text.ends_with('\n'));
    }
}
