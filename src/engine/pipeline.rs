//! Reasoning pipeline
//!
//! schema check -> detect -> generate -> validate -> evaluate -> compare
//!
//! Every stage is a pure function of the run context and the previous
//! stage's output. The first error aborts the run; nothing partial is
//! returned.

use crate::history::{classify, find_regressions, PriorRunRecord, ReasoningSignature};
use crate::hypothesis::{generate_hypotheses, validate_hypotheses};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::observation::detect_signals;
use crate::reasoning::{OutcomeSummary, ReasoningGraph};

use super::context::RunContext;
use super::errors::EngineResult;
use super::result::RunResult;

/// Runs one stage inside an observation scope.
fn stage<T>(
    name: &str,
    count: impl FnOnce(&T) -> usize,
    work: impl FnOnce() -> EngineResult<T>,
) -> EngineResult<T> {
    let scope = ObservationScope::new(name);
    match work() {
        Ok(value) => {
            scope.complete_with_fields(&[("count", count(&value).to_string().as_str())]);
            Ok(value)
        }
        Err(err) => {
            scope.fail(err.code().code(), err.message());
            Err(err)
        }
    }
}

/// Runs the engine over the context's dataset.
///
/// `prior` is the latest stored record for the dataset scope, if any. The
/// run store is never written here.
///
/// # Errors
///
/// Any `EngineError`; all of them are fatal to the run.
pub fn run(ctx: &RunContext<'_>, prior: Option<&PriorRunRecord>) -> EngineResult<RunResult> {
    let dataset = ctx.dataset();
    let dataset_hash = dataset.content_hash().to_string();
    log_event_with_fields(
        Event::RunStart,
        &[
            ("columns", dataset.columns().len().to_string().as_str()),
            ("dataset_hash", dataset_hash.as_str()),
            ("rows", dataset.row_count().to_string().as_str()),
        ],
    );

    let result = run_stages(ctx, prior, dataset_hash);
    match &result {
        Ok(run) => log_event_with_fields(
            Event::RunComplete,
            &[
                ("comparison", run.comparison_result.as_str()),
                ("dataset_hash", run.dataset_hash.as_str()),
                ("supported", run.summary.supported.to_string().as_str()),
            ],
        ),
        Err(err) => log_event_with_fields(
            Event::RunAborted,
            &[("code", err.code().code()), ("reason", err.message())],
        ),
    }
    result
}

fn run_stages(
    ctx: &RunContext<'_>,
    prior: Option<&PriorRunRecord>,
    dataset_hash: String,
) -> EngineResult<RunResult> {
    stage("SCHEMA_CHECK", |_| ctx.expected_columns().len(), || {
        ctx.dataset().require_all(ctx.expected_columns())
    })?;

    let signals = stage("DETECT", Vec::len, || detect_signals(ctx))?;
    log_event_with_fields(
        Event::SignalsDetected,
        &[("signals", signals.len().to_string().as_str())],
    );

    let candidates = generate_hypotheses(&signals);
    log_event_with_fields(
        Event::HypothesesGenerated,
        &[("hypotheses", candidates.len().to_string().as_str())],
    );

    let hypotheses = stage("VALIDATE", Vec::len, || validate_hypotheses(candidates))?;
    log_event_with_fields(
        Event::HypothesesValidated,
        &[("hypotheses", hypotheses.len().to_string().as_str())],
    );

    let nodes = stage("EVALUATE", Vec::len, || ReasoningGraph::build(&hypotheses)?.evaluate())?;
    let summary = OutcomeSummary::from_nodes(&nodes);
    log_event_with_fields(
        Event::GraphEvaluated,
        &[
            ("supported", summary.supported.to_string().as_str()),
            ("unsupported", summary.unsupported.to_string().as_str()),
            ("weak_support", summary.weak_support.to_string().as_str()),
        ],
    );

    let signature = ReasoningSignature::from_nodes(dataset_hash.as_str(), &nodes);
    let prior_signature = prior.map(|record| &record.signature);
    let comparison_result = classify(&signature, prior_signature);
    let regressions = find_regressions(&signature, &nodes, prior_signature);
    log_event_with_fields(
        Event::ComparisonComplete,
        &[
            ("comparison", comparison_result.as_str()),
            ("regressions", regressions.len().to_string().as_str()),
        ],
    );

    Ok(RunResult {
        dataset_hash,
        signals,
        hypotheses,
        nodes,
        summary,
        signature,
        comparison_result,
        regressions,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;
    use crate::engine::errors::EngineErrorCode;
    use crate::history::{ComparisonResult, RunStore, MemoryRunStore};
    use crate::ingest::{Column, ColumnType, Dataset};
    use crate::observation::SignalKind;
    use crate::reasoning::Outcome;

    fn outlier_dataset() -> Dataset {
        let mut values: Vec<f64> = (0..29).map(|i| 100.0 + f64::from(i) * 0.3).collect();
        values.push(10_000.0);
        Dataset::from_raw(vec![Column::real("price", &values)], b"price\n...")
    }

    #[test]
    fn test_single_outlier_run() {
        let dataset = outlier_dataset();
        let result = run(&RunContext::new(&dataset), None).unwrap();

        assert_eq!(result.signals.len(), 1);
        assert_eq!(result.signals[0].kind, SignalKind::VarianceSpike);
        assert_eq!(result.hypotheses.len(), 2);
        assert!(result
            .nodes
            .iter()
            .all(|n| n.outcome() == Some(Outcome::Supported)));
        assert_eq!(result.signature.supported.len(), 2);
        assert_eq!(result.comparison_result, ComparisonResult::NoPriorRuns);
        assert!(result.regressions.is_empty());
    }

    #[test]
    fn test_variant_a_evaluated_first() {
        let dataset = outlier_dataset();
        let result = run(&RunContext::new(&dataset), None).unwrap();
        let first = result.hypothesis(&result.nodes[0].hypothesis_id).unwrap();
        assert_eq!(first.variant, crate::hypothesis::Variant::A);
        // variance spike A scores 2.0 and dominates
        assert_eq!(result.signature.dominant.as_deref(), Some(first.id.as_str()));
    }

    #[test]
    fn test_second_run_exact_match() {
        let dataset = outlier_dataset();
        let store = MemoryRunStore::new();
        let first = run(&RunContext::new(&dataset), None).unwrap();
        store.append("sales", &first.signature, Utc::now()).unwrap();

        let prior = store.read_latest("sales").unwrap();
        let second = run(&RunContext::new(&dataset), prior.as_ref()).unwrap();
        assert_eq!(second.comparison_result, ComparisonResult::ExactMatch);
        assert_eq!(first.signature, second.signature);
    }

    #[test]
    fn test_schema_mismatch_aborts() {
        let dataset = outlier_dataset();
        let mut expected = BTreeMap::new();
        expected.insert("price".to_string(), ColumnType::Integer);
        let ctx = RunContext::new(&dataset).with_expected_columns(&expected);

        let err = run(&ctx, None).unwrap_err();
        assert_eq!(err.code(), EngineErrorCode::SchemaMismatch);
        assert_eq!(err.column(), Some("price"));
    }

    #[test]
    fn test_quiet_dataset_has_no_signals() {
        let values: Vec<f64> = (0..10).map(|i| 50.0 + f64::from(i)).collect();
        let dataset = Dataset::from_raw(vec![Column::real("steady", &values)], b"steady");
        let result = run(&RunContext::new(&dataset), None).unwrap();
        assert!(result.signals.is_empty());
        assert!(result.nodes.is_empty());
        assert_eq!(result.signature.dominant, None);
    }
}
