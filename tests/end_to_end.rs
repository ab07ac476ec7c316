//! End-to-End Tests
//!
//! CSV bytes -> dataset -> engine -> run store -> second run.
//!
//! A 30-row column with one extreme outlier yields exactly one variance
//! spike, two supported hypotheses and `no_prior_runs` on the first run.

use std::fs;

use chrono::Utc;

use datathought::engine::{run, RunContext};
use datathought::explanation::{build_narrative, format_text};
use datathought::history::{ComparisonResult, FileRunStore, RunStore};
use datathought::hypothesis::Variant;
use datathought::ingest::{load_bytes, load_path, ColumnType, IngestOptions};
use datathought::observation::SignalKind;
use datathought::reasoning::Outcome;

/// 29 values climbing from 100 to ~108 and one 10000 outlier
fn outlier_csv() -> String {
    let mut csv = String::from("price\n");
    for i in 0..29 {
        csv.push_str(&format!("{:.1}\n", 100.0 + f64::from(i) * 0.3));
    }
    csv.push_str("10000.0\n");
    csv
}

// =============================================================================
// FIRST RUN
// =============================================================================

#[test]
fn test_single_outlier_first_run() {
    let dataset = load_bytes(outlier_csv().as_bytes(), IngestOptions::default()).unwrap();
    assert_eq!(dataset.row_count(), 30);
    assert_eq!(dataset.columns()[0].column_type, ColumnType::Real);

    let result = run(&RunContext::new(&dataset), None).unwrap();

    assert_eq!(result.signals.len(), 1);
    let signal = &result.signals[0];
    assert_eq!(signal.kind, SignalKind::VarianceSpike);
    assert_eq!(signal.column, "price");
    assert!(signal.statistic > 16.0 && signal.statistic < 17.5);

    assert_eq!(result.hypotheses.len(), 2);
    assert!(result.hypotheses.iter().all(|h| h.signal_id == signal.id));

    assert_eq!(result.nodes.len(), 2);
    assert!(result
        .nodes
        .iter()
        .all(|n| n.outcome() == Some(Outcome::Supported)));
    assert_eq!(result.summary.supported, 2);

    assert_eq!(result.comparison_result, ComparisonResult::NoPriorRuns);
    assert_eq!(result.signature.dataset_hash, dataset.content_hash());
    assert_eq!(result.signature.supported.len(), 2);

    let dominant = result.signature.dominant.as_deref().unwrap();
    assert_eq!(result.hypothesis(dominant).unwrap().variant, Variant::A);
}

#[test]
fn test_structured_result_shape() {
    let dataset = load_bytes(outlier_csv().as_bytes(), IngestOptions::default()).unwrap();
    let result = run(&RunContext::new(&dataset), None).unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(json["signals"][0]["kind"], "variance_spike");
    assert_eq!(json["nodes"][0]["state"], "evaluated");
    assert_eq!(json["nodes"][0]["outcome"], "supported");
    assert_eq!(json["nodes"][0]["test"], "expectation_score_test");
    assert_eq!(json["comparison_result"], "no_prior_runs");
    assert!(json.get("recorded_at").is_none());
}

// =============================================================================
// HISTORY ACROSS RUNS
// =============================================================================

#[test]
fn test_second_run_on_same_file_is_exact_match() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    fs::write(&path, outlier_csv()).unwrap();
    let store = FileRunStore::new(dir.path().join("runs"));

    let dataset = load_path(&path, IngestOptions::default()).unwrap();
    let first = run(&RunContext::new(&dataset), store.read_latest("prices").unwrap().as_ref()).unwrap();
    store.append("prices", &first.signature, Utc::now()).unwrap();

    let dataset = load_path(&path, IngestOptions::default()).unwrap();
    let second = run(&RunContext::new(&dataset), store.read_latest("prices").unwrap().as_ref()).unwrap();
    assert_eq!(second.comparison_result, ComparisonResult::ExactMatch);
    assert!(second.regressions.is_empty());
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap().replace("exact_match", "no_prior_runs"));
}

#[test]
fn test_modified_bytes_is_different_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileRunStore::new(dir.path());

    let original = load_bytes(outlier_csv().as_bytes(), IngestOptions::default()).unwrap();
    let first = run(&RunContext::new(&original), None).unwrap();
    store.append("prices", &first.signature, Utc::now()).unwrap();

    let edited = outlier_csv().replace("10000.0", "10001.0");
    let modified = load_bytes(edited.as_bytes(), IngestOptions::default()).unwrap();
    let prior = store.read_latest("prices").unwrap();
    let second = run(&RunContext::new(&modified), prior.as_ref()).unwrap();
    assert_eq!(second.comparison_result, ComparisonResult::DifferentDataset);
}

// =============================================================================
// NARRATIVE
// =============================================================================

#[test]
fn test_text_rendering() {
    let dataset = load_bytes(outlier_csv().as_bytes(), IngestOptions::default()).unwrap();
    let result = run(&RunContext::new(&dataset), None).unwrap();
    let narrative = build_narrative(&result);
    assert!(narrative.contains("price"));
    assert!(narrative.contains("Summary: 2 supported; 0 weak support; 0 unsupported."));

    let text = format_text(&narrative, &result);
    assert!(text.starts_with(&narrative));
    assert!(text.contains("- variance_spike on 'price'"));
    assert!(text.contains("- comparison: no_prior_runs"));
}
