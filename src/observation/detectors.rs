//! Detectors for variance spikes, monotonic breaks and distribution shifts
//!
//! Each detector is stateless: one column in, zero or one signal out.

use crate::engine::context::{RunContext, Thresholds};
use crate::engine::errors::EngineResult;
use crate::ingest::Column;
use crate::observability::Logger;

use super::metrics::{direction_reversal_count, shannon_entropy, variance_ratio};
use super::signal::{Signal, SignalKind};

/// Fires when `variance / mean²` exceeds the threshold.
pub fn detect_variance_spike(
    column: &str,
    values: &[f64],
    thresholds: &Thresholds,
) -> EngineResult<Option<Signal>> {
    let ratio = variance_ratio(values).map_err(|e| e.in_column(column))?;
    if !thresholds.variance_spike_fires(ratio) {
        return Ok(None);
    }
    Ok(Some(Signal::new(
        SignalKind::VarianceSpike,
        column,
        ratio,
        thresholds.variance_ratio(),
        ratio,
    )))
}

/// Fires when the sequence changes direction at least once.
pub fn detect_monotonic_break(
    column: &str,
    values: &[f64],
    thresholds: &Thresholds,
) -> EngineResult<Option<Signal>> {
    let reversals = direction_reversal_count(values).map_err(|e| e.in_column(column))?;
    if !thresholds.monotonic_break_fires(reversals) {
        return Ok(None);
    }
    let count = reversals as f64;
    Ok(Some(Signal::new(
        SignalKind::MonotonicBreak,
        column,
        count,
        thresholds.min_reversals() as f64,
        count,
    )))
}

/// Fires when the category entropy falls outside the accepted band.
///
/// Severity is the distance from the crossed bound.
pub fn detect_distribution_shift(
    column: &str,
    counts: &[u64],
    thresholds: &Thresholds,
) -> EngineResult<Option<Signal>> {
    let entropy = shannon_entropy(counts).map_err(|e| e.in_column(column))?;
    let Some(bound) = thresholds.entropy_bound_crossed(entropy) else {
        return Ok(None);
    };
    Ok(Some(Signal::new(
        SignalKind::DistributionShift,
        column,
        entropy,
        bound,
        (entropy - bound).abs(),
    )))
}

/// Runs every applicable detector over one column, in fixed detector order.
pub fn detect_column(column: &Column, thresholds: &Thresholds) -> EngineResult<Vec<Signal>> {
    let column_type = column.column_type;
    let mut signals = Vec::new();

    if column_type.is_ordered() {
        let values = column.numeric_values();
        if column_type.is_numeric() {
            signals.extend(detect_variance_spike(&column.name, &values, thresholds)?);
        }
        signals.extend(detect_monotonic_break(&column.name, &values, thresholds)?);
    }

    if column_type.is_categorical() {
        let counts: Vec<u64> = column.category_counts().into_values().collect();
        signals.extend(detect_distribution_shift(&column.name, &counts, thresholds)?);
    }

    Ok(signals)
}

/// Scans every column in schema order.
///
/// Output is sorted by signal id, so execution order never affects content.
pub fn detect_signals(ctx: &RunContext<'_>) -> EngineResult<Vec<Signal>> {
    let mut signals = Vec::new();
    for column in ctx.dataset().columns() {
        let found = detect_column(column, ctx.thresholds())?;
        for signal in &found {
            Logger::trace(
                "SIGNAL_DETECTED",
                &[
                    ("column", signal.column.as_str()),
                    ("kind", signal.kind.as_str()),
                    ("signal_id", signal.id.as_str()),
                ],
            );
        }
        signals.extend(found);
    }
    signals.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(signals)
}
